use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use bpfscan::catalog::{self, FeatureCatalog};
use bpfscan::cli::{Cli, OutputFormat};
use bpfscan::{report, scan};

/// Exit code when REPO is missing or not a directory.
const EXIT_BAD_REPO: u8 = 2;
/// Exit code when the catalog cannot be located, read, or parsed.
const EXIT_BAD_CATALOG: u8 = 3;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.debug);

    if !args.repo.is_dir() {
        eprintln!("Repository not found: {}", args.repo.display());
        return ExitCode::from(EXIT_BAD_REPO);
    }

    let catalog_path = match args
        .catalog
        .clone()
        .or_else(|| catalog::discover_catalog(&args.repo))
    {
        Some(path) => path,
        None => {
            eprintln!(
                "{} not found at or above {}",
                catalog::DEFAULT_CATALOG_RELPATH,
                args.repo.display()
            );
            return ExitCode::from(EXIT_BAD_CATALOG);
        }
    };

    let feature_catalog = match FeatureCatalog::from_path(&catalog_path) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(EXIT_BAD_CATALOG);
        }
    };

    let result = match scan::scan_repo(&args.repo, &feature_catalog, &args.include_exts()) {
        Ok(result) => result,
        Err(err) => {
            // The only scan-time failure is a catalog-derived pattern that
            // will not compile.
            eprintln!("{err}");
            return ExitCode::from(EXIT_BAD_CATALOG);
        }
    };

    match args.format {
        OutputFormat::Json => match report::JsonReport::new(&result).to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("{err:#}");
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Text => print!("{}", report::render_text(&result)),
    }

    ExitCode::SUCCESS
}
