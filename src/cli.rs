//! CLI argument parsing for bpfscan

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::walker::DEFAULT_INCLUDE_EXTS;

/// Output format for scan results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable per-category listing (default)
    Text,
    /// JSON object mirroring the six occurrence tables
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "bpfscan")]
#[command(version)]
#[command(about = "Static eBPF feature-usage scanner for source trees", long_about = None)]
pub struct Cli {
    /// Repository root to scan
    #[arg(value_name = "REPO")]
    pub repo: PathBuf,

    /// Ground-truth catalog path (default: nearest data/feature-catalog.json
    /// at or above REPO)
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// File extension to scan, e.g. `.bpf.c` (repeatable; replaces the
    /// default set)
    #[arg(long = "ext", value_name = "EXT")]
    pub ext: Vec<String>,

    /// Print scan diagnostics to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Effective include-extension set: lowercased, with a leading dot.
    pub fn include_exts(&self) -> Vec<String> {
        if self.ext.is_empty() {
            return DEFAULT_INCLUDE_EXTS.iter().map(|e| e.to_string()).collect();
        }
        self.ext
            .iter()
            .map(|ext| {
                let ext = ext.to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect()
    }
}
