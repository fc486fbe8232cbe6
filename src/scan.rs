//! Repository scan pipeline and result aggregation
//!
//! One pass: walk the tree, read each candidate file (lossy UTF-8, skip on
//! read failure), run every extractor over the text, and fold the matches
//! into a single [`ScanReport`]. The report grows monotonically and is only
//! handed out once the whole tree has been walked.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::catalog::{ConfigError, FeatureCatalog};
use crate::infer;
use crate::matchers::Matchers;
use crate::walker;

/// Occurrence tables accumulated over one repository scan.
///
/// BTreeMap keeps serialization deterministic: two scans of an unchanged
/// tree produce byte-identical structured output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub map_types: BTreeMap<String, u64>,
    pub attach_types: BTreeMap<String, u64>,
    pub helpers: BTreeMap<String, u64>,
    /// Raw section labels, exactly as written in source
    pub sec_full: BTreeMap<String, u64>,
    pub program_types_inferred: BTreeMap<String, u64>,
    pub program_types_tokens: BTreeMap<String, u64>,
}

fn bump(table: &mut BTreeMap<String, u64>, key: &str) {
    *table.entry(key.to_owned()).or_insert(0) += 1;
}

impl ScanReport {
    /// Sum another report into this one. Merging is commutative and
    /// associative over counts, so per-file (or per-worker) partial reports
    /// can be combined in any order.
    pub fn merge(&mut self, other: &ScanReport) {
        for (dst, src) in [
            (&mut self.map_types, &other.map_types),
            (&mut self.attach_types, &other.attach_types),
            (&mut self.helpers, &other.helpers),
            (&mut self.sec_full, &other.sec_full),
            (&mut self.program_types_inferred, &other.program_types_inferred),
            (&mut self.program_types_tokens, &other.program_types_tokens),
        ] {
            for (key, count) in src {
                *dst.entry(key.clone()).or_insert(0) += count;
            }
        }
    }

    /// Total occurrences across all six tables.
    pub fn total_occurrences(&self) -> u64 {
        [
            &self.map_types,
            &self.attach_types,
            &self.helpers,
            &self.sec_full,
            &self.program_types_inferred,
            &self.program_types_tokens,
        ]
        .iter()
        .flat_map(|table| table.values())
        .sum()
    }
}

/// Run every extractor over one file's text and fold the matches into
/// `report`.
pub fn scan_text(
    text: &str,
    matchers: &Matchers,
    catalog: &FeatureCatalog,
    report: &mut ScanReport,
) {
    for label in matchers.section_labels(text) {
        bump(&mut report.sec_full, label);

        // Metadata-only labels such as ".maps" are excluded from inference;
        // they still count above.
        if infer::is_inferable(label, catalog) {
            if let Some(kernel_type) = infer::infer_program_type(label, catalog) {
                bump(&mut report.program_types_inferred, kernel_type);
            }
        }

        // The attach point comes from the label shape alone, whether or not
        // the catalog knows it.
        bump(&mut report.attach_types, infer::attach_point(label));
    }

    for name in matchers.helper_calls(text) {
        bump(&mut report.helpers, name);
    }
    for name in matchers.map_tokens(text) {
        bump(&mut report.map_types, name);
    }
    for name in matchers.attach_tokens(text) {
        bump(&mut report.attach_types, name);
    }
    for name in matchers.program_type_tokens(text) {
        bump(&mut report.program_types_tokens, name);
    }
}

/// Walk `root` and aggregate all extractor output into one report.
///
/// Unreadable files are skipped, never fatal; the only error path is a
/// catalog so large its derived pattern fails to compile.
pub fn scan_repo(
    root: &Path,
    catalog: &FeatureCatalog,
    exts: &[String],
) -> Result<ScanReport, ConfigError> {
    let matchers = Matchers::from_catalog(catalog)?;
    let mut report = ScanReport::default();
    let mut files = 0usize;

    for path in walker::source_files(root, exts) {
        let text = match fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                debug!(path = %path.display(), %err, "skipping unreadable file");
                continue;
            }
        };
        scan_text(&text, &matchers, catalog, &mut report);
        files += 1;
    }

    info!(
        files,
        occurrences = report.total_occurrences(),
        "scan complete"
    );
    Ok(report)
}
