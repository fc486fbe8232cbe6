//! Structured and textual rendering of a scan report

use serde::Serialize;
use std::collections::BTreeMap;

use crate::scan::ScanReport;

/// Section-label tables, grouped under `program_sections` in the output
#[derive(Debug, Clone, Serialize)]
pub struct JsonSections<'a> {
    pub sec_full: &'a BTreeMap<String, u64>,
}

/// Root structured-output document, mirroring the six tables verbatim
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub map_types: &'a BTreeMap<String, u64>,
    pub attach_types: &'a BTreeMap<String, u64>,
    pub helpers: &'a BTreeMap<String, u64>,
    pub program_sections: JsonSections<'a>,
    pub program_types_inferred: &'a BTreeMap<String, u64>,
    pub program_types_tokens: &'a BTreeMap<String, u64>,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a ScanReport) -> Self {
        Self {
            map_types: &report.map_types,
            attach_types: &report.attach_types,
            helpers: &report.helpers,
            program_sections: JsonSections {
                sec_full: &report.sec_full,
            },
            program_types_inferred: &report.program_types_inferred,
            program_types_tokens: &report.program_types_tokens,
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Render one counted category: descending count, ties by ascending name.
fn render_counter(out: &mut String, title: &str, table: &BTreeMap<String, u64>) {
    let total: u64 = table.values().sum();
    out.push_str(&format!(
        "\n{title} ({total} occurrences, {} unique):\n",
        table.len()
    ));

    let mut rows: Vec<(&str, u64)> = table.iter().map(|(k, &v)| (k.as_str(), v)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    for (name, count) in rows {
        out.push_str(&format!("  {name}: {count}\n"));
    }
}

/// Human-readable per-category listing
pub fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();
    render_counter(&mut out, "Map types", &report.map_types);
    render_counter(&mut out, "Attach types", &report.attach_types);
    render_counter(&mut out, "Helpers", &report.helpers);

    // Program types render as a unique set: which types the repo uses
    // matters here, not how often each label repeats.
    out.push_str(&format!(
        "\nProgram types (unique) ({} types):\n",
        report.program_types_inferred.len()
    ));
    for name in report.program_types_inferred.keys() {
        out.push_str(&format!("  {name}\n"));
    }

    render_counter(
        &mut out,
        "Program type tokens (BPF_PROG_TYPE_*)",
        &report.program_types_tokens,
    );
    render_counter(&mut out, "SEC full", &report.sec_full);
    out
}
