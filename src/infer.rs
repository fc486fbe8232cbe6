//! Program-type inference from section labels
//!
//! A section label like `"cgroup/connect6"` carries up to two useful
//! prefixes: the first `/`-segment and the first two segments joined. A
//! label is eligible for inference only when one of those prefixes appears
//! verbatim in some program type's literal set; metadata-only labels such as
//! `".maps"` never qualify. The attach point is simply the last segment.

use crate::catalog::FeatureCatalog;

/// First and first-two segment prefixes of a section label.
///
/// `"xdp"` → `("xdp", None)`;
/// `"xdp/devmap/redirect"` → `("xdp", Some("xdp/devmap"))`.
pub fn prefix_candidates(label: &str) -> (&str, Option<String>) {
    let mut parts = label.splitn(3, '/');
    let first = parts.next().unwrap_or_default();
    let first_two = parts.next().map(|second| format!("{first}/{second}"));
    (first, first_two)
}

/// Whether either prefix of `label` appears verbatim in any program type's
/// literal set. Ineligible labels still count in the raw-label table, but
/// contribute nothing to program-type inference.
pub fn is_inferable(label: &str, catalog: &FeatureCatalog) -> bool {
    let (first, first_two) = prefix_candidates(label);
    catalog.program_types.iter().any(|entry| {
        entry.literals.contains(first)
            || first_two
                .as_deref()
                .is_some_and(|ft| entry.literals.contains(ft))
    })
}

/// The first program type (catalog document order) whose literal set
/// contains one of the label's prefixes. Document order makes the result
/// deterministic when literals of several types overlap.
pub fn infer_program_type<'c>(label: &str, catalog: &'c FeatureCatalog) -> Option<&'c str> {
    let (first, first_two) = prefix_candidates(label);
    catalog
        .program_types
        .iter()
        .find(|entry| {
            entry.literals.contains(first)
                || first_two
                    .as_deref()
                    .is_some_and(|ft| entry.literals.contains(ft))
        })
        .map(|entry| entry.name.as_str())
}

/// Attach point of a label: its last `/`-delimited segment.
///
/// `"tcx/ingress"` → `"ingress"`; `"xdp/devmap/redirect"` → `"redirect"`;
/// a label with no `/` is its own attach point.
pub fn attach_point(label: &str) -> &str {
    label.rsplit('/').next().unwrap_or(label)
}
