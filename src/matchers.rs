//! Catalog-derived pattern extractors
//!
//! All patterns are compiled once from a frozen [`FeatureCatalog`] snapshot
//! and held for the scan's lifetime; there is no process-wide pattern cache.
//! Matching is textual: occurrences inside comments and string literals are
//! extracted like any other, which is the documented contract of the scanner.

use crate::catalog::{ConfigError, FeatureCatalog};
use regex::Regex;
use std::collections::HashSet;

/// Compiled matcher set for one scan
#[derive(Debug)]
pub struct Matchers {
    /// Call-like spelling: `SEC("<label>")`
    sec_call: Regex,
    /// Attribute-like spelling: `section("<label>")`
    sec_attr: Regex,
    /// Exact catalog alternation, or the generic `bpf_*` heuristic when the
    /// catalog carries no helper names
    helper_call: Regex,
    map_token: Option<Regex>,
    attach_token: Option<Regex>,
    prog_token: Option<Regex>,
}

/// Escaped alternation over a name set, longest name first so no entry is
/// shadowed by a shorter sibling. None when the set is empty.
fn alternation(names: &HashSet<String>) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    let mut escaped: Vec<String> = names.iter().map(|name| regex::escape(name)).collect();
    escaped.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    Some(escaped.join("|"))
}

fn token_regex(names: &HashSet<String>) -> Result<Option<Regex>, ConfigError> {
    match alternation(names) {
        Some(alt) => Ok(Some(Regex::new(&format!(r"\b({alt})\b"))?)),
        None => Ok(None),
    }
}

impl Matchers {
    pub fn from_catalog(catalog: &FeatureCatalog) -> Result<Self, ConfigError> {
        let helper_call = match alternation(&catalog.helpers) {
            Some(alt) => Regex::new(&format!(r"\b({alt})\s*\("))?,
            None => Regex::new(r"\b(bpf_[a-z0-9_]+)\s*\(")?,
        };

        let prog_names: HashSet<String> =
            catalog.program_type_names().map(str::to_owned).collect();

        Ok(Self {
            sec_call: Regex::new(r#"\bSEC\s*\(\s*"([^"]*)"\s*\)"#)?,
            sec_attr: Regex::new(r#"section\s*\(\s*"([^"]*)"\s*\)"#)?,
            helper_call,
            map_token: token_regex(&catalog.map_types)?,
            attach_token: token_regex(&catalog.attach_types)?,
            prog_token: token_regex(&prog_names)?,
        })
    }

    fn captures<'t>(re: Option<&Regex>, text: &'t str) -> Vec<&'t str> {
        match re {
            Some(re) => re
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Every section label in `text`, call-form matches before
    /// attribute-form matches.
    pub fn section_labels<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut labels = Self::captures(Some(&self.sec_call), text);
        labels.extend(Self::captures(Some(&self.sec_attr), text));
        labels
    }

    /// Call-sites whose callee is a known helper (or matches the generic
    /// heuristic when the catalog has none).
    pub fn helper_calls<'t>(&self, text: &'t str) -> Vec<&'t str> {
        Self::captures(Some(&self.helper_call), text)
    }

    /// Word-bounded catalog map-type tokens anywhere in the text.
    pub fn map_tokens<'t>(&self, text: &'t str) -> Vec<&'t str> {
        Self::captures(self.map_token.as_ref(), text)
    }

    /// Word-bounded catalog attach-type tokens anywhere in the text.
    pub fn attach_tokens<'t>(&self, text: &'t str) -> Vec<&'t str> {
        Self::captures(self.attach_token.as_ref(), text)
    }

    /// Word-bounded kernel program-type identifiers anywhere in the text.
    pub fn program_type_tokens<'t>(&self, text: &'t str) -> Vec<&'t str> {
        Self::captures(self.prog_token.as_ref(), text)
    }
}
