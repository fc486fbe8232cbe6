//! Ground-truth catalog loading
//!
//! The catalog document is a JSON array of named sections, each carrying a
//! `features` list. Four section names are recognized: `program_types`
//! (features map a kernel program-type identifier to a list of section-label
//! literals) and the flat sets `map_types`, `attach_types`, `helpers`.
//! Anything else in the document is ignored, so it can carry extra metadata
//! (version history, documentation links) without affecting a scan.
//!
//! The loaded [`FeatureCatalog`] is a frozen snapshot: every matcher used by
//! a scan is derived from it once, and it is never mutated afterwards.

use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Conventional catalog location, resolved by walking upward from the scan
/// root toward the filesystem root.
pub const DEFAULT_CATALOG_RELPATH: &str = "data/feature-catalog.json";

/// Errors raised while loading the ground-truth catalog
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read catalog document {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed catalog document {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("cannot compile catalog-derived pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// One program-type entry: the kernel identifier plus the section-label
/// literals that identify it in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramTypeEntry {
    pub name: String,
    pub literals: HashSet<String>,
}

/// Frozen ground-truth snapshot a scan runs against
#[derive(Debug, Clone, Default)]
pub struct FeatureCatalog {
    /// Kernel program types in document order. The order is load-bearing:
    /// it is the tie-break when a section label matches literals of more
    /// than one program type.
    pub program_types: Vec<ProgramTypeEntry>,
    pub map_types: HashSet<String>,
    pub attach_types: HashSet<String>,
    pub helpers: HashSet<String>,
}

impl FeatureCatalog {
    /// Load a catalog from a document on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    /// Parse a catalog from JSON text. `path` is only used in error messages.
    pub fn from_json(text: &str, path: &Path) -> Result<Self> {
        let sections: Vec<Value> =
            serde_json::from_str(text).map_err(|err| ConfigError::Malformed {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        let mut catalog = Self::default();
        for section in &sections {
            if !section.is_object() {
                return Err(ConfigError::Malformed {
                    path: path.to_path_buf(),
                    reason: "expected a sequence of section objects".to_owned(),
                });
            }
            let name = section.get("name").and_then(Value::as_str);
            let Some(features) = section.get("features").and_then(Value::as_array) else {
                continue;
            };

            match name {
                Some("program_types") => {
                    for feature in features {
                        catalog.add_program_type(feature);
                    }
                }
                Some("map_types") => Self::collect_names(features, &mut catalog.map_types),
                Some("attach_types") => Self::collect_names(features, &mut catalog.attach_types),
                Some("helpers") => Self::collect_names(features, &mut catalog.helpers),
                _ => {}
            }
        }
        Ok(catalog)
    }

    fn add_program_type(&mut self, feature: &Value) {
        let Some(kernel_type) = feature.get("name").and_then(Value::as_str) else {
            return;
        };
        // A `literals` value of the wrong shape skips the entry; a missing
        // one registers the key with an empty set.
        let literals: HashSet<String> = match feature.get("literals") {
            None | Some(Value::Null) => HashSet::new(),
            Some(Value::Array(list)) => list
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            Some(_) => return,
        };

        match self
            .program_types
            .iter_mut()
            .find(|entry| entry.name == kernel_type)
        {
            Some(entry) => entry.literals.extend(literals),
            None => self.program_types.push(ProgramTypeEntry {
                name: kernel_type.to_owned(),
                literals,
            }),
        }
    }

    fn collect_names(features: &[Value], set: &mut HashSet<String>) {
        for feature in features {
            if let Some(name) = feature.get("name").and_then(Value::as_str) {
                set.insert(name.to_owned());
            }
        }
    }

    /// Kernel program-type identifiers (the mapping keys, not the literals).
    pub fn program_type_names(&self) -> impl Iterator<Item = &str> {
        self.program_types.iter().map(|entry| entry.name.as_str())
    }
}

/// Walk upward from `start` looking for the conventional catalog path.
pub fn discover_catalog(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?.to_path_buf()
    } else {
        start.to_path_buf()
    };
    loop {
        let candidate = dir.join(DEFAULT_CATALOG_RELPATH);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "discovered catalog");
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}
