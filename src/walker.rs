//! Candidate-file enumeration
//!
//! Depth-first walk over a repository root. Directories in the exclusion set
//! (version-control metadata, build output, dependency and cache trees) and
//! any hidden directory are pruned before descent; the root itself is never
//! pruned. Symlinks are not followed, so the walk cannot loop.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extensions scanned by default: C/C++/Go/Rust sources and headers plus
/// libbpf-generated skeleton files. Matched as case-insensitive suffixes of
/// the file name, so multi-dot entries like `.bpf.c` work.
pub const DEFAULT_INCLUDE_EXTS: &[&str] = &[
    ".c", ".h", ".bpf.c", ".bpf.h", ".ebpf.c", ".ebpf.h", ".cc", ".cpp", ".hpp", ".go", ".rs",
    ".skel.h", ".skel.c",
];

/// Directory names never descended into.
const EXCLUDE_DIRS: &[&str] = &[
    ".git",
    "build",
    "dist",
    "out",
    "node_modules",
    "vendor",
    "target",
    ".venv",
    ".mypy_cache",
    ".pytest_cache",
];

fn is_pruned_dir(entry: &DirEntry) -> bool {
    // depth 0 is the walk root; user-supplied roots are scanned whatever
    // their name
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || EXCLUDE_DIRS.contains(&name.as_ref())
}

fn has_included_ext(entry: &DirEntry, exts: &[String]) -> bool {
    let name = entry.file_name().to_string_lossy().to_lowercase();
    exts.iter().any(|ext| name.ends_with(ext.as_str()))
}

/// Lazily yields every file under `root` whose name ends with one of `exts`.
/// Each path is yielded at most once; unreadable directory entries are
/// skipped silently.
pub fn source_files<'a>(root: &Path, exts: &'a [String]) -> impl Iterator<Item = PathBuf> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_pruned_dir(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(move |entry| has_included_ext(entry, exts))
        .map(DirEntry::into_path)
}
