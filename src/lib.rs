//! bpfscan - static eBPF feature-usage scanner for source trees
//!
//! This library walks a repository, recognizes textual markers of eBPF
//! primitives (map types, helper-function calls, attach points, program
//! types), and tallies their occurrence against a ground-truth catalog of
//! known names. Matching is best-effort and purely textual: there is no
//! parsing or compilation, and occurrences inside comments and strings are
//! counted like any other.

pub mod catalog;
pub mod cli;
pub mod infer;
pub mod matchers;
pub mod report;
pub mod scan;
pub mod walker;
