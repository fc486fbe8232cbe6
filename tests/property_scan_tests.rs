//! Property-based tests for the scan pipeline: count conservation, merge
//! commutativity, and attach-point derivation over generated inputs.

use proptest::prelude::*;
use std::collections::HashSet;

use bpfscan::catalog::{FeatureCatalog, ProgramTypeEntry};
use bpfscan::infer;
use bpfscan::matchers::Matchers;
use bpfscan::scan::{scan_text, ScanReport};

fn label_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9_]{0,7}", 1..4)
}

fn scan_with(catalog: &FeatureCatalog, text: &str) -> ScanReport {
    let matchers = Matchers::from_catalog(catalog).unwrap();
    let mut report = ScanReport::default();
    scan_text(text, &matchers, catalog, &mut report);
    report
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_attach_point_is_last_segment(segments in label_strategy()) {
        let label = segments.join("/");
        prop_assert_eq!(infer::attach_point(&label), segments.last().unwrap().as_str());
    }

    #[test]
    fn prop_prefix_candidates_shape(segments in label_strategy()) {
        let label = segments.join("/");
        let (first, first_two) = infer::prefix_candidates(&label);
        prop_assert_eq!(first, segments[0].as_str());
        match first_two {
            Some(ft) => {
                prop_assert!(segments.len() >= 2);
                prop_assert_eq!(ft, format!("{}/{}", segments[0], segments[1]));
            }
            None => prop_assert_eq!(segments.len(), 1),
        }
    }

    #[test]
    fn prop_sec_counts_conserved(labels in prop::collection::vec(label_strategy(), 0..10)) {
        // One SEC() per generated label; every match must land in sec_full
        // and contribute exactly one attach point.
        let text: String = labels
            .iter()
            .map(|segs| format!("SEC(\"{}\")\n", segs.join("/")))
            .collect();

        let report = scan_with(&FeatureCatalog::default(), &text);
        let sec_total: u64 = report.sec_full.values().sum();
        let attach_total: u64 = report.attach_types.values().sum();
        prop_assert_eq!(sec_total, labels.len() as u64);
        prop_assert_eq!(attach_total, labels.len() as u64);
    }

    #[test]
    fn prop_inferred_never_exceeds_labels(labels in prop::collection::vec(label_strategy(), 0..10)) {
        // At most one inferred type per label occurrence.
        let catalog = FeatureCatalog {
            program_types: vec![ProgramTypeEntry {
                name: "BPF_PROG_TYPE_KPROBE".to_string(),
                literals: ["kprobe", "kretprobe"].iter().map(|l| l.to_string()).collect(),
            }],
            map_types: HashSet::new(),
            attach_types: HashSet::new(),
            helpers: HashSet::new(),
        };
        let text: String = labels
            .iter()
            .map(|segs| format!("SEC(\"{}\")\n", segs.join("/")))
            .collect();

        let report = scan_with(&catalog, &text);
        let inferred: u64 = report.program_types_inferred.values().sum();
        let sec_total: u64 = report.sec_full.values().sum();
        prop_assert!(inferred <= sec_total);
    }

    #[test]
    fn prop_merge_commutative(
        a in prop::collection::vec(label_strategy(), 0..8),
        b in prop::collection::vec(label_strategy(), 0..8),
    ) {
        let catalog = FeatureCatalog::default();
        let text_of = |labels: &[Vec<String>]| -> String {
            labels
                .iter()
                .map(|segs| format!("SEC(\"{}\")\n", segs.join("/")))
                .collect()
        };
        let ra = scan_with(&catalog, &text_of(&a));
        let rb = scan_with(&catalog, &text_of(&b));

        let mut ab = ra.clone();
        ab.merge(&rb);
        let mut ba = rb;
        ba.merge(&ra);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn prop_merge_matches_single_pass(
        a in prop::collection::vec(label_strategy(), 0..8),
        b in prop::collection::vec(label_strategy(), 0..8),
    ) {
        // Scanning two texts separately and merging equals scanning the
        // concatenation: file visitation order cannot matter.
        let catalog = FeatureCatalog::default();
        let text_of = |labels: &[Vec<String>]| -> String {
            labels
                .iter()
                .map(|segs| format!("SEC(\"{}\")\n", segs.join("/")))
                .collect()
        };
        let ta = text_of(&a);
        let tb = text_of(&b);

        let mut merged = scan_with(&catalog, &ta);
        merged.merge(&scan_with(&catalog, &tb));

        let single = scan_with(&catalog, &format!("{ta}{tb}"));
        prop_assert_eq!(merged, single);
    }
}
