//! Property-based tests for ranking, deduplication and dialect detection.

use proptest::prelude::*;
use sbom_digest::aggregate::{count_occurrences, dedup_rows, distinct_sample, top_n};
use sbom_digest::parsers::detect_dialect_str;
use std::collections::HashSet;

fn label() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["MIT", "Apache-2.0", "BSD-3-Clause", "Zlib", "Unknown License"])
        .prop_map(str::to_string)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn top_n_is_sorted_and_bounded(values in prop::collection::vec(label(), 0..60), n in 1usize..8) {
        let ranked = top_n(&values, n);
        prop_assert!(ranked.len() <= n);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn top_n_counts_match_occurrences(values in prop::collection::vec(label(), 0..60)) {
        let counts = count_occurrences(&values);
        let ranked = top_n(&values, usize::MAX);
        prop_assert_eq!(ranked.len(), counts.len());
        prop_assert_eq!(ranked.iter().map(|e| e.count).sum::<usize>(), values.len());
        for entry in &ranked {
            prop_assert_eq!(counts.get(&entry.value).copied(), Some(entry.count));
        }
    }

    #[test]
    fn ties_keep_first_seen_order(values in prop::collection::vec(label(), 0..60)) {
        let occurrences = count_occurrences(&values);
        let first_seen: Vec<&String> = occurrences
            .keys()
            .collect::<Vec<_>>();
        let ranked = top_n(&values, usize::MAX);
        for pair in ranked.windows(2) {
            if pair[0].count == pair[1].count {
                let a = first_seen.iter().position(|v| **v == pair[0].value);
                let b = first_seen.iter().position(|v| **v == pair[1].value);
                prop_assert!(a < b);
            }
        }
    }

    #[test]
    fn dedup_is_idempotent(values in prop::collection::vec(label(), 0..60)) {
        let once = dedup_rows(values.clone(), usize::MAX);
        let twice = dedup_rows(once.clone(), usize::MAX);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.len(), count_occurrences(&values).len());
    }

    #[test]
    fn distinct_sample_is_bounded(values in prop::collection::vec(label(), 0..60), n in 0usize..6) {
        let sample = distinct_sample(&values, n);
        prop_assert!(sample.len() <= n);
        let unique: HashSet<&String> = sample.iter().collect();
        prop_assert_eq!(unique.len(), sample.len());
    }

    #[test]
    fn detect_dialect_str_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = detect_dialect_str(&s);
    }

    #[test]
    fn detect_dialect_on_json_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"\{[^\}]{0,500}\}"#).unwrap()
    ) {
        let _ = detect_dialect_str(&s);
    }
}
