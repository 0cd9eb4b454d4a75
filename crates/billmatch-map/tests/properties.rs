// Property-based tests for the similarity scorer, token overlap, and blocking.
// PROPTEST_CASES overrides the case count.

use std::collections::HashSet;

use proptest::prelude::*;

use billmatch_map::{MatchEngine, ScoreBreakdown, overlap, score, token_sort_ratio};
use billmatch_model::{MatchOptions, Record};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(128),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

/// Short name/address-like text, sometimes empty, with punctuation and case.
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => r"[A-Za-z0-9 .,#-]{0,24}",
        1 => Just(String::new()),
    ]
}

fn arb_record() -> impl Strategy<Value = Record> {
    (r"[A-C][a-c]{0,3}( [A-C][a-c]{0,3})?", r"[1-3] [A-C][a-c]{0,2} (St|Ave)").prop_map(
        |(name, address)| Record::derived(&name, &address, "", "", ""),
    )
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn identical_strings_score_100(s in arb_text()) {
        prop_assert_eq!(score(&s, &s), 100);
    }

    #[test]
    fn score_is_symmetric(a in arb_text(), b in arb_text()) {
        prop_assert_eq!(ScoreBreakdown::compute(&a, &b), ScoreBreakdown::compute(&b, &a));
    }

    #[test]
    fn score_stays_in_range(a in arb_text(), b in arb_text()) {
        let breakdown = ScoreBreakdown::compute(&a, &b);
        prop_assert!(breakdown.ratio <= 100);
        prop_assert!(breakdown.partial_ratio <= 100);
        prop_assert!(breakdown.token_sort_ratio <= 100);
        prop_assert!(breakdown.overall <= 100);
    }

    #[test]
    fn token_order_does_not_change_token_sort(words in prop::collection::vec("[a-z]{1,6}", 1..5)) {
        let forward = words.join(" ");
        let backward: Vec<String> = words.iter().rev().cloned().collect();
        prop_assert_eq!(token_sort_ratio(&forward, &backward.join(" ")), 100);
    }

    #[test]
    fn overlap_is_symmetric(a in arb_text(), b in arb_text()) {
        prop_assert_eq!(overlap(&a, &b), overlap(&b, &a));
    }

    #[test]
    fn self_overlap_counts_unique_tokens(a in arb_text()) {
        let unique: HashSet<&str> = a.split_whitespace().collect();
        prop_assert_eq!(overlap(&a, &a), unique.len());
    }

    #[test]
    fn blocking_never_raises_the_overall_score(
        database in prop::collection::vec(arb_record(), 1..6),
        query in arb_record(),
    ) {
        let full = MatchEngine::new(&database, MatchOptions::default().with_token_reduction(false));
        let blocked = MatchEngine::new(&database, MatchOptions::default());
        let unreduced = full.match_record(0, &query).unwrap().overall_score();
        let reduced = blocked.match_record(0, &query).unwrap().overall_score();
        prop_assert!(reduced <= unreduced, "{reduced:?} > {unreduced:?}");
    }
}
