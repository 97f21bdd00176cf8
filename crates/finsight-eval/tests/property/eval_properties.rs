//! Property tests for the context-recall heuristic.

use finsight_eval::context_recall;
use proptest::prelude::*;

proptest! {
    #[test]
    fn recall_is_always_in_unit_interval(
        scores in proptest::collection::vec(-1.0f32..=1.0, 0..50),
        threshold in 0.0f32..=1.0,
    ) {
        let recall = context_recall(&scores, threshold);
        prop_assert!((0.0..=1.0).contains(&recall));
    }

    #[test]
    fn recall_is_monotone_in_threshold(
        scores in proptest::collection::vec(-1.0f32..=1.0, 1..50),
        lo in 0.0f32..=1.0,
        hi in 0.0f32..=1.0,
    ) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        // A stricter threshold can only lower recall.
        prop_assert!(context_recall(&scores, hi) <= context_recall(&scores, lo));
    }

    #[test]
    fn threshold_above_every_score_gives_zero_recall(
        scores in proptest::collection::vec(-1.0f32..0.99f32, 1..50),
    ) {
        prop_assert_eq!(context_recall(&scores, 1.0), 0.0);
    }

    #[test]
    fn zero_threshold_counts_all_nonnegative(
        scores in proptest::collection::vec(0.0f32..=1.0, 1..50),
    ) {
        prop_assert_eq!(context_recall(&scores, 0.0), 1.0);
    }
}
