//! Property-based tests for the series statistics
//!
//! Ordering and counting properties that must hold for any non-empty
//! latency series.

use super::SeriesStats;
use crate::error::AppError;
use proptest::collection::vec;
use proptest::prelude::*;

/// Property-based test generators
mod generators {
    use super::*;

    /// Latencies in seconds, millisecond-ish up to a few minutes
    pub fn latencies() -> impl Strategy<Value = f64> {
        0.001f64..300.0
    }

    pub fn latency_vectors() -> impl Strategy<Value = Vec<f64>> {
        vec(latencies(), 1..500)
    }
}

mod property_tests {
    use super::*;

    proptest! {
        #[test]
        fn median_between_min_and_max(values in generators::latency_vectors(), threshold in 0.0f64..300.0) {
            let stats = SeriesStats::from_latencies(&values, threshold).unwrap();
            prop_assert!(stats.min <= stats.median);
            prop_assert!(stats.median <= stats.max);
        }

        #[test]
        fn mean_between_min_and_max(values in generators::latency_vectors()) {
            let stats = SeriesStats::from_latencies(&values, 1.0).unwrap();
            // Summation rounding can push the mean a hair past an extreme when all values are equal
            let tolerance = stats.max * 1e-12;
            prop_assert!(stats.mean >= stats.min - tolerance);
            prop_assert!(stats.mean <= stats.max + tolerance);
            prop_assert!(!stats.mean.is_nan());
        }

        #[test]
        fn exceeding_count_matches_filter(values in generators::latency_vectors(), threshold in 0.0f64..400.0) {
            let stats = SeriesStats::from_latencies(&values, threshold).unwrap();
            let expected = values.iter().filter(|&&v| v > threshold).count();
            prop_assert_eq!(stats.count_exceeding_threshold, expected);
            prop_assert!(stats.count_exceeding_threshold <= stats.sample_count);
        }

        #[test]
        fn median_is_upper_middle_element(values in generators::latency_vectors()) {
            let stats = SeriesStats::from_latencies(&values, 1.0).unwrap();
            let mut sorted = values.clone();
            sorted.sort_by(|a, b| a.total_cmp(b));
            prop_assert_eq!(stats.median, sorted[sorted.len() / 2]);
        }

        #[test]
        fn statistics_ignore_input_order(mut values in generators::latency_vectors()) {
            let original = SeriesStats::from_latencies(&values, 1.0).unwrap();
            values.reverse();
            let reversed = SeriesStats::from_latencies(&values, 1.0).unwrap();
            prop_assert_eq!(original.median, reversed.median);
            prop_assert_eq!(original.min, reversed.min);
            prop_assert_eq!(original.max, reversed.max);
            prop_assert_eq!(original.count_exceeding_threshold, reversed.count_exceeding_threshold);
        }
    }
}

mod edge_case_tests {
    use super::*;

    #[test]
    fn single_sample_is_every_statistic() {
        let stats = SeriesStats::from_latencies(&[0.42], 0.5).unwrap();
        assert_eq!(stats.min, 0.42);
        assert_eq!(stats.max, 0.42);
        assert_eq!(stats.mean, 0.42);
        assert_eq!(stats.median, 0.42);
        assert_eq!(stats.count_exceeding_threshold, 0);
    }

    #[test]
    fn two_samples_use_upper_median() {
        let stats = SeriesStats::from_latencies(&[2.0, 1.0], 0.5).unwrap();
        assert_eq!(stats.median, 2.0);
    }

    #[test]
    fn empty_input_never_yields_nan() {
        match SeriesStats::from_latencies(&[], 1.0) {
            Err(AppError::NoData(message)) => assert!(message.contains("no samples")),
            other => panic!("expected NoData, got {:?}", other),
        }
    }
}
