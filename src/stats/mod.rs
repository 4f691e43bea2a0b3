//! Descriptive statistics over a latency series

use crate::{
    error::{AppError, Result},
    models::Sample,
};
use serde::{Deserialize, Serialize};

/// Summary of one run, recomputed on demand from the series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Samples whose latency is strictly above the threshold
    pub count_exceeding_threshold: usize,
    pub mean: f64,
    /// Upper median: index `n / 2` of the ascending sort
    pub median: f64,
    pub max: f64,
    pub min: f64,
    /// Number of samples the summary was computed from
    pub sample_count: usize,
}

impl SeriesStats {
    /// Compute statistics for a series of samples
    pub fn compute(samples: &[Sample], threshold_seconds: f64) -> Result<Self> {
        let latencies: Vec<f64> = samples.iter().map(Sample::latency_seconds).collect();
        Self::from_latencies(&latencies, threshold_seconds)
    }

    /// Compute statistics for raw latency values in seconds
    pub fn from_latencies(latencies: &[f64], threshold_seconds: f64) -> Result<Self> {
        if latencies.is_empty() {
            return Err(AppError::no_data("the series contains no samples"));
        }

        let mut sorted = latencies.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;

        Ok(Self {
            count_exceeding_threshold: latencies.iter().filter(|&&l| l > threshold_seconds).count(),
            mean,
            median: sorted[count / 2],
            max: sorted[count - 1],
            min: sorted[0],
            sample_count: count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_upper_median_for_even_length() {
        let stats = SeriesStats::from_latencies(&[1.0, 3.0, 2.0, 4.0], 10.0).unwrap();
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_median_for_odd_length() {
        let stats = SeriesStats::from_latencies(&[5.0, 1.0, 3.0], 10.0).unwrap();
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_basic_statistics() {
        let stats = SeriesStats::from_latencies(&[0.5, 1.5, 2.5, 3.5], 2.0).unwrap();
        assert_eq!(stats.count_exceeding_threshold, 2);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.min, 0.5);
        assert_eq!(stats.max, 3.5);
        assert_eq!(stats.sample_count, 4);
    }

    #[test]
    fn test_exceeding_is_strict() {
        let stats = SeriesStats::from_latencies(&[1.0, 2.0, 2.0, 3.0], 2.0).unwrap();
        assert_eq!(stats.count_exceeding_threshold, 1);
    }

    #[test]
    fn test_exceeding_extreme_thresholds() {
        let values = [0.2, 0.4, 0.9];
        assert_eq!(SeriesStats::from_latencies(&values, 0.0).unwrap().count_exceeding_threshold, 3);
        assert_eq!(SeriesStats::from_latencies(&values, 100.0).unwrap().count_exceeding_threshold, 0);
    }

    #[test]
    fn test_empty_series_reports_no_data() {
        let result = SeriesStats::compute(&[], 1.0);
        assert!(matches!(result, Err(AppError::NoData(_))));
    }

    #[test]
    fn test_compute_from_samples() {
        let now = Utc::now();
        let samples = vec![Sample::new(now, 0.3), Sample::new(now, 0.7)];
        let stats = SeriesStats::compute(&samples, 0.5).unwrap();
        assert_eq!(stats.count_exceeding_threshold, 1);
        assert_eq!(stats.median, 0.7);
        assert!((stats.mean - 0.5).abs() < 1e-12);
    }
}

// Property tests in separate module
#[cfg(test)]
mod comprehensive_tests;
