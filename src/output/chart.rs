//! Horizontal bar chart of a latency series for the terminal

use crate::{models::Sample, types::Classification};
use colored::Colorize;

/// Renders one bar per sample, or per bucket of samples when the series is long
#[derive(Debug, Clone)]
pub struct TextChart {
    /// Width of the longest bar
    pub width: usize,
    /// Rows before neighbouring samples are merged (a bucket shows its maximum)
    pub max_rows: usize,
    pub enable_color: bool,
}

impl Default for TextChart {
    fn default() -> Self {
        Self {
            width: 50,
            max_rows: 40,
            enable_color: false,
        }
    }
}

struct Row {
    offset_seconds: i64,
    latency: f64,
}

impl TextChart {
    pub fn new(enable_color: bool) -> Self {
        Self {
            enable_color,
            ..Self::default()
        }
    }

    /// Empty string for an empty series
    pub fn render(&self, samples: &[Sample], threshold_seconds: f64) -> String {
        let Some(first) = samples.first() else {
            return String::new();
        };
        let width = self.width.max(1);

        let rows = self.rows(samples, first);
        let peak = rows.iter().map(|r| r.latency).fold(threshold_seconds, f64::max);
        let scale = |value: f64| ((value / peak) * width as f64).round() as usize;
        let marker = scale(threshold_seconds).min(width);

        let mut out = format!(
            "Load Time (seconds), '|' marks the expected response time ({:.2}s)\n",
            threshold_seconds
        );
        for row in &rows {
            let filled = scale(row.latency).min(width);
            let mut bar = String::with_capacity(width + 1);
            for column in 0..=width {
                bar.push(if column < filled {
                    '#'
                } else if column == marker {
                    '|'
                } else {
                    ' '
                });
            }

            let bar = if self.enable_color {
                bar.color(Classification::classify(row.latency, threshold_seconds).color()).to_string()
            } else {
                bar
            };
            out.push_str(&format!("{:>6}s {} {:.2}\n", row.offset_seconds, bar, row.latency));
        }
        out
    }

    fn rows(&self, samples: &[Sample], first: &Sample) -> Vec<Row> {
        let bucket = samples.len().div_ceil(self.max_rows.max(1));
        samples
            .chunks(bucket)
            .map(|chunk| Row {
                offset_seconds: (chunk[0].timestamp() - first.timestamp()).num_seconds(),
                latency: chunk.iter().map(Sample::latency_seconds).fold(f64::MIN, f64::max),
            })
            .collect()
    }
}
