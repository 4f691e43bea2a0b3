//! Core formatting trait and the plain text implementation

use crate::{
    error::Result,
    models::RunConfig,
    sampler::LiveUpdate,
    stats::SeriesStats,
    types::RunState,
};
use std::path::Path;

/// Main trait for output formatting
pub trait OutputFormatter: Send {
    /// Bordered box describing the run about to start
    fn format_banner(&self, url: &str, config: &RunConfig) -> Result<String>;

    /// One line per recorded sample
    fn format_live_update(&self, update: &LiveUpdate) -> Result<String>;

    /// Statistics block with the threshold it was computed against
    fn format_statistics(&self, stats: &SeriesStats, threshold_seconds: f64) -> Result<String>;

    /// Shown instead of statistics when the series is empty
    fn format_no_data(&self, url: &str) -> Result<String>;

    /// End-of-run message
    fn format_completion(&self, state: RunState, samples: usize, failures: usize) -> Result<String>;

    /// Where the export went
    fn format_export_saved(&self, path: &Path) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    pub enable_color: bool,
    /// Include elapsed seconds on live lines
    pub show_elapsed: bool,
    pub verbose_mode: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            show_elapsed: true,
            verbose_mode: false,
        }
    }
}

/// Lines of the run banner, shared by both formatters
pub(crate) fn banner_lines(url: &str, config: &RunConfig) -> Vec<String> {
    vec![
        format!("Target URL {}", url),
        format!("Duration (minutes) {}", config.duration_minutes()),
        format!("Expected response time (seconds) {}", config.threshold_seconds()),
        format!("Pause between requests (seconds) {}", config.pause_seconds()),
    ]
}

/// Draw `lines` inside a box of `border` characters
pub(crate) fn boxed(lines: &[String], border: char) -> String {
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let edge: String = std::iter::repeat(border).take(inner + 4).collect();

    let mut out = String::new();
    out.push_str(&edge);
    out.push('\n');
    for line in lines {
        let pad = inner - line.chars().count();
        out.push_str(&format!("{} {}{} {}\n", border, line, " ".repeat(pad), border));
    }
    out.push_str(&edge);
    out
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    pub(crate) fn live_prefix(&self, update: &LiveUpdate) -> String {
        if self.options.show_elapsed {
            format!(
                "Request #{} - {} seconds elapsed",
                update.request_number,
                update.elapsed_seconds.floor() as u64
            )
        } else {
            format!("Request #{}", update.request_number)
        }
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_banner(&self, url: &str, config: &RunConfig) -> Result<String> {
        Ok(boxed(&banner_lines(url, config), '*'))
    }

    fn format_live_update(&self, update: &LiveUpdate) -> Result<String> {
        Ok(format!(
            "{} | Load Time: {:.2} seconds ({})",
            self.live_prefix(update),
            update.latency_seconds,
            update.classification.description()
        ))
    }

    fn format_statistics(&self, stats: &SeriesStats, threshold_seconds: f64) -> Result<String> {
        let mut out = String::from("Statistics:\n");
        out.push_str(&format!(
            "Counts Exceeding Expected Response Time ({:.2} seconds): {}\n",
            threshold_seconds, stats.count_exceeding_threshold
        ));
        out.push_str(&format!("Mean: {:.2} seconds\n", stats.mean));
        out.push_str(&format!("Median: {:.2} seconds\n", stats.median));
        out.push_str(&format!("Max: {:.2} seconds\n", stats.max));
        out.push_str(&format!("Min: {:.2} seconds", stats.min));
        if self.options.verbose_mode {
            out.push_str(&format!("\nSamples: {}", stats.sample_count));
        }
        Ok(out)
    }

    fn format_no_data(&self, url: &str) -> Result<String> {
        Ok(format!("{}\n\nTarget URL: {}", boxed(&["No data collected.".to_string()], '!'), url))
    }

    fn format_completion(&self, state: RunState, samples: usize, failures: usize) -> Result<String> {
        let headline = match state {
            RunState::Interrupted => "Interrupted! Saving current data...",
            _ => "Data collection completed.",
        };
        let mut out = format!("{} {} sample(s) recorded", headline, samples);
        if failures > 0 {
            out.push_str(&format!(", {} failed request(s) dropped", failures));
        }
        out.push('.');
        Ok(out)
    }

    fn format_export_saved(&self, path: &Path) -> Result<String> {
        Ok(format!("Data saved to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Classification;

    fn formatter(show_elapsed: bool) -> PlainFormatter {
        PlainFormatter::new(FormattingOptions {
            enable_color: false,
            show_elapsed,
            verbose_mode: false,
        })
    }

    fn update() -> LiveUpdate {
        LiveUpdate {
            request_number: 3,
            elapsed_seconds: 12.9,
            latency_seconds: 0.5249,
            classification: Classification::Nominal,
        }
    }

    #[test]
    fn test_live_line_with_elapsed() {
        let line = formatter(true).format_live_update(&update()).unwrap();
        assert_eq!(line, "Request #3 - 12 seconds elapsed | Load Time: 0.52 seconds (nominal)");
    }

    #[test]
    fn test_live_line_without_elapsed() {
        let line = formatter(false).format_live_update(&update()).unwrap();
        assert_eq!(line, "Request #3 | Load Time: 0.52 seconds (nominal)");
    }

    #[test]
    fn test_statistics_two_decimals() {
        let stats = SeriesStats::from_latencies(&[1.0, 3.0, 2.0, 4.0], 2.5).unwrap();
        let block = formatter(true).format_statistics(&stats, 2.5).unwrap();
        assert!(block.contains("Counts Exceeding Expected Response Time (2.50 seconds): 2"));
        assert!(block.contains("Mean: 2.50 seconds"));
        assert!(block.contains("Median: 3.00 seconds"));
        assert!(block.contains("Max: 4.00 seconds"));
        assert!(block.contains("Min: 1.00 seconds"));
    }

    #[test]
    fn test_banner_is_boxed() {
        let config = RunConfig::new(5.0, 2.0, 1.0).unwrap();
        let banner = formatter(true).format_banner("https://example.com", &config).unwrap();
        let lines: Vec<&str> = banner.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].chars().all(|c| c == '*'));
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
        assert!(banner.contains("Target URL https://example.com"));
    }

    #[test]
    fn test_completion_messages() {
        let plain = formatter(true);
        assert_eq!(
            plain.format_completion(RunState::Completed, 4, 0).unwrap(),
            "Data collection completed. 4 sample(s) recorded."
        );
        let interrupted = plain.format_completion(RunState::Interrupted, 2, 1).unwrap();
        assert!(interrupted.starts_with("Interrupted!"));
        assert!(interrupted.contains("1 failed request(s) dropped"));
    }

    #[test]
    fn test_no_data_block() {
        let block = formatter(true).format_no_data("https://example.com").unwrap();
        assert!(block.contains("! No data collected. !"));
    }
}
