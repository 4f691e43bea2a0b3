//! Colored formatter implementation with terminal color support

use super::formatter::{banner_lines, boxed, FormattingOptions, OutputFormatter, PlainFormatter};
use crate::{
    error::Result,
    models::RunConfig,
    sampler::LiveUpdate,
    stats::SeriesStats,
    types::RunState,
};
use colored::*;
use std::path::Path;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    plain_formatter: PlainFormatter,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self::with_color_scheme(options, ColorScheme::default())
    }

    pub fn with_color_scheme(options: FormattingOptions, color_scheme: ColorScheme) -> Self {
        Self {
            plain_formatter: PlainFormatter::new(options),
            color_scheme,
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_banner(&self, url: &str, config: &RunConfig) -> Result<String> {
        let banner = boxed(&banner_lines(url, config), '*');
        Ok(banner.color(self.color_scheme.header).to_string())
    }

    fn format_live_update(&self, update: &LiveUpdate) -> Result<String> {
        let prefix = self.plain_formatter.live_prefix(update);
        let latency = format!("{:.2} seconds", update.latency_seconds).color(update.classification.color());
        Ok(format!("{} | Load Time: {}", prefix.bold(), latency))
    }

    fn format_statistics(&self, stats: &SeriesStats, threshold_seconds: f64) -> Result<String> {
        let exceeding_color = if stats.count_exceeding_threshold > 0 {
            self.color_scheme.error
        } else {
            self.color_scheme.success
        };

        let mut out = format!("{}\n", "Statistics:".color(self.color_scheme.header).bold());
        out.push_str(&format!(
            "Counts Exceeding Expected Response Time ({:.2} seconds): {}\n",
            threshold_seconds,
            stats.count_exceeding_threshold.to_string().color(exceeding_color).bold()
        ));
        out.push_str(&format!("{} {:.2} seconds\n", "Mean:".bold(), stats.mean));
        out.push_str(&format!("{} {:.2} seconds\n", "Median:".bold(), stats.median));
        out.push_str(&format!("{} {:.2} seconds\n", "Max:".bold(), stats.max));
        out.push_str(&format!("{} {:.2} seconds", "Min:".bold(), stats.min));
        Ok(out)
    }

    fn format_no_data(&self, url: &str) -> Result<String> {
        let block = boxed(&["No data collected.".to_string()], '!');
        Ok(format!("{}\n\nTarget URL: {}", block.color(self.color_scheme.warning).bold(), url))
    }

    fn format_completion(&self, state: RunState, samples: usize, failures: usize) -> Result<String> {
        let message = self.plain_formatter.format_completion(state, samples, failures)?;
        let color = match state {
            RunState::Interrupted => self.color_scheme.warning,
            _ => self.color_scheme.success,
        };
        Ok(message.color(color).to_string())
    }

    fn format_export_saved(&self, path: &Path) -> Result<String> {
        Ok(format!(
            "{} {}",
            "Data saved to".color(self.color_scheme.muted),
            path.display().to_string().bold()
        ))
    }
}
