//! Command-line interface

use crate::{models::config::parse_positive_number, types::ExportFormat};
use clap::Parser;
use std::path::PathBuf;

/// Page Latency Probe - samples how long one page takes to load over a fixed window
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "plp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Page to sample (falls back to TARGET_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// Length of the run in minutes
    #[arg(short, long, value_name = "MIN", value_parser = parse_duration_minutes)]
    pub duration: Option<f64>,

    /// Expected response time in seconds
    #[arg(short = 'T', long, value_name = "SEC", value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Pause after every request in seconds
    #[arg(short, long, value_name = "SEC", value_parser = parse_pause)]
    pub pause: Option<f64>,

    /// Export file format
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Export path; generated from the URL and duration when omitted
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Do not write an export file
    #[arg(long, conflicts_with = "output")]
    pub no_export: bool,

    /// Omit elapsed seconds from live lines
    #[arg(long)]
    pub no_elapsed: bool,

    /// Skip the chart after the run
    #[arg(long)]
    pub no_chart: bool,

    /// Transport timeout for one request in seconds
    #[arg(short, long, value_name = "SEC", value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }
}

fn parse_duration_minutes(s: &str) -> Result<f64, String> {
    parse_positive_number("duration (minutes)", s).map_err(|e| e.to_string())
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    parse_positive_number("threshold (seconds)", s).map_err(|e| e.to_string())
}

fn parse_pause(s: &str) -> Result<f64, String> {
    parse_positive_number("pause (seconds)", s).map_err(|e| e.to_string())
}

/// Parse the transport timeout in whole seconds
fn parse_timeout(s: &str) -> Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid timeout: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid timeout: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Timeout must be greater than 0".to_string())
            } else if secs > 300 {
                Err("Timeout cannot exceed 300 seconds".to_string())
            } else {
                Ok(secs)
            }
        })
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}
