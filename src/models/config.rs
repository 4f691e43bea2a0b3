//! Configuration data model and validation

use crate::types::{AppError, ExportFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Immutable parameters of one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    duration_minutes: f64,
    threshold_seconds: f64,
    pause_seconds: f64,
    budget: Duration,
    pause: Duration,
}

impl RunConfig {
    /// Build a run configuration, rejecting non-finite, non-positive and
    /// unrepresentably large values
    pub fn new(duration_minutes: f64, threshold_seconds: f64, pause_seconds: f64) -> Result<Self> {
        check_positive("duration (minutes)", duration_minutes)?;
        check_positive("threshold (seconds)", threshold_seconds)?;
        check_positive("pause (seconds)", pause_seconds)?;

        let budget = to_duration("duration (minutes)", duration_minutes, duration_minutes * 60.0)?;
        let pause = to_duration("pause (seconds)", pause_seconds, pause_seconds)?;

        Ok(Self {
            duration_minutes,
            threshold_seconds,
            pause_seconds,
            budget,
            pause,
        })
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }

    pub fn threshold_seconds(&self) -> f64 {
        self.threshold_seconds
    }

    pub fn pause_seconds(&self) -> f64 {
        self.pause_seconds
    }

    /// Wall-clock budget of the run
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Fixed pause between two requests
    pub fn pause(&self) -> Duration {
        self.pause
    }
}

fn to_duration(name: &str, value: f64, seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| AppError::validation(format!("{} is too large, got {}", name, value)))
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!("{} must be a number, got {}", name, value)));
    }
    if value <= 0.0 {
        return Err(AppError::validation(format!("{} must be greater than 0, got {}", name, value)));
    }
    Ok(())
}

/// Parse a user supplied positive number (CLI flag or environment value)
pub fn parse_positive_number(name: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("{} must be a number, got '{}'", name, raw)))?;
    check_positive(name, value)?;
    Ok(value)
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Page under test
    #[serde(default)]
    pub target_url: Option<String>,

    /// Length of the run in minutes
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: f64,

    /// Expected response time in seconds
    #[serde(default = "default_threshold_seconds")]
    pub threshold_seconds: f64,

    /// Pause between requests in seconds
    #[serde(default = "default_pause_seconds")]
    pub pause_seconds: f64,

    /// Transport timeout for a single request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_seconds: u64,

    /// Export file format
    #[serde(default = "default_export_format")]
    pub export_format: ExportFormat,

    /// Explicit export path; generated from the URL when absent
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Write the export file after the run
    #[serde(default = "default_true")]
    pub export_enabled: bool,

    /// Show elapsed seconds on live lines
    #[serde(default = "default_true")]
    pub show_elapsed: bool,

    /// Render the terminal chart after the run
    #[serde(default = "default_true")]
    pub show_chart: bool,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: None,
            duration_minutes: default_duration_minutes(),
            threshold_seconds: default_threshold_seconds(),
            pause_seconds: default_pause_seconds(),
            request_timeout_seconds: default_request_timeout_secs(),
            export_format: default_export_format(),
            output_path: None,
            export_enabled: true,
            show_elapsed: true,
            show_chart: true,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// The validated run parameters
    pub fn run_config(&self) -> Result<RunConfig> {
        RunConfig::new(self.duration_minutes, self.threshold_seconds, self.pause_seconds)
    }

    /// The validated target URL
    pub fn target_url(&self) -> Result<&str> {
        let url = self
            .target_url
            .as_deref()
            .ok_or_else(|| AppError::config("No target URL given; use --url or set TARGET_URL"))?;

        if url.is_empty() {
            return Err(AppError::config("Target URL cannot be empty"));
        }

        let parsed = url::Url::parse(url)
            .map_err(|e| AppError::config(format!("Invalid target URL '{}': {}", url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::config(format!("Target URL must use http or https: {}", url)));
        }

        Ok(url)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        self.target_url()?;
        self.run_config()?;

        if self.request_timeout_seconds == 0 {
            return Err(AppError::config("Request timeout must be greater than 0"));
        }

        if self.request_timeout_seconds > 300 {
            return Err(AppError::config("Request timeout cannot exceed 300 seconds"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("TARGET_URL") {
            let url = url.trim().to_string();
            if !url.is_empty() {
                self.target_url = Some(url);
            }
        }

        if let Ok(duration) = std::env::var("DURATION_MINUTES") {
            self.duration_minutes = parse_positive_number("DURATION_MINUTES", &duration)
                .map_err(|e| AppError::config(e.to_string()))?;
        }

        if let Ok(threshold) = std::env::var("THRESHOLD_SECONDS") {
            self.threshold_seconds = parse_positive_number("THRESHOLD_SECONDS", &threshold)
                .map_err(|e| AppError::config(e.to_string()))?;
        }

        if let Ok(pause) = std::env::var("PAUSE_SECONDS") {
            self.pause_seconds = parse_positive_number("PAUSE_SECONDS", &pause)
                .map_err(|e| AppError::config(e.to_string()))?;
        }

        if let Ok(timeout) = std::env::var("REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid REQUEST_TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Ok(format) = std::env::var("EXPORT_FORMAT") {
            self.export_format = format.parse()
                .map_err(|e: AppError| AppError::config(format!("Invalid EXPORT_FORMAT value: {}", e)))?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_duration_minutes() -> f64 {
    crate::defaults::DEFAULT_DURATION_MINUTES
}

fn default_threshold_seconds() -> f64 {
    crate::defaults::DEFAULT_THRESHOLD_SECONDS
}

fn default_pause_seconds() -> f64 {
    crate::defaults::DEFAULT_PAUSE_SECONDS
}

fn default_request_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_export_format() -> ExportFormat {
    ExportFormat::Csv
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

fn default_true() -> bool {
    true
}
