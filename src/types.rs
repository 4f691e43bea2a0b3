//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Latency tier relative to the configured threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Below the threshold
    Nominal,
    /// At or above the threshold, below twice the threshold
    Degraded,
    /// At or above twice the threshold
    Severe,
}

impl Classification {
    /// Classify one latency value against the threshold, both in seconds
    pub fn classify(latency_seconds: f64, threshold_seconds: f64) -> Self {
        if latency_seconds < threshold_seconds {
            Self::Nominal
        } else if latency_seconds < threshold_seconds * 2.0 {
            Self::Degraded
        } else {
            Self::Severe
        }
    }

    /// Terminal color used for live display
    pub fn color(&self) -> colored::Color {
        match self {
            Self::Nominal => colored::Color::Green,
            Self::Degraded => colored::Color::Yellow,
            Self::Severe => colored::Color::Red,
        }
    }

    /// Get descriptive text
    pub fn description(&self) -> &'static str {
        match self {
            Self::Nominal => "nominal",
            Self::Degraded => "degraded",
            Self::Severe => "severe",
        }
    }
}

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Created, sampler not started
    Idle,
    /// Sampler loop in progress
    Running,
    /// Duration budget exhausted
    Completed,
    /// Stopped early by a shutdown signal; the partial series is kept
    Interrupted,
}

impl RunState {
    /// Whether the run has stopped sampling for good
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Interrupted)
    }
}

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `Timestamp,Load Time (Seconds)` table
    Csv,
    /// Bordered block of `timestamp<TAB>latency seconds` lines
    Text,
}

impl ExportFormat {
    /// File extension used for generated export names
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "text" | "txt" => Ok(Self::Text),
            other => Err(AppError::parse(format!("Unknown export format: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(Classification::classify(4.99, 5.0), Classification::Nominal);
        assert_eq!(Classification::classify(5.00, 5.0), Classification::Degraded);
        assert_eq!(Classification::classify(9.99, 5.0), Classification::Degraded);
        assert_eq!(Classification::classify(10.0, 5.0), Classification::Severe);
        assert_eq!(Classification::classify(42.0, 5.0), Classification::Severe);
    }

    #[test]
    fn test_classification_zero_latency() {
        assert_eq!(Classification::classify(0.0, 0.5), Classification::Nominal);
    }

    #[test]
    fn test_run_state_finished() {
        assert!(!RunState::Idle.is_finished());
        assert!(!RunState::Running.is_finished());
        assert!(RunState::Completed.is_finished());
        assert!(RunState::Interrupted.is_finished());
    }

    #[test]
    fn test_export_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!("xml".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Text.extension(), "txt");
    }
}
