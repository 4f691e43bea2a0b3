//! Configuration validation utilities and rules

use crate::{
    error::{AppError, Result},
    models::Config,
};
use colored::*;

/// Configuration validator with advisory rules on top of `Config::validate`
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration and collect warnings for suspicious settings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_target_url(config.target_url()?)?);
        warnings.extend(Self::validate_timing_settings(config));

        Ok(warnings)
    }

    fn validate_target_url(url: &str) -> Result<Vec<ValidationWarning>> {
        let parsed = url::Url::parse(url).map_err(|e| AppError::config(format!("Invalid URL '{}': {}", url, e)))?;
        let mut warnings = Vec::new();

        if parsed.scheme() == "http" {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("URL '{}' uses HTTP; load times will not include a TLS handshake", url),
            ));
        }

        if let Some(url::Host::Ipv4(ip)) = parsed.host() {
            if ip.is_private() || ip.is_loopback() {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!("URL '{}' targets private/local network", url),
                ));
            }
        }

        if parsed.query().is_some() {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("URL '{}' includes query parameters, which may affect caching", url),
            ));
        }

        Ok(warnings)
    }

    fn validate_timing_settings(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let budget_seconds = config.duration_minutes * 60.0;

        if config.pause_seconds >= budget_seconds {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Pause of {}s is not shorter than the {}s run; at most one request will be sent",
                    config.pause_seconds, budget_seconds
                ),
            ));
        }

        if (config.request_timeout_seconds as f64) <= config.threshold_seconds {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Request timeout of {}s does not exceed the {}s threshold; slow responses will be dropped instead of counted",
                    config.request_timeout_seconds, config.threshold_seconds
                ),
            ));
        }

        if budget_seconds < 10.0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("A {}s run yields very few samples for meaningful statistics", budget_seconds),
            ));
        }

        if config.pause_seconds < 1.0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Pause of {}s sends requests in rapid succession", config.pause_seconds),
            ));
        }

        warnings
    }
}

/// Validation warning levels
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }

    /// Get color for terminal display
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Warning => Color::Yellow,
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        let tag = format!("[{}]", self.level.as_str());
        if use_color {
            format!("{} {}", tag.color(self.level.color()).bold(), self.message)
        } else {
            format!("{} {}", tag, self.message)
        }
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}
