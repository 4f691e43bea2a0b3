//! Configuration parsing from CLI arguments and environment variables

use crate::{cli::Cli, config::env::EnvManager, error::Result, models::Config};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        EnvManager::load_env_file(self.cli.debug)?;
        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    pub(crate) fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref url) = self.cli.url {
            config.target_url = Some(url.trim().to_string());
        }
        if let Some(duration) = self.cli.duration {
            config.duration_minutes = duration;
        }
        if let Some(threshold) = self.cli.threshold {
            config.threshold_seconds = threshold;
        }
        if let Some(pause) = self.cli.pause {
            config.pause_seconds = pause;
        }
        if let Some(timeout) = self.cli.timeout {
            config.request_timeout_seconds = timeout;
        }
        if let Some(format) = self.cli.format {
            config.export_format = format;
        }
        if let Some(ref output) = self.cli.output {
            config.output_path = Some(output.clone());
        }

        if self.cli.no_export {
            config.export_enabled = false;
        }
        if self.cli.no_elapsed {
            config.show_elapsed = false;
        }
        if self.cli.no_chart {
            config.show_chart = false;
        }

        if self.cli.color {
            config.enable_color = true;
        } else if self.cli.no_color || !self.cli.use_colors() {
            config.enable_color = false;
        }

        // CLI-only switches
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let summary = [
        format!("Target URL: {}", config.target_url.as_deref().unwrap_or("(none)")),
        format!("Duration: {} min", config.duration_minutes),
        format!("Threshold: {}s", config.threshold_seconds),
        format!("Pause: {}s", config.pause_seconds),
        format!("Request Timeout: {}s", config.request_timeout_seconds),
        format!(
            "Export: {}",
            if config.export_enabled {
                match config.output_path {
                    Some(ref path) => format!("{:?} to {}", config.export_format, path.display()),
                    None => format!("{:?}", config.export_format),
                }
            } else {
                "disabled".to_string()
            }
        ),
        format!("Color Output: {}", config.enable_color),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ];

    summary.join("\n")
}
