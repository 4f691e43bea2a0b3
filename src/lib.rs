//! Page Latency Probe
//!
//! Repeatedly fetches a single page for a fixed window of time, records how
//! long each load took, then reports summary statistics against an expected
//! response time and exports the series to CSV or plain text.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod output;
pub mod sampler;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use app::{App, RunReport};
pub use client::{HttpClient, NetworkClient};
pub use error::{AppError, Result};
pub use models::{Config, RunConfig, RunContext, Sample, Series};
pub use output::{ColoredFormatter, LiveDisplay, OutputFormatter, OutputFormatterFactory, PlainFormatter, TextChart};
pub use sampler::{LiveUpdate, SampleObserver, Sampler};
pub use stats::SeriesStats;
pub use types::{Classification, ExportFormat, RunState};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_DURATION_MINUTES: f64 = 5.0;
    pub const DEFAULT_THRESHOLD_SECONDS: f64 = 3.0;
    pub const DEFAULT_PAUSE_SECONDS: f64 = 5.0;
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
