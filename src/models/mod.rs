//! Data models and structures for the page latency probe

pub mod config;
pub mod run;

// Re-export main model types
pub use config::{Config, RunConfig};
pub use run::{RunContext, Sample, Series};
