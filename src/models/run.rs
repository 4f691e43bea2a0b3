//! Samples, the append-only series and the per-run context

use crate::models::config::RunConfig;
use crate::types::{AppError, Result, RunState};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

/// One recorded latency observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    timestamp: DateTime<Utc>,
    latency_seconds: f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, latency_seconds: f64) -> Self {
        Self {
            timestamp,
            latency_seconds,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn latency_seconds(&self) -> f64 {
        self.latency_seconds
    }

    /// ISO-8601 rendering used by exports and logs
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Ordered, append-only sequence of samples
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample; timestamps must not go backwards
    pub fn push(&mut self, sample: Sample) -> Result<()> {
        if let Some(last) = self.samples.last() {
            if sample.timestamp < last.timestamp {
                return Err(AppError::internal(format!(
                    "Sample at {} is earlier than the last recorded sample at {}",
                    sample.timestamp_iso(),
                    last.timestamp_iso()
                )));
            }
        }
        self.samples.push(sample);
        Ok(())
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn latencies(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(Sample::latency_seconds)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

/// State owned by the caller and shared by sampler (writer) and reporter (reader)
#[derive(Debug)]
pub struct RunContext {
    id: Uuid,
    target_url: String,
    config: RunConfig,
    series: Series,
    state: RunState,
    started_at: Option<Instant>,
}

impl RunContext {
    pub fn new(target_url: impl Into<String>, config: RunConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            target_url: target_url.into(),
            config,
            series: Series::new(),
            state: RunState::Idle,
            started_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Idle -> Running, starting the wall-clock budget
    pub fn begin(&mut self) -> Result<()> {
        if self.state != RunState::Idle {
            return Err(AppError::run_state(format!("cannot start a run that is {:?}", self.state)));
        }
        self.state = RunState::Running;
        self.started_at = Some(Instant::now());
        Ok(())
    }

    /// Running -> Completed or Interrupted
    pub fn finish(&mut self, outcome: RunState) -> Result<()> {
        if self.state != RunState::Running {
            return Err(AppError::run_state(format!("cannot finish a run that is {:?}", self.state)));
        }
        if !outcome.is_finished() {
            return Err(AppError::run_state(format!("{:?} is not a terminal state", outcome)));
        }
        self.state = outcome;
        Ok(())
    }

    /// Append a sample; only legal while running
    pub fn record(&mut self, sample: Sample) -> Result<()> {
        if self.state != RunState::Running {
            return Err(AppError::run_state(format!("cannot record a sample while {:?}", self.state)));
        }
        self.series.push(sample)
    }

    /// Time since `begin` on the runtime clock, zero before the run starts
    pub fn elapsed(&self) -> Duration {
        self.started_at.map(|start| start.elapsed()).unwrap_or(Duration::ZERO)
    }

    pub fn budget_exhausted(&self) -> bool {
        self.elapsed() >= self.config.budget()
    }
}
