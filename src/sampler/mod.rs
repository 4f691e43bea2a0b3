//! The sampling loop
//!
//! One request at a time: timestamp, timed GET, record on success, fixed
//! pause, repeat until the run's wall-clock budget is spent. Failed
//! requests are logged and dropped; any other error aborts the run. The loop only yields while awaiting
//! the request and the pause, and the next request never starts before
//! the previous pause has elapsed.

use crate::{
    client::HttpClient,
    error::{AppError, Result},
    logging::Logger,
    models::{RunContext, Sample, Series},
    types::{Classification, RunState},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

/// What the live display receives after every recorded sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveUpdate {
    /// 1-based count of recorded samples; failed attempts are not counted
    pub request_number: u64,
    /// Seconds since the run started, at the time the sample was recorded
    pub elapsed_seconds: f64,
    pub latency_seconds: f64,
    pub classification: Classification,
}

/// Receives sampler events for incremental display
pub trait SampleObserver: Send {
    fn on_sample(&mut self, sample: &Sample, update: &LiveUpdate);

    fn on_failure(&mut self, _error: &AppError) {}

    fn on_complete(&mut self, _state: RunState, _series: &Series) {}
}

/// Observer that ignores every event
pub struct NoopObserver;

impl SampleObserver for NoopObserver {
    fn on_sample(&mut self, _sample: &Sample, _update: &LiveUpdate) {}
}

/// Drives a run against one target
pub struct Sampler {
    client: Arc<dyn HttpClient>,
    logger: Logger,
}

impl Sampler {
    pub fn new(client: Arc<dyn HttpClient>, logger: Logger) -> Self {
        Self { client, logger }
    }

    /// Run until the duration budget is exhausted
    pub async fn run(&self, ctx: &mut RunContext, observer: &mut dyn SampleObserver) -> Result<RunState> {
        self.run_until(ctx, observer, std::future::pending::<()>()).await
    }

    /// Run until the duration budget is exhausted or `shutdown` resolves
    ///
    /// On shutdown an in-flight request or pause is abandoned and the run
    /// ends `Interrupted`; samples recorded so far stay in the series.
    pub async fn run_until<F>(
        &self,
        ctx: &mut RunContext,
        observer: &mut dyn SampleObserver,
        shutdown: F,
    ) -> Result<RunState>
    where
        F: Future<Output = ()>,
    {
        ctx.begin()?;
        let run_id = ctx.id().to_string();

        self.logger
            .info("Run started")
            .correlation_id(&run_id)
            .field("url", ctx.target_url())
            .field("duration_minutes", ctx.config().duration_minutes())
            .field("threshold_seconds", ctx.config().threshold_seconds())
            .field("pause_seconds", ctx.config().pause_seconds())
            .log()
            .await;

        tokio::pin!(shutdown);
        let interrupted = tokio::select! {
            result = self.sample_loop(ctx, observer, &run_id) => {
                result?;
                false
            }
            _ = &mut shutdown => true,
        };

        let outcome = if interrupted {
            RunState::Interrupted
        } else {
            RunState::Completed
        };
        ctx.finish(outcome)?;

        self.logger
            .info(if interrupted { "Run interrupted" } else { "Run completed" })
            .correlation_id(&run_id)
            .field("samples", ctx.series().len())
            .field("elapsed_seconds", ctx.elapsed().as_secs_f64())
            .log()
            .await;

        observer.on_complete(outcome, ctx.series());
        Ok(outcome)
    }

    async fn sample_loop(&self, ctx: &mut RunContext, observer: &mut dyn SampleObserver, run_id: &str) -> Result<()> {
        let threshold = ctx.config().threshold_seconds();
        let pause = ctx.config().pause();
        let mut request_number = 0u64;

        while !ctx.budget_exhausted() {
            // Never let a wall-clock step backwards break the series ordering
            let now = Utc::now();
            let timestamp = ctx.series().last().map_or(now, |last| now.max(last.timestamp()));

            match self.client.fetch(ctx.target_url()).await {
                Ok(outcome) => {
                    let latency = outcome.latency_seconds();
                    let sample = Sample::new(timestamp, latency);
                    ctx.record(sample.clone())?;
                    request_number += 1;

                    let update = LiveUpdate {
                        request_number,
                        elapsed_seconds: ctx.elapsed().as_secs_f64(),
                        latency_seconds: latency,
                        classification: Classification::classify(latency, threshold),
                    };

                    self.logger
                        .debug("Sample recorded")
                        .correlation_id(run_id)
                        .sample(&sample)
                        .field("status", outcome.status_code)
                        .field("request_number", request_number)
                        .log()
                        .await;

                    observer.on_sample(&sample, &update);
                }
                Err(error) if error.is_request_failure() => {
                    self.logger
                        .warn("Request failed; attempt dropped")
                        .correlation_id(run_id)
                        .error_info(&error)
                        .log()
                        .await;

                    observer.on_failure(&error);
                }
                Err(error) => return Err(error),
            }

            tokio::time::sleep(pause).await;
        }

        Ok(())
    }
}
