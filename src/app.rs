//! Main application orchestration and execution

use crate::{
    cli::Cli,
    client::{HttpClient, NetworkClient},
    config::{display_config_summary, load_config, validate_config},
    error::{AppError, Result},
    export,
    logging::Logger,
    models::{Config, RunContext},
    output::{LiveDisplay, OutputFormatterFactory, TextChart},
    sampler::Sampler,
    stats::SeriesStats,
    types::RunState,
};
use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub state: RunState,
    pub sample_count: usize,
    /// `None` when the series is empty
    pub stats: Option<SeriesStats>,
    pub export_path: Option<PathBuf>,
}

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Result<Self> {
        cli.validate().map_err(AppError::validation)?;
        Ok(Self { cli })
    }

    /// Run the application against the real network, stopping early on Ctrl-C
    pub async fn run(self) -> Result<RunReport> {
        let config = load_config(self.cli)?;
        let warnings = validate_config(&config)?;
        let logger = Logger::with_config(crate::PKG_NAME, &config);

        if config.debug {
            eprintln!("{} v{} ({})", crate::PKG_NAME, crate::VERSION, env!("GIT_COMMIT"));
            eprintln!("Built {} for {}", env!("BUILD_TIME"), env!("TARGET_TRIPLE"));
            eprintln!("\nConfiguration Summary:\n{}\n", display_config_summary(&config));
        }

        for warning in &warnings {
            eprintln!("{}", warning.format(config.enable_color));
        }

        let client: Arc<dyn HttpClient> = Arc::new(NetworkClient::with_timeout(config.request_timeout())?);
        let shutdown = async {
            // If the handler cannot be installed the run simply isn't interruptible
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        execute(&config, client, logger, shutdown, io::stdout()).await
    }
}

/// Drive one run end to end: banner, live sampling, statistics, chart, export
pub async fn execute<F, W>(
    config: &Config,
    client: Arc<dyn HttpClient>,
    logger: Logger,
    shutdown: F,
    out: W,
) -> Result<RunReport>
where
    F: Future<Output = ()>,
    W: Write + Send,
{
    let url = config.target_url()?.to_string();
    let run_config = config.run_config()?;
    let formatter = OutputFormatterFactory::create_formatter(config.enable_color, config.show_elapsed, config.verbose);

    let mut ctx = RunContext::new(url.clone(), run_config);
    logger.set_session_id(ctx.id().to_string()).await;

    let mut display = LiveDisplay::new(
        OutputFormatterFactory::create_formatter(config.enable_color, config.show_elapsed, config.verbose),
        out,
    );
    display.write_line(&formatter.format_banner(&url, &run_config)?)?;

    let sampler = Sampler::new(client, logger.child("sampler"));
    sampler.run_until(&mut ctx, &mut display, shutdown).await?;
    let mut out = display.into_inner();

    let samples = ctx.series().samples();
    let threshold = run_config.threshold_seconds();

    let stats = match SeriesStats::compute(samples, threshold) {
        Ok(stats) => {
            writeln!(out, "\n{}", formatter.format_statistics(&stats, threshold)?)?;
            if config.show_chart {
                writeln!(out, "\n{}", TextChart::new(config.enable_color).render(samples, threshold))?;
            }
            Some(stats)
        }
        Err(AppError::NoData(_)) => {
            writeln!(out, "\n{}", formatter.format_no_data(&url)?)?;
            None
        }
        Err(e) => return Err(e),
    };

    let export_path = if config.export_enabled && !samples.is_empty() {
        let path = export::export_path(
            config.output_path.as_deref(),
            &url,
            run_config.duration_minutes(),
            config.export_format,
        );
        export::write_export(&path, samples, config.export_format)?;

        logger
            .info("Export written")
            .field("path", path.display().to_string())
            .field("format", config.export_format)
            .field("samples", samples.len())
            .log()
            .await;
        writeln!(out, "{}", formatter.format_export_saved(&path)?)?;
        Some(path)
    } else {
        None
    };
    out.flush()?;

    Ok(RunReport {
        state: ctx.state(),
        sample_count: samples.len(),
        stats,
        export_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchOutcome;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FixedClient {
        latency: Duration,
        fail: bool,
    }

    #[async_trait]
    impl HttpClient for FixedClient {
        async fn fetch(&self, _url: &str) -> Result<FetchOutcome> {
            tokio::time::sleep(self.latency).await;
            if self.fail {
                return Err(AppError::network("connection reset"));
            }
            Ok(FetchOutcome {
                status_code: 200,
                body_size: 0,
                elapsed: self.latency,
            })
        }
    }

    fn config(dir: &std::path::Path) -> Config {
        Config {
            target_url: Some("https://example.com/".to_string()),
            duration_minutes: 0.09,
            threshold_seconds: 1.0,
            pause_seconds: 1.0,
            output_path: Some(dir.join("run.csv")),
            enable_color: false,
            ..Config::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_reports_and_exports() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let client = Arc::new(FixedClient {
            latency: Duration::from_millis(500),
            fail: false,
        });

        let mut buffer = Vec::new();
        let report = execute(&config, client, Logger::new("test"), std::future::pending(), &mut buffer)
            .await
            .unwrap();

        // 5.4s budget, 1.5s per cycle
        assert_eq!(report.state, RunState::Completed);
        assert_eq!(report.sample_count, 4);
        let stats = report.stats.unwrap();
        assert_eq!(stats.count_exceeding_threshold, 0);
        assert!((stats.mean - 0.5).abs() < 0.01);

        let path = report.export_path.unwrap();
        let exported = export::parse_csv(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(exported.len(), 4);

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("****"));
        assert!(text.contains("Request #4"));
        assert!(text.contains("Data collection completed. 4 sample(s) recorded."));
        assert!(text.contains("Median: 0.50 seconds"));
        assert!(text.contains("Data saved to"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_without_samples_prints_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let client = Arc::new(FixedClient {
            latency: Duration::from_millis(100),
            fail: true,
        });

        let mut buffer = Vec::new();
        let report = execute(&config, client, Logger::new("test"), std::future::pending(), &mut buffer)
            .await
            .unwrap();

        assert_eq!(report.sample_count, 0);
        assert!(report.stats.is_none());
        assert!(report.export_path.is_none());
        assert!(!dir.path().join("run.csv").exists());

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("No data collected."));
        assert!(text.contains("failed request(s) dropped"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupted_run_still_exports() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let client = Arc::new(FixedClient {
            latency: Duration::from_millis(500),
            fail: false,
        });

        let mut buffer = Vec::new();
        let shutdown = tokio::time::sleep(Duration::from_millis(2_200));
        let report = execute(&config, client, Logger::new("test"), shutdown, &mut buffer)
            .await
            .unwrap();

        assert_eq!(report.state, RunState::Interrupted);
        assert_eq!(report.sample_count, 2);
        assert!(report.export_path.is_some());
        assert!(String::from_utf8(buffer).unwrap().contains("Interrupted! Saving current data..."));
    }

    #[test]
    fn test_conflicting_color_flags_rejected() {
        use clap::Parser;
        let cli = Cli::parse_from(["plp", "--color", "--no-color"]);
        assert!(matches!(App::new(cli), Err(AppError::Validation(_))));
    }
}
