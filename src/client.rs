//! HTTP client implementation and timing measurements


use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::{Duration, Instant};

/// User agent sent with every sampled request
pub const USER_AGENT: &str = concat!("page-latency-probe/", env!("CARGO_PKG_VERSION"));

/// HTTP client trait for abstraction and testing
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue one plain GET and time it until the full response body has arrived
    async fn fetch(&self, url: &str) -> Result<FetchOutcome>;
}

/// A completed exchange with the target
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub status_code: u16,
    pub body_size: usize,
    pub elapsed: Duration,
}

impl FetchOutcome {
    /// Elapsed time in seconds
    pub fn latency_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }
}

/// reqwest-backed client used against real targets
pub struct NetworkClient {
    client: Client,
}

impl NetworkClient {
    /// Create a new network client; `timeout` is the transport's own limit per request
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create a client with the default transport timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(crate::defaults::DEFAULT_REQUEST_TIMEOUT)
    }
}

#[async_trait]
impl HttpClient for NetworkClient {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome> {
        let url = Url::parse(url).map_err(|e| AppError::parse(format!("Invalid URL: {}", e)))?;
        let request = self.client.get(url);

        let start = Instant::now();
        let response = request.send().await.map_err(AppError::from)?;
        let status_code = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::http_request(format!("Failed to read response body: {}", e)))?;
        let elapsed = start.elapsed();

        Ok(FetchOutcome {
            status_code,
            body_size: body.len(),
            elapsed,
        })
    }
}
