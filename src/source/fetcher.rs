//! HTTP client for the ping sample API.
//!
//! One GET per call, no retries. The query string carries the lookback
//! cutoff and page size for the selected [`TimeWindow`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use pingwatch::source::{FetchQuery, PingClient};
//! use pingwatch::TimeWindow;
//!
//! # tokio_test::block_on(async {
//! let client = PingClient::builder()
//!     .endpoint("https://ping.example.net/main")
//!     .build()?;
//!
//! let samples = client.fetch_now(&FetchQuery::new(TimeWindow::Hour)).await?;
//! println!("{} samples", samples.len());
//! # Ok::<(), pingwatch::FetchError>(())
//! # });
//! ```

use std::time::Duration;

use reqwest::Client;

use crate::data::{Sample, TimeWindow};
use crate::FetchError;

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://kd741iv5pg.execute-api.us-west-2.amazonaws.com/main";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// What to ask the API for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchQuery {
    pub window: TimeWindow,
    /// Send only `pageSize`, without the `timeframe` cutoff.
    pub legacy: bool,
}

impl FetchQuery {
    /// Query with a `timeframe` cutoff.
    pub fn new(window: TimeWindow) -> Self {
        Self {
            window,
            legacy: false,
        }
    }

    /// Query with only a page size.
    pub fn legacy(window: TimeWindow) -> Self {
        Self {
            window,
            legacy: true,
        }
    }

    /// Same query for a different window.
    pub fn with_window(self, window: TimeWindow) -> Self {
        Self { window, ..self }
    }

    /// Oldest timestamp (epoch ms) the query asks for.
    pub fn cutoff_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.window.lookback().as_millis() as i64
    }

    /// Page size sent on the wire. The cutoff form asks for one extra
    /// sample so the window edge is covered.
    pub fn page_size(&self) -> u64 {
        if self.legacy {
            self.window.page_size()
        } else {
            self.window.page_size() + 1
        }
    }

    /// Query string parameters for a request made at `now_ms`.
    pub fn params(&self, now_ms: i64) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if !self.legacy {
            params.push(("timeframe", self.cutoff_ms(now_ms).to_string()));
        }
        params.push(("pageSize", self.page_size().to_string()));
        params
    }
}

/// Client for the ping sample API.
#[derive(Debug, Clone)]
pub struct PingClient {
    client: Client,
    endpoint: String,
}

impl PingClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> PingClientBuilder {
        PingClientBuilder::default()
    }

    /// The endpoint requests go to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch samples as of the current wall-clock time.
    pub async fn fetch_now(&self, query: &FetchQuery) -> Result<Vec<Sample>, FetchError> {
        self.fetch(query, chrono::Utc::now().timestamp_millis()).await
    }

    /// Fetch samples for `query` evaluated at `now_ms`.
    pub async fn fetch(&self, query: &FetchQuery, now_ms: i64) -> Result<Vec<Sample>, FetchError> {
        let response = self.client.get(&self.endpoint).query(&query.params(now_ms)).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let samples: Vec<Sample> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(samples)
    }
}

/// Builder for PingClient.
#[derive(Debug, Default)]
pub struct PingClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl PingClientBuilder {
    /// Set the API endpoint (e.g., "https://ping.example.net/main").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PingClient, FetchError> {
        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(PingClient {
            client,
            endpoint: self.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }
}
