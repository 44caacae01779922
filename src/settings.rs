//! Layered configuration.
//!
//! Built-in defaults, then an optional config file, then `PINGWATCH_*`
//! environment variables. Command-line flags are applied on top by the
//! binary.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::chart::DEFAULT_GRIDLINE_MS;
use crate::data::duration::parse_duration;
use crate::data::TimeWindow;
use crate::source::{FetchQuery, DEFAULT_ENDPOINT};

/// Terminal width (columns) below which the layout stacks vertically.
pub const DEFAULT_BREAKPOINT_COLUMNS: u16 = 100;

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Sample API endpoint.
    pub endpoint: String,
    /// Time between fetches, e.g. "10s".
    pub poll_interval: String,
    /// Per-request timeout, e.g. "10s".
    pub request_timeout: String,
    /// Window selected at startup.
    pub window: TimeWindow,
    /// Send only `pageSize` instead of a `timeframe` cutoff.
    pub legacy_query: bool,
    /// Layout breakpoint in terminal columns.
    pub breakpoint_columns: u16,
    /// Cadence of the pinger, used to turn downtime samples into time.
    pub sample_interval: String,
    /// Latency gridline spacing in milliseconds.
    pub gridline_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval: "10s".to_string(),
            request_timeout: "10s".to_string(),
            window: TimeWindow::default(),
            legacy_query: false,
            breakpoint_columns: DEFAULT_BREAKPOINT_COLUMNS,
            sample_interval: "10s".to_string(),
            gridline_ms: DEFAULT_GRIDLINE_MS,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("endpoint", defaults.endpoint)?
            .set_default("poll_interval", defaults.poll_interval)?
            .set_default("request_timeout", defaults.request_timeout)?
            .set_default("window", defaults.window.to_string())?
            .set_default("legacy_query", defaults.legacy_query)?
            .set_default("breakpoint_columns", i64::from(defaults.breakpoint_columns))?
            .set_default("sample_interval", defaults.sample_interval)?
            .set_default("gridline_ms", defaults.gridline_ms)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix("PINGWATCH").try_parsing(true))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every value the dashboard would otherwise trip over at runtime.
    pub fn validate(&self) -> Result<()> {
        self.poll_interval()?;
        self.request_timeout()?;
        self.sample_interval()?;
        if !self.gridline_ms.is_finite() || self.gridline_ms <= 0.0 {
            bail!("gridline_ms must be a positive number, got {}", self.gridline_ms);
        }
        Ok(())
    }

    /// Parsed poll interval.
    pub fn poll_interval(&self) -> Result<Duration> {
        non_zero("poll_interval", &self.poll_interval)
    }

    /// Parsed request timeout.
    pub fn request_timeout(&self) -> Result<Duration> {
        non_zero("request_timeout", &self.request_timeout)
    }

    /// Parsed sample cadence.
    pub fn sample_interval(&self) -> Result<Duration> {
        non_zero("sample_interval", &self.sample_interval)
    }

    /// The query to start polling with.
    pub fn initial_query(&self) -> FetchQuery {
        if self.legacy_query {
            FetchQuery::legacy(self.window)
        } else {
            FetchQuery::new(self.window)
        }
    }
}

fn non_zero(key: &str, value: &str) -> Result<Duration> {
    let duration = parse_duration(value)?;
    if duration.is_zero() {
        bail!("{} must be greater than zero, got {:?}", key, value);
    }
    Ok(duration)
}
