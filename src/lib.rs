//! # pingwatch
//!
//! A terminal dashboard for home network latency.
//!
//! A pinger elsewhere records, every ten seconds, the round trip to the local
//! gateway and to 8.8.8.8 and serves the samples over HTTP. This crate polls
//! that API and shows the samples as a time-series chart next to summary
//! statistics: high/low/average latency per target and how long the internet
//! path was down while the gateway stayed reachable.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(chart, stats) │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource | ChannelSource    │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, window selection, export
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with the
//!   polling HTTP source, a replay file source and a channel source
//! - **[`data`]**: Sample types, chart shaping ([`ChartModel`]) and
//!   statistics ([`NetworkStats`])
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`settings`]**: Layered configuration
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the default endpoint
//! pingwatch
//!
//! # Poll another endpoint, starting on the last day
//! pingwatch --endpoint https://ping.example.net/main --window day
//!
//! # Replay a capture
//! pingwatch --file samples.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use pingwatch::{NetworkStats, Sample};
//!
//! let samples = vec![
//!     Sample::new("a", 1_000.0, 2.0, 0.0),
//!     Sample::new("b", 11_000.0, 2.0, 14.0),
//! ];
//! let stats = NetworkStats::compute(&samples);
//! assert_eq!(stats.downtime.ratio_label().as_deref(), Some("0.5000"));
//! ```
//!
//! ### Feeding samples from your own collector
//!
//! ```
//! use pingwatch::{App, ChannelSource, Settings};
//!
//! let (tx, source) = ChannelSource::create("local pinger");
//! let app = App::new(Box::new(source), Settings::default());
//! ```

pub mod app;
pub mod data;
pub mod error;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{
    ChartModel, ChartPoint, Downtime, LatencyStats, NetworkStats, PingData, Probe, Sample, Target,
    TimeWindow,
};
pub use error::FetchError;
pub use settings::Settings;
pub use source::{ChannelSource, DataSource, FetchQuery, FileSource, HttpSource, PingClient};
