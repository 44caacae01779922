//! Data models and processing for ping samples.
//!
//! This module turns the raw sample array returned by the API into the
//! chart model and statistics the dashboard displays.
//!
//! ## Submodules
//!
//! - [`sample`]: Wire types ([`Sample`], [`Probe`]) with numeric coercion
//! - [`window`]: Selectable lookback windows ([`TimeWindow`])
//! - [`chart`]: Chronological chart points and gap-split series ([`ChartModel`])
//! - [`stats`]: High/low/average latency and downtime ([`NetworkStats`])
//! - [`duration`]: Parsing and formatting of durations (e.g., "10s", "2:10")
//! - [`ping`]: The derived bundle held by the app ([`PingData`])
//!
//! ## Data Flow
//!
//! ```text
//! Vec<Sample> (raw JSON)
//!        │
//!        ▼
//! PingData::from_samples()
//!        │
//!        ├──▶ ChartModel::build() (sorted points, series segments, axes)
//!        │
//!        └──▶ NetworkStats::compute() (latency stats, downtime)
//! ```

pub mod chart;
pub mod duration;
pub mod ping;
pub mod sample;
pub mod stats;
pub mod window;

pub use chart::{ChartModel, ChartPoint, Series};
pub use ping::PingData;
pub use sample::{Probe, Sample, Target};
pub use stats::{Downtime, LatencyStats, NetworkStats};
pub use window::TimeWindow;
