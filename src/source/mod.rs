//! Data source abstraction for receiving ping samples.
//!
//! This module provides a trait-based abstraction for receiving sample sets
//! from various sources (the HTTP API, a replay file, an in-process channel).
//! Every source hands over a full replacement set; nothing is merged.

mod channel;
pub mod fetcher;
mod file;
mod http;

pub use channel::ChannelSource;
pub use fetcher::{FetchQuery, PingClient, PingClientBuilder, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use file::FileSource;
pub use http::{HttpSource, DEFAULT_POLL_INTERVAL};

use std::fmt::Debug;

use crate::data::Sample;

/// Trait for receiving ping samples from various sources.
///
/// # Example
///
/// ```
/// use pingwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("samples.json");
/// if let Some(samples) = source.poll() {
///     println!("Got {} samples", samples.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest sample set.
    ///
    /// Returns `Some(samples)` if a new set is available, `None` otherwise.
    /// This method must not block.
    fn poll(&mut self) -> Option<Vec<Sample>>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;

    /// The error from the most recent attempt, if it failed.
    fn error(&self) -> Option<&str>;

    /// Switch to a new query. Sources that poll restart their schedule.
    fn set_query(&mut self, query: FetchQuery);

    /// Fetch again as soon as possible.
    fn refresh(&mut self) {}
}
