//! Live polling data source.
//!
//! Runs a tokio task that fetches once immediately and then on a fixed
//! interval. Changing the query aborts the task (timer and any in-flight
//! request) and starts a fresh one, so at most one poller is ever live.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::{DataSource, FetchQuery, PingClient};
use crate::data::Sample;

/// Poll interval used when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Result of one tick, tagged with the poller generation that produced it.
#[derive(Debug)]
struct Tick {
    generation: u64,
    result: Result<Vec<Sample>, String>,
}

/// A data source that polls the ping API over HTTP.
///
/// Must be created and reconfigured from within a tokio runtime context.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use pingwatch::source::{FetchQuery, HttpSource, PingClient};
/// use pingwatch::TimeWindow;
///
/// # tokio_test::block_on(async {
/// let client = PingClient::builder().build().unwrap();
/// let source = HttpSource::spawn(client, FetchQuery::new(TimeWindow::Hour), Duration::from_secs(10));
/// # });
/// ```
#[derive(Debug)]
pub struct HttpSource {
    client: PingClient,
    query: FetchQuery,
    interval: Duration,
    generation: u64,
    task: Option<JoinHandle<()>>,
    tx: mpsc::Sender<Tick>,
    rx: mpsc::Receiver<Tick>,
    description: String,
    last_error: Option<String>,
}

impl HttpSource {
    /// Create the source and start polling.
    ///
    /// A zero `interval` falls back to [`DEFAULT_POLL_INTERVAL`].
    pub fn spawn(client: PingClient, query: FetchQuery, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            warn!("Poll interval must be non-zero, using {:?}", DEFAULT_POLL_INTERVAL);
            DEFAULT_POLL_INTERVAL
        } else {
            interval
        };
        let (tx, rx) = mpsc::channel(16);
        let description = format!("http: {}", client.endpoint());
        let mut source = Self {
            client,
            query,
            interval,
            generation: 0,
            task: None,
            tx,
            rx,
            description,
            last_error: None,
        };
        source.restart();
        source
    }

    /// The query currently being polled.
    pub fn query(&self) -> FetchQuery {
        self.query
    }

    /// Stop polling. Any in-flight request is dropped.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Tear down the running poller and start a new one for the current query.
    fn restart(&mut self) {
        self.stop();
        self.generation += 1;

        let generation = self.generation;
        let client = self.client.clone();
        let query = self.query;
        let period = self.interval;
        let tx = self.tx.clone();

        info!(
            "Polling {} every {:?} (window: {}, generation {})",
            client.endpoint(),
            period,
            query.window,
            generation
        );

        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                // First tick completes immediately
                ticker.tick().await;

                let result = client.fetch_now(&query).await;
                match &result {
                    Ok(samples) => debug!("Fetched {} samples", samples.len()),
                    Err(e) => warn!("Fetch failed: {}", e),
                }

                let tick = Tick {
                    generation,
                    result: result.map_err(|e| e.to_string()),
                };
                if tx.send(tick).await.is_err() {
                    // Source dropped
                    break;
                }
            }
        }));
    }
}

impl DataSource for HttpSource {
    fn poll(&mut self) -> Option<Vec<Sample>> {
        let mut latest = None;

        while let Ok(tick) = self.rx.try_recv() {
            // Results from a superseded query must not replace newer data
            if tick.generation != self.generation {
                continue;
            }
            match tick.result {
                Ok(samples) => {
                    self.last_error = None;
                    latest = Some(samples);
                }
                Err(e) => self.last_error = Some(e),
            }
        }

        latest
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn set_query(&mut self, query: FetchQuery) {
        self.query = query;
        self.restart();
    }

    fn refresh(&mut self) {
        self.restart();
    }
}

impl Drop for HttpSource {
    fn drop(&mut self) {
        self.stop();
    }
}
