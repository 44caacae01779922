//! Channel-based data source.
//!
//! Receives sample sets via a tokio watch channel. Useful when another part
//! of a program collects the samples (for example a local pinger) and the
//! dashboard only displays them.

use tokio::sync::watch;

use super::{DataSource, FetchQuery};
use crate::data::{Sample, TimeWindow};

/// A data source that receives sample sets via a channel.
///
/// The producer pushes full replacement sets through the sender. Window
/// changes made in the dashboard are published on [`ChannelSource::queries`]
/// so the producer can adjust what it sends.
///
/// # Example
///
/// ```
/// use pingwatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("local pinger");
/// tx.send(Vec::new()).unwrap();
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Vec<Sample>>,
    queries: watch::Sender<FetchQuery>,
    description: String,
    /// Track if we've returned the initial value yet
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - Where the samples come from
    pub fn new(receiver: watch::Receiver<Vec<Sample>>, source_description: &str) -> Self {
        let (queries, _) = watch::channel(FetchQuery::new(TimeWindow::default()));
        Self {
            receiver,
            queries,
            description: format!("channel: {}", source_description),
            initial_returned: false,
        }
    }

    /// Create a channel pair for sending samples to a ChannelSource.
    pub fn create(source_description: &str) -> (watch::Sender<Vec<Sample>>, Self) {
        let (tx, rx) = watch::channel(Vec::new());
        (tx, Self::new(rx, source_description))
    }

    /// Subscribe to query changes made by the dashboard.
    pub fn queries(&self) -> watch::Receiver<FetchQuery> {
        self.queries.subscribe()
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<Vec<Sample>> {
        // Return the initial value on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        // Check if there's a new value without blocking
        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }

    fn set_query(&mut self, query: FetchQuery) {
        self.queries.send_replace(query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");
        assert_eq!(source.description(), "channel: test");

        // Initially returns the default (empty) set
        assert!(source.poll().unwrap().is_empty());

        // No change, so poll returns None
        assert!(source.poll().is_none());

        tx.send(vec![Sample::new("a", 1.0, 2.0, 3.0)]).unwrap();

        let samples = source.poll().unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].id, "a");
    }

    #[test]
    fn test_set_query_is_published() {
        let (_tx, mut source) = ChannelSource::create("test");
        let queries = source.queries();
        assert_eq!(queries.borrow().window, TimeWindow::Hour);

        source.set_query(FetchQuery::new(TimeWindow::Week));
        assert_eq!(queries.borrow().window, TimeWindow::Week);
    }
}
