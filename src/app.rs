//! Application state and interaction logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::layout::{Direction, Position, Rect};
use tracing::{info, warn};

use crate::data::window::SAMPLE_CADENCE_SECS;
use crate::data::{PingData, TimeWindow};
use crate::settings::Settings;
use crate::source::{DataSource, FetchQuery};
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
///
/// Owns the data source and the current sample set. Derived data is
/// rebuilt only when the source delivers a replacement set.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<PingData>,
    pub last_error: Option<String>,

    // Selection
    pub window: TimeWindow,
    query: FetchQuery,

    pub settings: Settings,
    /// Pinger cadence used to convert downtime samples into time.
    pub sample_cadence: Duration,

    // UI
    pub theme: Theme,
    /// Screen areas of the window buttons from the last draw.
    pub window_buttons: Vec<(Rect, TimeWindow)>,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App. The source is expected to already be running the
    /// query described by `settings`.
    pub fn new(source: Box<dyn DataSource>, settings: Settings) -> Self {
        Self::with_theme(source, settings, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(source: Box<dyn DataSource>, settings: Settings, theme: Theme) -> Self {
        let sample_cadence = settings
            .sample_interval()
            .unwrap_or(Duration::from_secs(SAMPLE_CADENCE_SECS));
        Self {
            running: true,
            show_help: false,
            source,
            data: None,
            last_error: None,
            window: settings.window,
            query: settings.initial_query(),
            settings,
            sample_cadence,
            theme,
            window_buttons: Vec::new(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// The query the source is polling.
    pub fn query(&self) -> FetchQuery {
        self.query
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for a new sample set.
    ///
    /// Returns true if the samples were replaced. Failures are logged and
    /// remembered but leave the current samples on screen.
    pub fn reload_data(&mut self) -> bool {
        let replaced = match self.source.poll() {
            Some(samples) => {
                self.data = Some(PingData::from_samples(samples, self.settings.gridline_ms));
                true
            }
            None => false,
        };

        let error = self.source.error().map(str::to_string);
        if error != self.last_error {
            if let Some(ref e) = error {
                warn!("{}: {}", self.source.description(), e);
            }
            self.last_error = error;
        }

        replaced
    }

    /// Select a time window.
    ///
    /// Updates both lookback and page size and restarts polling. Selecting
    /// the active window does nothing. Returns true if the window changed.
    pub fn set_window(&mut self, window: TimeWindow) -> bool {
        if window == self.window {
            return false;
        }

        info!("Switching window {} -> {}", self.window, window);
        self.window = window;
        self.query = self.query.with_window(window);
        self.source.set_query(self.query);
        true
    }

    /// Switch to the next longer window.
    pub fn next_window(&mut self) {
        self.set_window(self.window.next());
    }

    /// Switch to the next shorter window.
    pub fn prev_window(&mut self) {
        self.set_window(self.window.prev());
    }

    /// Ask the source to fetch again right away.
    pub fn refresh(&mut self) {
        self.source.refresh();
        self.set_status_message("Refreshing...".to_string());
    }

    /// Row layout on wide terminals, column layout below the breakpoint.
    pub fn layout_direction(&self, width: u16) -> Direction {
        if width < self.settings.breakpoint_columns {
            Direction::Vertical
        } else {
            Direction::Horizontal
        }
    }

    /// The window button under a screen position, if any.
    pub fn window_at(&self, column: u16, row: u16) -> Option<TimeWindow> {
        let position = Position::new(column, row);
        self.window_buttons
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, window)| *window)
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current statistics and chart points to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };

        let json = serde_json::to_string_pretty(&data.to_export_json(self.window))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Sample;
    use std::sync::{Arc, Mutex};

    /// Source that records every query it is handed.
    #[derive(Debug, Default)]
    struct RecordingSource {
        queries: Arc<Mutex<Vec<FetchQuery>>>,
        pending: Option<Vec<Sample>>,
        error: Option<String>,
    }

    impl DataSource for RecordingSource {
        fn poll(&mut self) -> Option<Vec<Sample>> {
            self.pending.take()
        }

        fn description(&self) -> &str {
            "recording"
        }

        fn error(&self) -> Option<&str> {
            self.error.as_deref()
        }

        fn set_query(&mut self, query: FetchQuery) {
            self.queries.lock().unwrap().push(query);
        }
    }

    fn app_with(source: RecordingSource) -> App {
        App::with_theme(Box::new(source), Settings::default(), Theme::dark())
    }

    #[test]
    fn test_set_window_updates_query_once() {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let mut app = app_with(RecordingSource {
            queries: queries.clone(),
            ..Default::default()
        });
        assert_eq!(app.window, TimeWindow::Hour);

        assert!(app.set_window(TimeWindow::Day));
        assert_eq!(app.window, TimeWindow::Day);
        assert_eq!(app.query().window, TimeWindow::Day);

        let recorded = queries.lock().unwrap().clone();
        assert_eq!(recorded, vec![FetchQuery::new(TimeWindow::Day)]);
        assert_eq!(recorded[0].page_size(), 8641);
        assert_eq!(recorded[0].cutoff_ms(100_000_000), 100_000_000 - 86_400_000);
    }

    #[test]
    fn test_selecting_active_window_is_noop() {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let mut app = app_with(RecordingSource {
            queries: queries.clone(),
            ..Default::default()
        });

        assert!(!app.set_window(TimeWindow::Hour));
        assert!(queries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_cycle_windows() {
        let mut app = app_with(RecordingSource::default());
        app.next_window();
        assert_eq!(app.window, TimeWindow::Day);
        app.prev_window();
        app.prev_window();
        assert_eq!(app.window, TimeWindow::TenMinutes);
    }

    #[test]
    fn test_reload_replaces_data() {
        let mut app = app_with(RecordingSource {
            pending: Some(vec![Sample::new("a", 1.0, 5.0, 0.0), Sample::new("b", 2.0, 5.0, 5.0)]),
            ..Default::default()
        });
        assert!(app.data.is_none());

        assert!(app.reload_data());
        let data = app.data.as_ref().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.stats.downtime.samples, 1);

        // Nothing new: previous data stays
        assert!(!app.reload_data());
        assert_eq!(app.data.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_reload_records_error_without_clearing_data() {
        let mut app = app_with(RecordingSource {
            pending: Some(vec![Sample::new("a", 1.0, 5.0, 5.0)]),
            error: Some("Request timed out".to_string()),
            ..Default::default()
        });

        app.reload_data();
        assert_eq!(app.last_error.as_deref(), Some("Request timed out"));
        assert!(app.data.is_some());
    }

    #[test]
    fn test_layout_breakpoint() {
        let app = app_with(RecordingSource::default());
        assert_eq!(app.layout_direction(99), Direction::Vertical);
        assert_eq!(app.layout_direction(100), Direction::Horizontal);
    }

    #[test]
    fn test_window_at() {
        let mut app = app_with(RecordingSource::default());
        app.window_buttons = vec![
            (Rect::new(0, 10, 12, 1), TimeWindow::Minute),
            (Rect::new(12, 10, 12, 1), TimeWindow::TenMinutes),
        ];
        assert_eq!(app.window_at(3, 10), Some(TimeWindow::Minute));
        assert_eq!(app.window_at(12, 10), Some(TimeWindow::TenMinutes));
        assert_eq!(app.window_at(3, 11), None);
    }

    #[test]
    fn test_export_requires_data() {
        let app = app_with(RecordingSource::default());
        let dir = tempfile::tempdir().unwrap();
        assert!(app.export_state(&dir.path().join("out.json")).is_err());
    }

    #[test]
    fn test_export_writes_json() {
        let mut app = app_with(RecordingSource {
            pending: Some(vec![Sample::new("a", 1.0, 2.0, 3.0)]),
            ..Default::default()
        });
        app.reload_data();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        app.export_state(&path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["window"], "hour");
        assert_eq!(written["sample_count"], 1);
    }
}
