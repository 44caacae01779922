//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`chart`]: Latency line chart with gaps for failed probes
//! - [`metrics`]: High/low/average per target and downtime
//! - [`buttons`]: Time window selector
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! Wide terminals put the metrics beside the chart and lay the window
//! buttons out in a row. Below the breakpoint everything stacks:
//!
//! ```text
//! wide                                   narrow
//! ┌──────────────────────────────────┐   ┌──────────────────┐
//! │ Header                           │   │ Header           │
//! ├─────────┬────────────────────────┤   ├──────────────────┤
//! │         │ Chart                  │   │ Metrics          │
//! │ Metrics │                        │   ├──────────────────┤
//! │         ├────────────────────────┤   │ Chart            │
//! │         │ [btn] [btn] [btn] ...  │   ├──────────────────┤
//! ├─────────┴────────────────────────┤   │ [btn]            │
//! │ Status Bar                       │   │ [btn] ...        │
//! └──────────────────────────────────┘   ├──────────────────┤
//!                                        │ Status Bar       │
//!                                        └──────────────────┘
//! ```

pub mod buttons;
pub mod chart;
pub mod common;
pub mod metrics;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;
use crate::data::TimeWindow;

/// Minimum terminal size for usable display.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 16;

/// Width of the metrics panel in row layout.
const METRICS_WIDTH: u16 = 28;

/// Draw the whole dashboard.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        app.window_buttons.clear();
        common::render_too_small(frame, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);

    let direction = app.layout_direction(area.width);
    match direction {
        Direction::Horizontal => {
            let columns =
                Layout::horizontal([Constraint::Length(METRICS_WIDTH), Constraint::Min(20)])
                    .split(chunks[1]);
            metrics::render(frame, app, columns[0], direction);

            let right = Layout::vertical([Constraint::Min(6), Constraint::Length(3)])
                .split(columns[1]);
            chart::render(frame, app, right[0]);
            buttons::render(frame, app, right[1], direction);
        }
        Direction::Vertical => {
            let button_height = TimeWindow::ALL.len() as u16 + 2;
            let rows = Layout::vertical([
                Constraint::Length(metrics::STACKED_HEIGHT),
                Constraint::Min(6),
                Constraint::Length(button_height),
            ])
            .split(chunks[1]);
            metrics::render(frame, app, rows[0], direction);
            chart::render(frame, app, rows[1]);
            buttons::render(frame, app, rows[2], direction);
        }
    }

    common::render_status_bar(frame, app, chunks[2]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::Sample;
    use crate::settings::Settings;
    use crate::source::ChannelSource;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    pub(crate) fn app_with_samples(samples: Vec<Sample>) -> App {
        let (tx, source) = ChannelSource::create("test");
        tx.send(samples).unwrap();
        let mut app = App::with_theme(Box::new(source), Settings::default(), Theme::dark());
        app.reload_data();
        app
    }

    pub(crate) fn draw_to_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    pub(crate) fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_too_small_terminal() {
        let mut app = app_with_samples(Vec::new());
        let text = buffer_text(&draw_to_buffer(&mut app, 30, 10));
        assert!(text.contains("Terminal too small"));
        assert!(app.window_buttons.is_empty());
    }

    #[test]
    fn test_wide_layout_buttons_in_a_row() {
        let mut app = app_with_samples(vec![Sample::new("a", 1_000.0, 2.0, 12.0)]);
        draw_to_buffer(&mut app, 140, 30);

        // The active window's button is disabled
        assert_eq!(app.window_buttons.len(), TimeWindow::ALL.len() - 1);
        let first_row = app.window_buttons[0].0.y;
        assert!(app.window_buttons.iter().all(|(r, _)| r.y == first_row));
    }

    #[test]
    fn test_narrow_layout_buttons_stacked() {
        let mut app = app_with_samples(vec![Sample::new("a", 1_000.0, 2.0, 12.0)]);
        draw_to_buffer(&mut app, 60, 50);

        // The active window's button is disabled
        assert_eq!(app.window_buttons.len(), TimeWindow::ALL.len() - 1);
        let first_col = app.window_buttons[0].0.x;
        assert!(app.window_buttons.iter().all(|(r, _)| r.x == first_col));
        assert!(app.window_buttons.windows(2).all(|w| w[0].0.y < w[1].0.y));
    }
}
