//! Time window selector.
//!
//! One button per [`TimeWindow`]. The active window's button is drawn
//! disabled. Button areas are recorded on the app for mouse hit-testing.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::TimeWindow;

/// Render the window buttons, in a row or a column.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect, direction: Direction) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = match direction {
        Direction::Horizontal => {
            Layout::horizontal(TimeWindow::ALL.iter().map(|_| Constraint::Fill(1))).split(inner)
        }
        Direction::Vertical => {
            Layout::vertical(TimeWindow::ALL.iter().map(|_| Constraint::Length(1))).split(inner)
        }
    };

    app.window_buttons.clear();
    for (i, (window, cell)) in TimeWindow::ALL.iter().zip(cells.iter()).enumerate() {
        let active = *window == app.window;
        let style = if active {
            app.theme.button_disabled
        } else {
            app.theme.button
        };
        let mut label = format!("{} {}", i + 1, window.label());
        if label.len() > cell.width as usize {
            label = format!("{} {}", i + 1, window.short_label());
        }
        let text = if active {
            Paragraph::new(label).style(style.add_modifier(Modifier::CROSSED_OUT))
        } else {
            Paragraph::new(label).style(style)
        };
        frame.render_widget(text.alignment(Alignment::Center), *cell);

        if !active {
            app.window_buttons.push((*cell, *window));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tests::{app_with_samples, buffer_text, draw_to_buffer};

    #[test]
    fn test_active_window_is_not_clickable() {
        let mut app = app_with_samples(Vec::new());
        draw_to_buffer(&mut app, 140, 30);

        let clickable: Vec<TimeWindow> = app.window_buttons.iter().map(|(_, w)| *w).collect();
        assert_eq!(clickable.len(), TimeWindow::ALL.len() - 1);
        assert!(!clickable.contains(&TimeWindow::Hour));
    }

    #[test]
    fn test_labels_rendered() {
        let mut app = app_with_samples(Vec::new());
        let text = buffer_text(&draw_to_buffer(&mut app, 60, 50));
        for window in TimeWindow::ALL {
            assert!(text.contains(window.label()), "missing {}", window.label());
        }
    }
}
