//! Common UI components shared across the dashboard.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_age;

use super::{MIN_HEIGHT, MIN_WIDTH};

/// Render the header bar.
///
/// Displays: source, active window, sample count.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let samples = match app.data {
        Some(ref data) => format!("{} samples", data.len()),
        None => "Loading...".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(" PINGWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(app.window.label(), Style::default().fg(app.theme.highlight)),
        Span::raw(" │ "),
        Span::raw(samples),
        Span::raw(" │ "),
        Span::styled(
            app.source_description().to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows time since last update and available controls, or a temporary
/// status message. Fetch errors are not shown; stale data simply ages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = "1-6:window ←/→:cycle r:refresh e:export ?:help q:quit";
    let status = match app.data {
        Some(ref data) => format!(
            " Updated {} ago | {}",
            format_age(data.last_updated.elapsed()),
            controls
        ),
        None => format!(" Loading... | {}", controls),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render a notice when the terminal is below the minimum size.
pub fn render_too_small(frame: &mut Frame, area: Rect) {
    let msg = format!(
        "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );
    let paragraph = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    let height = 5u16.min(area.height);
    let centered = Rect::new(area.x, area.y + (area.height - height) / 2, area.width, height);
    frame.render_widget(paragraph, centered);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Time window",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  1-6         Select window"),
        Line::from("  ←/→ h/l     Shorter/longer window"),
        Line::from("  click       Select window"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Fetch now"),
        Line::from("  e           Export to JSON"),
        Line::from("  q/Esc       Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 16u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
