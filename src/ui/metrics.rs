//! Statistics panel.
//!
//! Shows high/low/average latency for each target and how long the
//! internet path was down while the gateway stayed reachable.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::stats::format_ms;
use crate::data::{LatencyStats, Target};

/// Panel height when stacked above the chart.
pub const STACKED_HEIGHT: u16 = 7;

/// Render the statistics panel.
///
/// In row layout the sections are listed top to bottom; stacked, they sit
/// side by side.
pub fn render(frame: &mut Frame, app: &App, area: Rect, direction: Direction) {
    let block = Block::default()
        .title(" Stats ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut sections: Vec<Vec<Line>> = Target::ALL
        .iter()
        .map(|target| target_lines(app, *target))
        .collect();
    sections.push(downtime_lines(app));

    match direction {
        Direction::Horizontal => {
            let mut lines = Vec::new();
            for (i, section) in sections.into_iter().enumerate() {
                if i > 0 {
                    lines.push(Line::from(""));
                }
                lines.extend(section);
            }
            frame.render_widget(Paragraph::new(lines), inner);
        }
        Direction::Vertical => {
            let columns =
                Layout::horizontal(sections.iter().map(|_| Constraint::Fill(1))).split(inner);
            for (section, column) in sections.into_iter().zip(columns.iter()) {
                frame.render_widget(Paragraph::new(section), *column);
            }
        }
    }
}

fn target_lines(app: &App, target: Target) -> Vec<Line<'static>> {
    let stats = app.data.as_ref().and_then(|d| d.stats.target(target).copied());
    let value = |f: fn(&LatencyStats) -> f64| {
        stats.as_ref().map(|s| format_ms(f(s))).unwrap_or_else(|| "-".to_string())
    };

    vec![
        Line::from(Span::styled(
            target.label(),
            Style::default()
                .fg(app.theme.series_color(target))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("High: {}", value(|s| s.high))),
        Line::from(format!("Low: {}", value(|s| s.low))),
        Line::from(format!("Average (Mean): {}", value(|s| s.average))),
    ]
}

fn downtime_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled("Downtime", app.theme.header))];

    let Some(ref data) = app.data else {
        lines.push(Line::from("-"));
        return lines;
    };
    let downtime = data.stats.downtime;

    let elapsed_style = if downtime.samples > 0 {
        Style::default().fg(app.theme.down).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    lines.push(Line::from(vec![
        Span::raw("Time: "),
        Span::styled(downtime.elapsed_label(app.sample_cadence), elapsed_style),
    ]));
    if let Some(ratio) = downtime.ratio_label() {
        lines.push(Line::from(format!("Ratio: {}", ratio)));
    }
    lines.push(Line::from(format!("{} of {} samples", downtime.samples, downtime.total)));
    lines
}
