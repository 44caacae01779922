//! Latency chart.
//!
//! Two line series on a shared time axis. Each gap-free run of readings is
//! its own dataset so failed probes leave a visible break.

use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::chart::format_time_label;

/// Width below which fewer time labels are drawn.
const NARROW_CHART: u16 = 60;

/// Render the chart, or a loading placeholder when there are no samples.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Latency from my home network ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(data) = app.data.as_ref().filter(|d| !d.is_empty()) else {
        let placeholder = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };
    let model = &data.chart;

    let mut datasets = Vec::new();
    for series in &model.series {
        let style = Style::default().fg(app.theme.series_color(series.target));
        for (i, segment) in series.segments.iter().enumerate() {
            // A lone reading between two gaps has nothing to connect to
            let graph_type = if segment.len() > 1 {
                GraphType::Line
            } else {
                GraphType::Scatter
            };
            let mut dataset = Dataset::default()
                .marker(Marker::Braille)
                .graph_type(graph_type)
                .style(style)
                .data(segment);
            if i == 0 {
                dataset = dataset.name(series.target.label());
            }
            datasets.push(dataset);
        }
    }

    let [x_lo, x_hi] = model.x_bounds;
    let span = x_hi - x_lo;
    let tick_count = if area.width < NARROW_CHART { 3 } else { 5 };
    let x_labels: Vec<String> = model
        .x_ticks(tick_count)
        .into_iter()
        .map(|t| format_time_label(t, span, &Local))
        .collect();
    let y_labels: Vec<String> = model.y_ticks().into_iter().map(|v| format!("{:.0}", v)).collect();

    let axis_style = Style::default().fg(app.theme.border);
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds(model.x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Latency in ms")
                .style(axis_style)
                .bounds(model.y_bounds)
                .labels(y_labels),
        )
        .legend_position(Some(LegendPosition::TopRight));

    frame.render_widget(chart, area);
}
