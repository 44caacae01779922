//! Chart shaping: samples in, plot-ready series out.
//!
//! Failed probes become gaps. ratatui connects every point inside a dataset,
//! so each series is split into segments of consecutive readings and the
//! renderer draws one dataset per segment.

use chrono::TimeZone;
use serde::Serialize;

use super::sample::{Sample, Target};

/// Default spacing of latency gridlines in milliseconds.
pub const DEFAULT_GRIDLINE_MS: f64 = 100.0;

/// Upper bound on y-axis labels before the gridline step is widened.
const MAX_Y_TICKS: usize = 8;

/// Padding applied around a single-instant x range (ms).
const X_PAD_MS: f64 = 1_000.0;

/// A sample reduced to what the chart plots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub id: String,
    pub ping_time: f64,
    /// `None` draws a gap.
    pub gateway: Option<f64>,
    /// `None` draws a gap.
    pub google: Option<f64>,
}

impl ChartPoint {
    /// Value plotted for a target at this point.
    pub fn value(&self, target: Target) -> Option<f64> {
        match target {
            Target::Google => self.google,
            Target::Gateway => self.gateway,
        }
    }
}

/// Map samples to chart points sorted by `ping_time`.
///
/// The output has one point per input sample. Readings that are zero,
/// negative or missing are `None`.
pub fn to_chart_points(samples: &[Sample]) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = samples
        .iter()
        .map(|s| ChartPoint {
            id: s.id.clone(),
            ping_time: s.ping_time,
            gateway: s.gateway.reading(),
            google: s.google.reading(),
        })
        .collect();

    points.sort_by(|a, b| a.ping_time.total_cmp(&b.ping_time));
    points
}

/// One line series, broken into runs of consecutive readings.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub target: Target,
    pub segments: Vec<Vec<(f64, f64)>>,
}

impl Series {
    fn build(target: Target, points: &[ChartPoint]) -> Self {
        let mut segments = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();

        for point in points {
            match point.value(target) {
                Some(y) if point.ping_time.is_finite() => current.push((point.ping_time, y)),
                _ => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        Self { target, segments }
    }

    /// Largest plotted latency.
    fn max_y(&self) -> Option<f64> {
        self.segments.iter().flatten().map(|(_, y)| *y).reduce(f64::max)
    }
}

/// Everything the chart widget needs, derived once per sample set.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub points: Vec<ChartPoint>,
    /// External host first, then gateway.
    pub series: Vec<Series>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Spacing between y-axis labels, a multiple of the gridline interval.
    pub y_step: f64,
}

impl ChartModel {
    /// Build the chart model for a sample set.
    pub fn build(samples: &[Sample], gridline_ms: f64) -> Self {
        let points = to_chart_points(samples);
        let series: Vec<Series> = Target::ALL.iter().map(|t| Series::build(*t, &points)).collect();

        let x_bounds = x_bounds(&points);
        let max_y = series.iter().filter_map(Series::max_y).reduce(f64::max).unwrap_or(0.0);
        let (y_step, y_top) = y_scale(max_y, gridline_ms);

        Self {
            points,
            series,
            x_bounds,
            y_bounds: [0.0, y_top],
            y_step,
        }
    }

    /// True when there is nothing to plot yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Latency values at which y labels are drawn, bottom to top.
    pub fn y_ticks(&self) -> Vec<f64> {
        let steps = (self.y_bounds[1] / self.y_step).round() as usize;
        (0..=steps).map(|i| i as f64 * self.y_step).collect()
    }

    /// `count` evenly spaced timestamps across the x range.
    pub fn x_ticks(&self, count: usize) -> Vec<f64> {
        let [lo, hi] = self.x_bounds;
        match count {
            0 => Vec::new(),
            1 => vec![lo],
            n => (0..n).map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64).collect(),
        }
    }
}

fn x_bounds(points: &[ChartPoint]) -> [f64; 2] {
    let mut times = points.iter().map(|p| p.ping_time).filter(|t| t.is_finite());
    let Some(first) = times.next() else {
        return [0.0, 1.0];
    };
    let (lo, hi) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    if hi > lo {
        [lo, hi]
    } else {
        [lo - X_PAD_MS, hi + X_PAD_MS]
    }
}

/// Pick a label step (a multiple of `gridline`) and the axis top.
fn y_scale(max_y: f64, gridline: f64) -> (f64, f64) {
    let gridline = if gridline.is_finite() && gridline > 0.0 {
        gridline
    } else {
        DEFAULT_GRIDLINE_MS
    };
    let multiple = (max_y / (gridline * MAX_Y_TICKS as f64)).ceil().max(1.0);
    let step = gridline * multiple;
    let top = ((max_y / step).ceil() * step).max(step);
    (step, top)
}

/// Format an epoch-millisecond timestamp for the x axis.
///
/// Precision follows the span of the axis: seconds for short windows,
/// dates for multi-day ones.
pub fn format_time_label<Tz: TimeZone>(ms: f64, span_ms: f64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(time) = tz.timestamp_millis_opt(ms as i64).single() else {
        return String::new();
    };
    let fmt = if span_ms <= 10.0 * 60_000.0 {
        "%H:%M:%S"
    } else if span_ms <= 24.0 * 3_600_000.0 {
        "%H:%M"
    } else {
        "%m-%d %H:%M"
    };
    time.format(fmt).to_string()
}
