//! Derived dashboard data for one sample set.
//!
//! Built once whenever a poll replaces the samples, so the chart and
//! statistics are not recomputed on every frame.

use std::time::Instant;

use anyhow::Result;

use super::chart::ChartModel;
use super::sample::Sample;
use super::stats::NetworkStats;
use super::window::TimeWindow;

/// Samples plus everything derived from them.
#[derive(Debug, Clone)]
pub struct PingData {
    pub samples: Vec<Sample>,
    pub chart: ChartModel,
    pub stats: NetworkStats,
    pub last_updated: Instant,
}

impl PingData {
    /// Derive chart and statistics from a fresh sample set.
    pub fn from_samples(samples: Vec<Sample>, gridline_ms: f64) -> Self {
        let chart = ChartModel::build(&samples, gridline_ms);
        let stats = NetworkStats::compute(&samples);
        Self {
            samples,
            chart,
            stats,
            last_updated: Instant::now(),
        }
    }

    /// Parse a JSON array of samples.
    pub fn parse(content: &str, gridline_ms: f64) -> Result<Self> {
        let samples: Vec<Sample> = serde_json::from_str(content)?;
        Ok(Self::from_samples(samples, gridline_ms))
    }

    /// Number of samples held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples have arrived.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Export statistics and chart points as a JSON document.
    pub fn to_export_json(&self, window: TimeWindow) -> serde_json::Value {
        serde_json::json!({
            "window": window,
            "lookback_secs": window.lookback().as_secs(),
            "sample_count": self.samples.len(),
            "stats": self.stats,
            "downtime_ratio": self.stats.downtime.ratio_label(),
            "points": self.chart.points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_derives_chart_and_stats() {
        let json = r#"[
            {"id":"b","ping_time":2000,"gateway":{"latency":5,"ip":"g"},"google":{"latency":0,"ip":"8.8.8.8"}},
            {"id":"a","ping_time":1000,"gateway":{"latency":5,"ip":"g"},"google":{"latency":5,"ip":"8.8.8.8"}}
        ]"#;

        let data = PingData::parse(json, 100.0).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.chart.points[0].id, "a");
        assert_eq!(data.stats.downtime.samples, 1);
        assert_eq!(data.stats.downtime.ratio_label().as_deref(), Some("0.5000"));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(PingData::parse("{\"message\":\"Internal error\"}", 100.0).is_err());
    }

    #[test]
    fn test_export_json_shape() {
        let data = PingData::from_samples(vec![Sample::new("a", 1.0, 2.0, 3.0)], 100.0);
        let export = data.to_export_json(TimeWindow::Day);

        assert_eq!(export["window"], "day");
        assert_eq!(export["sample_count"], 1);
        assert_eq!(export["stats"]["google"]["high"], 3.0);
        assert_eq!(export["downtime_ratio"], "0.0000");
        assert_eq!(export["points"][0]["gateway"], 2.0);
    }
}
