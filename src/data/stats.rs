//! Latency and downtime statistics over the current sample set.
//!
//! A sample only counts toward latency statistics when its external-host
//! probe succeeded. Within that set, each target aggregates its own positive
//! readings. Failed probes still count toward downtime.

use std::time::Duration;

use serde::Serialize;

use super::duration::format_clock;
use super::sample::{Sample, Target};

/// High/low/average latency for one target, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencyStats {
    pub high: f64,
    pub low: f64,
    /// Floor of the arithmetic mean.
    pub average: f64,
    /// Readings aggregated.
    pub count: usize,
}

impl LatencyStats {
    /// Aggregate readings. Returns `None` when there are none.
    pub fn from_readings<I>(readings: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = readings.into_iter();
        let first = iter.next()?;

        let (high, low, sum, count) = iter.fold((first, first, first, 1usize), |acc, v| {
            (acc.0.max(v), acc.1.min(v), acc.2 + v, acc.3 + 1)
        });

        Some(Self {
            high,
            low,
            average: (sum / count as f64).floor(),
            count,
        })
    }
}

/// Samples where the gateway answered but the external host did not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Downtime {
    /// Samples with local network up and internet path down.
    pub samples: usize,
    /// All samples considered.
    pub total: usize,
}

impl Downtime {
    /// Count downtime samples.
    pub fn count(samples: &[Sample]) -> Self {
        let down = samples.iter().filter(|s| s.gateway.is_up() && !s.google.is_up()).count();
        Self {
            samples: down,
            total: samples.len(),
        }
    }

    /// Approximate time spent down, one cadence per downtime sample.
    pub fn elapsed(&self, cadence: Duration) -> Duration {
        cadence.saturating_mul(self.samples.min(u32::MAX as usize) as u32)
    }

    /// Elapsed downtime as `m:ss`.
    pub fn elapsed_label(&self, cadence: Duration) -> String {
        format_clock(self.elapsed(cadence))
    }

    /// Fraction of samples that were down.
    pub fn ratio(&self) -> Option<f64> {
        (self.total > 0).then(|| self.samples as f64 / self.total as f64)
    }

    /// Ratio fixed to four decimal places, absent for an empty set.
    pub fn ratio_label(&self) -> Option<String> {
        self.ratio().map(|r| format!("{:.4}", r))
    }
}

/// All statistics shown beside the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkStats {
    pub google: Option<LatencyStats>,
    pub gateway: Option<LatencyStats>,
    pub downtime: Downtime,
}

impl NetworkStats {
    /// Compute statistics for a sample set. Never panics on empty input.
    pub fn compute(samples: &[Sample]) -> Self {
        let reachable: Vec<&Sample> = samples.iter().filter(|s| s.google.is_up()).collect();

        let for_target = |target: Target| {
            LatencyStats::from_readings(reachable.iter().filter_map(|s| target.probe(s).reading()))
        };

        Self {
            google: for_target(Target::Google),
            gateway: for_target(Target::Gateway),
            downtime: Downtime::count(samples),
        }
    }

    /// Stats for one target.
    pub fn target(&self, target: Target) -> Option<&LatencyStats> {
        match target {
            Target::Google => self.google.as_ref(),
            Target::Gateway => self.gateway.as_ref(),
        }
    }
}

/// Format a latency for display, dropping needless decimals.
pub fn format_ms(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0} ms", value)
    } else {
        format!("{:.2} ms", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(gateway: f64, google: f64) -> Sample {
        Sample::new("id", 0.0, gateway, google)
    }

    #[test]
    fn test_average_is_floor_of_mean() {
        let stats = LatencyStats::from_readings([10.0, 20.0, 30.0]).unwrap();
        assert_eq!(stats.average, 20.0);
        assert_eq!(stats.high, 30.0);
        assert_eq!(stats.low, 10.0);
        assert_eq!(stats.count, 3);

        let stats = LatencyStats::from_readings([10.0, 11.0]).unwrap();
        assert_eq!(stats.average, 10.0);
    }

    #[test]
    fn test_compute_over_successful_probes() {
        let samples = vec![sample(1.0, 10.0), sample(2.0, 20.0), sample(3.0, 30.0)];
        let stats = NetworkStats::compute(&samples);

        let google = stats.google.unwrap();
        assert_eq!((google.low, google.high, google.average), (10.0, 30.0, 20.0));

        let gateway = stats.gateway.unwrap();
        assert_eq!((gateway.low, gateway.high, gateway.average), (1.0, 3.0, 2.0));
    }

    #[test]
    fn test_external_failure_excludes_sample_for_both_targets() {
        // The 90ms gateway reading arrived while 8.8.8.8 was unreachable.
        let samples = vec![sample(90.0, 0.0), sample(2.0, 20.0), sample(4.0, 40.0)];
        let stats = NetworkStats::compute(&samples);

        let gateway = stats.gateway.unwrap();
        assert_eq!(gateway.high, 4.0);
        assert_eq!(gateway.count, 2);
        assert_eq!(stats.google.unwrap().low, 20.0);
    }

    #[test]
    fn test_gateway_failure_does_not_drag_average_down() {
        let samples = vec![sample(-1.0, 20.0), sample(4.0, 40.0)];
        let stats = NetworkStats::compute(&samples);

        let gateway = stats.gateway.unwrap();
        assert_eq!(gateway.average, 4.0);
        assert_eq!(gateway.low, 4.0);
        assert_eq!(stats.google.unwrap().count, 2);
    }

    #[test]
    fn test_empty_input_is_absent() {
        let stats = NetworkStats::compute(&[]);
        assert!(stats.google.is_none());
        assert!(stats.gateway.is_none());
        assert_eq!(stats.downtime.samples, 0);
        assert_eq!(stats.downtime.ratio_label(), None);
    }

    #[test]
    fn test_all_failed_probes_is_absent() {
        let samples = vec![sample(0.0, 0.0), sample(-1.0, -1.0)];
        let stats = NetworkStats::compute(&samples);
        assert!(stats.google.is_none());
        assert!(stats.gateway.is_none());
        assert_eq!(stats.downtime.ratio_label().as_deref(), Some("0.0000"));
    }

    #[test]
    fn test_downtime_counts_gateway_up_internet_down() {
        let samples = vec![sample(5.0, 0.0), sample(5.0, 5.0)];
        let downtime = Downtime::count(&samples);
        assert_eq!(downtime.samples, 1);
        assert_eq!(downtime.total, 2);
        assert_eq!(downtime.ratio_label().as_deref(), Some("0.5000"));
    }

    #[test]
    fn test_downtime_ignores_full_outage() {
        // Gateway down too: the local network is out, not the internet path.
        let samples = vec![sample(0.0, 0.0), sample(5.0, 5.0)];
        assert_eq!(Downtime::count(&samples).samples, 0);
    }

    #[test]
    fn test_downtime_elapsed_label() {
        let downtime = Downtime {
            samples: 13,
            total: 100,
        };
        let cadence = Duration::from_secs(10);
        assert_eq!(downtime.elapsed(cadence), Duration::from_secs(130));
        assert_eq!(downtime.elapsed_label(cadence), "2:10");
    }

    #[test]
    fn test_format_ms() {
        assert_eq!(format_ms(12.0), "12 ms");
        assert_eq!(format_ms(12.5), "12.50 ms");
    }
}
