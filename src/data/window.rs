//! Selectable lookback windows.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Seconds between samples produced by the pinger.
pub const SAMPLE_CADENCE_SECS: u64 = 10;

/// User-selected lookback controlling both the fetch cutoff and the
/// requested page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeWindow {
    Minute,
    TenMinutes,
    #[default]
    Hour,
    Day,
    Week,
    Month,
}

impl TimeWindow {
    /// All windows in display order.
    pub const ALL: [TimeWindow; 6] = [
        TimeWindow::Minute,
        TimeWindow::TenMinutes,
        TimeWindow::Hour,
        TimeWindow::Day,
        TimeWindow::Week,
        TimeWindow::Month,
    ];

    /// How far back the window reaches.
    pub fn lookback(self) -> Duration {
        let secs = match self {
            TimeWindow::Minute => 60,
            TimeWindow::TenMinutes => 10 * 60,
            TimeWindow::Hour => 60 * 60,
            TimeWindow::Day => 24 * 60 * 60,
            TimeWindow::Week => 7 * 24 * 60 * 60,
            TimeWindow::Month => 30 * 24 * 60 * 60,
        };
        Duration::from_secs(secs)
    }

    /// Number of samples expected in the window at the pinger's cadence.
    pub fn page_size(self) -> u64 {
        self.lookback().as_secs() / SAMPLE_CADENCE_SECS
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Minute => "Last Minute",
            TimeWindow::TenMinutes => "Last 10 Minutes",
            TimeWindow::Hour => "Last Hour",
            TimeWindow::Day => "Last Day",
            TimeWindow::Week => "Last Week",
            TimeWindow::Month => "Last Month",
        }
    }

    /// Compact label for cramped layouts.
    pub fn short_label(self) -> &'static str {
        match self {
            TimeWindow::Minute => "1m",
            TimeWindow::TenMinutes => "10m",
            TimeWindow::Hour => "1h",
            TimeWindow::Day => "1d",
            TimeWindow::Week => "7d",
            TimeWindow::Month => "30d",
        }
    }

    /// Position in [`TimeWindow::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|w| *w == self).unwrap_or(0)
    }

    /// Window for a 1-based hotkey digit.
    pub fn from_hotkey(digit: char) -> Option<Self> {
        let n = digit.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Cycle to the next (longer) window.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous (shorter) window.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeWindow::Minute => "minute",
            TimeWindow::TenMinutes => "ten-minutes",
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
        };
        f.write_str(name)
    }
}

impl FromStr for TimeWindow {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "minute" | "1m" => Ok(TimeWindow::Minute),
            "ten-minutes" | "10m" => Ok(TimeWindow::TenMinutes),
            "hour" | "1h" => Ok(TimeWindow::Hour),
            "day" | "1d" => Ok(TimeWindow::Day),
            "week" | "7d" => Ok(TimeWindow::Week),
            "month" | "30d" => Ok(TimeWindow::Month),
            other => bail!("Unknown time window: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_sizes_match_sample_cadence() {
        assert_eq!(TimeWindow::Minute.page_size(), 6);
        assert_eq!(TimeWindow::TenMinutes.page_size(), 60);
        assert_eq!(TimeWindow::Hour.page_size(), 360);
        assert_eq!(TimeWindow::Day.page_size(), 8640);
        assert_eq!(TimeWindow::Week.page_size(), 60480);
        assert_eq!(TimeWindow::Month.page_size(), 259200);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(TimeWindow::Month.next(), TimeWindow::Minute);
        assert_eq!(TimeWindow::Minute.prev(), TimeWindow::Month);
        assert_eq!(TimeWindow::Hour.next(), TimeWindow::Day);
    }

    #[test]
    fn test_hotkeys() {
        assert_eq!(TimeWindow::from_hotkey('1'), Some(TimeWindow::Minute));
        assert_eq!(TimeWindow::from_hotkey('6'), Some(TimeWindow::Month));
        assert_eq!(TimeWindow::from_hotkey('0'), None);
        assert_eq!(TimeWindow::from_hotkey('7'), None);
    }

    #[test]
    fn test_parse_round_trips_display() {
        for window in TimeWindow::ALL {
            assert_eq!(window.to_string().parse::<TimeWindow>().unwrap(), window);
        }
        assert!("fortnight".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn test_default_is_hour() {
        assert_eq!(TimeWindow::default(), TimeWindow::Hour);
    }
}
