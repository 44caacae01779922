//! Wire types for ping samples returned by the API.
//!
//! The API is loose about types: latencies and timestamps may arrive as
//! numbers or numeric strings, ids as strings or numbers. Everything is
//! coerced on the way in so the rest of the crate only sees numbers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One ping measurement covering both probes at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Opaque identifier, unique per sample.
    #[serde(default, deserialize_with = "coerce_id")]
    pub id: String,

    /// Epoch milliseconds when the sample was taken.
    /// Non-numeric values become NaN and are dropped by the chart.
    #[serde(default = "missing_time", deserialize_with = "coerce_time")]
    pub ping_time: f64,

    /// Probe against the local gateway.
    #[serde(default)]
    pub gateway: Probe,

    /// Probe against the external host (8.8.8.8).
    #[serde(default)]
    pub google: Probe,
}

/// Result of a single ping probe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    /// Round trip in milliseconds, as reported. Zero, negative or missing
    /// means the probe failed.
    #[serde(default, deserialize_with = "coerce_latency")]
    pub latency: Option<f64>,

    /// Address that was pinged.
    #[serde(default)]
    pub ip: String,
}

impl Probe {
    /// Returns the latency if this probe produced a usable reading.
    pub fn reading(&self) -> Option<f64> {
        self.latency.filter(|l| l.is_finite() && *l > 0.0)
    }

    /// Whether the probe succeeded.
    pub fn is_up(&self) -> bool {
        self.reading().is_some()
    }
}

impl Sample {
    /// Build a sample from bare latencies. Mostly useful for tests and
    /// channel-fed sources.
    pub fn new(id: impl Into<String>, ping_time: f64, gateway: f64, google: f64) -> Self {
        Self {
            id: id.into(),
            ping_time,
            gateway: Probe {
                latency: Some(gateway),
                ip: String::new(),
            },
            google: Probe {
                latency: Some(google),
                ip: "8.8.8.8".to_string(),
            },
        }
    }
}

/// Which probe of a sample a series or statistic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// The external host, 8.8.8.8.
    Google,
    /// The local gateway.
    Gateway,
}

impl Target {
    /// Display order: external host first, as in the chart legend.
    pub const ALL: [Target; 2] = [Target::Google, Target::Gateway];

    /// Series name.
    pub fn label(self) -> &'static str {
        match self {
            Target::Google => "8.8.8.8",
            Target::Gateway => "Gateway",
        }
    }

    /// The probe this target refers to within a sample.
    pub fn probe(self, sample: &Sample) -> &Probe {
        match self {
            Target::Google => &sample.google,
            Target::Gateway => &sample.gateway,
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_latency<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value))
}

fn missing_time() -> f64 {
    f64::NAN
}

fn coerce_time<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value).unwrap_or(f64::NAN))
}

fn coerce_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sample() {
        let json = r#"{
            "id": "abc-1",
            "ping_time": 1700000000000,
            "gateway": { "latency": 2.5, "ip": "192.168.1.1" },
            "google": { "latency": 14, "ip": "8.8.8.8" }
        }"#;

        let sample: Sample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.id, "abc-1");
        assert_eq!(sample.ping_time, 1_700_000_000_000.0);
        assert_eq!(sample.gateway.reading(), Some(2.5));
        assert_eq!(sample.gateway.ip, "192.168.1.1");
        assert_eq!(sample.google.reading(), Some(14.0));
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let json = r#"{
            "id": 42,
            "ping_time": "1700000000000",
            "gateway": { "latency": "3.25", "ip": "10.0.0.1" },
            "google": { "latency": "-1", "ip": "8.8.8.8" }
        }"#;

        let sample: Sample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.id, "42");
        assert_eq!(sample.ping_time, 1_700_000_000_000.0);
        assert_eq!(sample.gateway.reading(), Some(3.25));
        assert_eq!(sample.google.latency, Some(-1.0));
        assert!(!sample.google.is_up());
    }

    #[test]
    fn test_missing_and_null_latency_is_failed_probe() {
        let json = r#"{
            "id": "x",
            "ping_time": 1,
            "gateway": { "latency": null, "ip": "" },
            "google": { "ip": "8.8.8.8" }
        }"#;

        let sample: Sample = serde_json::from_str(json).unwrap();
        assert!(sample.gateway.latency.is_none());
        assert!(!sample.gateway.is_up());
        assert!(!sample.google.is_up());
    }

    #[test]
    fn test_zero_latency_is_not_a_reading() {
        let probe = Probe {
            latency: Some(0.0),
            ip: String::new(),
        };
        assert_eq!(probe.reading(), None);
    }

    #[test]
    fn test_garbage_ping_time_becomes_nan() {
        let json = r#"{ "id": "x", "ping_time": "soon" }"#;
        let sample: Sample = serde_json::from_str(json).unwrap();
        assert!(sample.ping_time.is_nan());
    }

    #[test]
    fn test_missing_ping_time_keeps_sample() {
        let json = r#"[
            { "id": 1, "gateway": { "latency": 3 }, "google": { "latency": 20 } },
            { "id": 2, "ping_time": 1000, "gateway": { "latency": 4 } }
        ]"#;
        let samples: Vec<Sample> = serde_json::from_str(json).unwrap();
        assert_eq!(samples.len(), 2);
        assert!(samples[0].ping_time.is_nan());
        assert_eq!(samples[0].google.reading(), Some(20.0));
        assert_eq!(samples[1].ping_time, 1000.0);
    }
}
