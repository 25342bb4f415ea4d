use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Settings for [`Resampled`](crate::Resampled).
///
/// Deserializes from any serde format with missing fields defaulted, so it
/// can be embedded in an application config file:
///
/// ```toml
/// min_packet_delay_ms = 500
/// timestamp_key = "datetime"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleConfig {
    /// Minimum time between two emitted records.
    pub min_packet_delay_ms: u64,
    /// Top-level key holding each record's timestamp.
    pub timestamp_key: String,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            min_packet_delay_ms: 300,
            timestamp_key: "datetime".to_owned(),
        }
    }
}

impl ResampleConfig {
    pub fn min_packet_delay(&self) -> TimeDelta {
        i64::try_from(self.min_packet_delay_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .unwrap_or(TimeDelta::MAX)
    }
}
