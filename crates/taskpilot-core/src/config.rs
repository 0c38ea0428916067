//! Runtime configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default reminder scan interval.
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 60;

/// Fixed default width of a mirrored calendar event. The task model has no
/// duration field, so this is a deliberate placeholder, exposed here rather
/// than buried in event construction.
pub const DEFAULT_EVENT_DURATION_MINS: u64 = 60;

/// Default timeout applied to every external call (credential fetch,
/// provider round-trip).
pub const DEFAULT_EXTERNAL_TIMEOUT_SECS: u64 = 10;

/// Knobs for the scheduler and the calendar bridge.
///
/// Deserializes from JSON/TOML with every field optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds between reminder scans.
    pub scan_interval_secs: u64,

    /// Minutes a mirrored event spans, starting at the task's due time.
    pub event_duration_mins: u64,

    /// Calendar to mirror events into.
    pub calendar_id: String,

    /// Seconds before an external call is abandoned.
    pub external_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_interval_secs: DEFAULT_SCAN_INTERVAL_SECS,
            event_duration_mins: DEFAULT_EVENT_DURATION_MINS,
            calendar_id: "primary".to_string(),
            external_timeout_secs: DEFAULT_EXTERNAL_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    pub fn event_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.event_duration_mins as i64)
    }

    pub fn external_timeout(&self) -> Duration {
        Duration::from_secs(self.external_timeout_secs)
    }
}
