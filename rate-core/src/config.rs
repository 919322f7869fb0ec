use serde::{Deserialize, Serialize};
use std::time::Duration;

pub(crate) const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Configuration of a [`MonitoredReader`](crate::MonitoredReader)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// The time between two samples in milliseconds
    ///
    /// `0` selects the default of 500ms.
    interval_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
        }
    }
}

impl MonitorConfig {
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms }
    }

    /// Return the sampling interval
    pub fn interval(&self) -> Duration {
        match self.interval_ms {
            0 => DEFAULT_INTERVAL,
            ms => Duration::from_millis(ms),
        }
    }
}
