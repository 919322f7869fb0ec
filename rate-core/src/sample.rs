use std::{fmt::Display, time::Duration};

/// A single measurement taken by the reporter
///
/// Each tick the reporter drains the bytes read since the previous tick and
/// records how much wall-clock time actually passed in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSample {
    interval_bytes: u64,
    elapsed: Duration,
    total: u64,
}

impl RateSample {
    pub fn new(interval_bytes: u64, elapsed: Duration, total: u64) -> Self {
        Self {
            interval_bytes,
            elapsed,
            total,
        }
    }

    /// Bytes read during this interval
    pub fn interval_bytes(&self) -> u64 {
        self.interval_bytes
    }

    /// Wall-clock time since the previous sample
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Bytes read since the reader was created, including this interval
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The instantaneous rate in bytes per second
    ///
    /// Returns `0.0` if no time has elapsed.
    pub fn rate(&self) -> f64 {
        if self.elapsed.is_zero() {
            return 0.0;
        }

        self.interval_bytes as f64 / self.elapsed.as_secs_f64()
    }
}

impl Display for RateSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} bytes in {:?} ({} total)",
            self.interval_bytes, self.elapsed, self.total
        )
    }
}
