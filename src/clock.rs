//! Kernel tick rate used to convert jiffies to seconds.

use serde::{Deserialize, Serialize};

/// Fallback tick rate when the platform does not report one.
pub const DEFAULT_TICKS_PER_SECOND: u64 = 100;

/// Ticks per second, read once at startup and passed to the parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct ClockTicks(u64);

impl ClockTicks {
    /// Zero is clamped to one so tick conversions never divide by zero.
    pub fn new(ticks_per_second: u64) -> Self {
        Self(ticks_per_second.max(1))
    }

    /// Queries the system clock tick rate (usually 100, but can vary).
    pub fn detect() -> Self {
        #[cfg(unix)]
        {
            // SAFETY: sysconf is safe to call with _SC_CLK_TCK
            // Returns -1 on error, 0 if undefined - both are handled by the > 0 check
            let tck = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
            if tck > 0 {
                return Self(tck as u64);
            }
        }
        Self(DEFAULT_TICKS_PER_SECOND)
    }

    pub fn per_second(self) -> u64 {
        self.0
    }

    /// Whole seconds in `ticks`, truncated.
    pub fn to_seconds(self, ticks: u64) -> u64 {
        ticks / self.0
    }

    pub fn to_seconds_f64(self, ticks: u64) -> f64 {
        ticks as f64 / self.0 as f64
    }
}

impl From<u64> for ClockTicks {
    fn from(ticks_per_second: u64) -> Self {
        Self::new(ticks_per_second)
    }
}

impl From<ClockTicks> for u64 {
    fn from(clock: ClockTicks) -> Self {
        clock.0
    }
}

impl Default for ClockTicks {
    fn default() -> Self {
        Self(DEFAULT_TICKS_PER_SECOND)
    }
}
