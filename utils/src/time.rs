//! Time sources and formatting helpers.

use birthday_types::TimestampMillis;

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> TimestampMillis;
}

/// The system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimestampMillis {
        TimestampMillis::now()
    }
}

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Countdown label for a release time: `"ready"` once passed, otherwise
/// `"in 2d 3h"`. Unknown release times render as `"unknown"`.
pub fn format_countdown(release: Option<TimestampMillis>, now: TimestampMillis) -> String {
    match release {
        None => "unknown".to_string(),
        Some(r) if r.has_passed(now) => "ready".to_string(),
        Some(r) => {
            let remaining_ms = r.remaining_from(now);
            // round up so "in 0s" never shows before release
            format!("in {}", format_duration(remaining_ms.div_ceil(1000)))
        }
    }
}
