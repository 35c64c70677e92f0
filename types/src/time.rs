//! Millisecond timestamps.
//!
//! The chain reports Unix seconds; the client works in milliseconds so that
//! release-time comparisons line up with the wall clock.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in milliseconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimestampMillis(u64);

impl TimestampMillis {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Scale an on-chain seconds value to milliseconds.
    pub fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Parse an on-chain seconds string. `None` if it is not an unsigned integer.
    pub fn parse_secs(raw: &str) -> Option<Self> {
        raw.trim().parse::<u64>().ok().map(Self::from_secs)
    }

    /// Get the current system time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn as_secs(&self) -> u64 {
        self.0 / 1000
    }

    /// Whether this instant has been reached at `now` (equal counts as reached).
    pub fn has_passed(&self, now: TimestampMillis) -> bool {
        now.0 >= self.0
    }

    /// Milliseconds remaining until this instant, zero once passed.
    pub fn remaining_from(&self, now: TimestampMillis) -> u64 {
        self.0.saturating_sub(now.0)
    }

    fn to_utc(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0 as i64).single()
    }

    /// Local calendar date, e.g. `2023-11-14`.
    pub fn local_date(&self) -> String {
        self.to_utc()
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    /// Local date and time, e.g. `2023-11-14 22:13:20`.
    pub fn local_date_time(&self) -> String {
        self.to_utc()
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    /// RFC 3339 in UTC, used for JSON output.
    pub fn to_rfc3339(&self) -> String {
        self.to_utc()
            .map(|t| t.to_rfc3339())
            .unwrap_or_default()
    }
}

impl fmt::Display for TimestampMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
