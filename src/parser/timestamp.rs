//! Timestamp parsing and time ranges.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Formats accepted for timestamps that carry no offset (assumed UTC)
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp
///
/// Accepts RFC 3339 with any offset, and offset-less timestamps which
/// are taken as UTC. Returns `None` instead of an error; callers count
/// the miss as an unparsed record.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// A closed-open time window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range, swapping the bounds if they arrive reversed
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// Range of length `lookback` ending at `now`
    ///
    /// `now` is passed in rather than read from the clock so the
    /// transforms stay deterministic. A lookback reaching past the
    /// earliest representable instant is clamped to it.
    pub fn lookback(lookback: Duration, now: DateTime<Utc>) -> Self {
        let start = now.checked_sub_signed(lookback).unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self::new(start, now)
    }

    pub fn width_ms(&self) -> i64 {
        (self.end - self.start).num_milliseconds()
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t < self.end
    }
}
