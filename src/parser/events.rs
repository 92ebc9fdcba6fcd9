//! Health/usage events and their status categories.

use super::schema::{RawEvent, RawRecord, RawStatusSequence};
use super::timestamp::{parse_timestamp, TimeRange};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status category of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Success,
    Failed,
    Skipped,
    Started,
    Healthy,
    Warning,
    Unhealthy,
    Unknown,
}

/// Bucket a category is counted under in a cell breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
    Skipped,
    Other,
}

impl Category {
    pub fn outcome(self) -> Outcome {
        match self {
            Category::Success | Category::Healthy => Outcome::Success,
            Category::Failed | Category::Unhealthy => Outcome::Failed,
            Category::Skipped | Category::Warning => Outcome::Skipped,
            Category::Started | Category::Unknown => Outcome::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Failed => "failed",
            Category::Skipped => "skipped",
            Category::Started => "started",
            Category::Healthy => "healthy",
            Category::Warning => "warning",
            Category::Unhealthy => "unhealthy",
            Category::Unknown => "unknown",
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    /// Case-insensitive; anything unrecognised becomes `Unknown`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = match s.trim().to_ascii_lowercase().as_str() {
            "success" => Category::Success,
            "failed" => Category::Failed,
            "skipped" => Category::Skipped,
            "started" => Category::Started,
            "healthy" => Category::Healthy,
            "warning" => Category::Warning,
            "unhealthy" => Category::Unhealthy,
            _ => Category::Unknown,
        };
        Ok(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single timestamped health/usage event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub status: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl Event {
    pub fn new(timestamp: DateTime<Utc>, status: Category) -> Self {
        Self {
            timestamp,
            status,
            latency_ms: None,
            status_code: None,
            error_type: None,
        }
    }
}

/// Result of parsing raw events
#[derive(Debug, Clone, Default)]
pub struct ParsedEvents {
    pub events: Vec<Event>,

    /// Records skipped because they were malformed or their timestamp
    /// could not be parsed
    pub unparsed: usize,
}

/// Parse raw events into domain events
///
/// **Public** - main entry point for event input
///
/// Input order is preserved. Malformed records and records with an
/// unparsable timestamp are skipped and counted in `unparsed`; unknown
/// or missing status strings are kept as `Category::Unknown`.
pub fn parse_events(raw: &[RawRecord<RawEvent>]) -> ParsedEvents {
    let mut parsed = ParsedEvents {
        events: Vec::with_capacity(raw.len()),
        unparsed: 0,
    };

    for (index, record) in raw.iter().enumerate() {
        let record = match record {
            RawRecord::Valid(record) => record,
            RawRecord::Malformed(value) => {
                warn!("Skipping event {}: malformed record {}", index, value);
                parsed.unparsed += 1;
                continue;
            }
        };

        let Some(timestamp) = parse_timestamp(&record.timestamp) else {
            warn!("Skipping event {}: unparsable timestamp '{}'", index, record.timestamp);
            parsed.unparsed += 1;
            continue;
        };

        // Infallible
        let status = record.status.parse().unwrap_or(Category::Unknown);

        parsed.events.push(Event {
            timestamp,
            status,
            latency_ms: record.latency_ms.filter(|v| v.is_finite()),
            status_code: record.status_code,
            error_type: record.error_type.clone(),
        });
    }

    debug!(
        "Parsed {} events ({} unparsed)",
        parsed.events.len(),
        parsed.unparsed
    );

    parsed
}

/// Result of parsing a pre-aggregated status sequence
#[derive(Debug, Clone)]
pub struct ParsedStatuses {
    pub statuses: Vec<Category>,

    /// Explicit range, when both bounds were present and parsable
    pub range: Option<TimeRange>,

    /// Non-string statuses plus range bounds that were present but could
    /// not be parsed
    pub unparsed: usize,
}

/// Parse a pre-aggregated status sequence
///
/// A non-string status still occupies its cell, as `Category::Unknown`.
pub fn parse_status_sequence(raw: &RawStatusSequence) -> ParsedStatuses {
    let mut unparsed = 0;

    let statuses = raw
        .statuses
        .iter()
        .map(|status| match status {
            RawRecord::Valid(s) => s.parse().unwrap_or(Category::Unknown),
            RawRecord::Malformed(value) => {
                warn!("Status {} is not a string, treating as unknown", value);
                unparsed += 1;
                Category::Unknown
            }
        })
        .collect();

    let mut bound = |value: &Option<RawRecord<String>>| {
        let parsed = match value.as_ref()? {
            RawRecord::Valid(s) => parse_timestamp(s),
            RawRecord::Malformed(_) => None,
        };
        if parsed.is_none() {
            warn!("Ignoring unparsable range bound {:?}", value);
            unparsed += 1;
        }
        parsed
    };

    let start = bound(&raw.time_range_start);
    let end = bound(&raw.time_range_end);

    let range = match (start, end) {
        (Some(start), Some(end)) => Some(TimeRange::new(start, end)),
        _ => None,
    };

    ParsedStatuses {
        statuses,
        range,
        unparsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(timestamp: &str, status: &str) -> RawRecord<RawEvent> {
        RawEvent {
            timestamp: timestamp.to_string(),
            status: status.to_string(),
            latency_ms: None,
            status_code: None,
            error_type: None,
        }
        .into()
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("SUCCESS".parse::<Category>().unwrap(), Category::Success);
        assert_eq!(" unhealthy ".parse::<Category>().unwrap(), Category::Unhealthy);
        assert_eq!("timeout".parse::<Category>().unwrap(), Category::Unknown);
    }

    #[test]
    fn test_outcome_buckets() {
        assert_eq!(Category::Healthy.outcome(), Outcome::Success);
        assert_eq!(Category::Unhealthy.outcome(), Outcome::Failed);
        assert_eq!(Category::Warning.outcome(), Outcome::Skipped);
        assert_eq!(Category::Started.outcome(), Outcome::Other);
    }

    #[test]
    fn test_parse_events_counts_unparsed() {
        let records = vec![
            raw("2024-05-01T10:00:00Z", "success"),
            raw("not a time", "failed"),
            raw("2024-05-01T10:05:00Z", "weird"),
        ];

        let parsed = parse_events(&records);
        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.unparsed, 1);
        assert_eq!(parsed.events[1].status, Category::Unknown);
    }

    #[test]
    fn test_parse_events_counts_malformed_records() {
        let records = vec![
            raw("2024-05-01T10:00:00Z", "success"),
            RawRecord::Malformed(serde_json::json!({"timestamp": 1714521600, "status": "failed"})),
            raw("2024-05-01T10:05:00Z", "failed"),
        ];

        let parsed = parse_events(&records);
        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.unparsed, 1);
        assert_eq!(parsed.events[1].status, Category::Failed);
    }

    #[test]
    fn test_parse_status_sequence_range() {
        let seq = RawStatusSequence {
            statuses: vec!["success".to_string().into(), "failed".to_string().into()],
            time_range_start: Some("2024-05-01T00:00:00Z".to_string().into()),
            time_range_end: Some("2024-05-01T01:00:00Z".to_string().into()),
        };
        let parsed = parse_status_sequence(&seq);
        assert_eq!(parsed.statuses, vec![Category::Success, Category::Failed]);
        assert_eq!(parsed.range.unwrap().width_ms(), 3_600_000);
        assert_eq!(parsed.unparsed, 0);
    }

    #[test]
    fn test_parse_status_sequence_bad_bound() {
        let seq = RawStatusSequence {
            statuses: vec![],
            time_range_start: Some("garbage".to_string().into()),
            time_range_end: Some("2024-05-01T01:00:00Z".to_string().into()),
        };
        let parsed = parse_status_sequence(&seq);
        assert!(parsed.range.is_none());
        assert_eq!(parsed.unparsed, 1);
    }

    #[test]
    fn test_non_string_status_keeps_its_cell() {
        let seq: RawStatusSequence =
            serde_json::from_str(r#"{"statuses": ["success", 7, "failed"], "time_range_start": 0}"#)
                .unwrap();
        let parsed = parse_status_sequence(&seq);
        assert_eq!(
            parsed.statuses,
            vec![Category::Success, Category::Unknown, Category::Failed]
        );
        assert!(parsed.range.is_none());
        assert_eq!(parsed.unparsed, 2);
    }
}
