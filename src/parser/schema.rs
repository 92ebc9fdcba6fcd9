//! Wire formats consumed from the upstream fetch.
//!
//! These mirror the JSON the backend produces. Timestamps stay as
//! strings here; conversion happens in the sibling modules. Every record
//! is wrapped in [`RawRecord`], so one bad record cannot fail a whole
//! document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A record that either matched its wire shape or did not
///
/// Any JSON value decodes as `Malformed`, so a list of records always
/// deserializes; the parsers skip and count the malformed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRecord<T> {
    Valid(T),
    Malformed(Value),
}

impl<T> RawRecord<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            RawRecord::Valid(record) => Some(record),
            RawRecord::Malformed(_) => None,
        }
    }
}

impl<T> From<T> for RawRecord<T> {
    fn from(record: T) -> Self {
        RawRecord::Valid(record)
    }
}

/// A raw health/usage event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    /// ISO-8601 timestamp
    pub timestamp: String,

    /// Status string (e.g. "success", "failed", "healthy"); missing
    /// reads as unknown
    #[serde(default)]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

/// Pre-aggregated status sequence, one status per cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStatusSequence {
    pub statuses: Vec<RawRecord<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range_start: Option<RawRecord<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range_end: Option<RawRecord<String>>,
}

/// A raw scatter sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPoint {
    /// ISO-8601 timestamp
    pub x: String,

    /// Value in real domain units (e.g. minutes)
    pub y: f64,
}

/// A raw labeled scatter series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSeries {
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub points: Vec<RawRecord<RawPoint>>,
}

/// Any input document the CLI accepts
///
/// Matched structurally: `{"events": [...]}`, `{"statuses": [...]}` or
/// `{"series": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputDocument {
    Events { events: Vec<RawRecord<RawEvent>> },
    Statuses(RawStatusSequence),
    Series { series: Vec<RawRecord<RawSeries>> },
}

impl InputDocument {
    /// Decode a document by its top-level key
    ///
    /// Returns `Ok(None)` when none of the known keys is present. When a
    /// key is present but its body is unusable, the serde error for that
    /// body is returned instead of a generic "no variant matched".
    pub fn from_value(mut value: Value) -> Result<Option<Self>, serde_json::Error> {
        let kind = ["events", "statuses", "series"]
            .into_iter()
            .find(|key| value.get(*key).is_some());

        let document = match kind {
            Some("events") => InputDocument::Events {
                events: serde_json::from_value(value["events"].take())?,
            },
            Some("statuses") => InputDocument::Statuses(serde_json::from_value(value)?),
            Some(_) => InputDocument::Series {
                series: serde_json::from_value(value["series"].take())?,
            },
            None => return Ok(None),
        };

        Ok(Some(document))
    }

    /// Short name of the document kind, for logs and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            InputDocument::Events { .. } => "events",
            InputDocument::Statuses(_) => "statuses",
            InputDocument::Series { .. } => "series",
        }
    }
}
