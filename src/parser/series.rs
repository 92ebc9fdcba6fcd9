//! Scatter series input.

use super::schema::{RawRecord, RawSeries};
use super::timestamp::parse_timestamp;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// A scatter sample, `y` in real domain units (e.g. minutes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: DateTime<Utc>,
    pub y: f64,
    pub series_label: String,
}

/// A labeled series of scatter samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<Point>,
}

impl Series {
    /// Build a series from `(x, y)` pairs, stamping each point with the label
    pub fn from_pairs(label: impl Into<String>, pairs: impl IntoIterator<Item = (DateTime<Utc>, f64)>) -> Self {
        let label = label.into();
        let points = pairs
            .into_iter()
            .map(|(x, y)| Point {
                x,
                y,
                series_label: label.clone(),
            })
            .collect();
        Self { label, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Result of parsing raw series
#[derive(Debug, Clone, Default)]
pub struct ParsedSeries {
    pub series: Vec<Series>,

    /// Points skipped for an unparsable `x`, a non-finite `y` or a
    /// malformed record, plus malformed series records
    pub unparsed: usize,
}

/// Parse raw scatter series
///
/// **Public** - main entry point for series input
///
/// Series order and point order are preserved. A series whose points
/// all fail to parse is kept, empty, so its label still shows up in
/// threshold statistics. A malformed series record is dropped and
/// counted once.
pub fn parse_series(raw: &[RawRecord<RawSeries>]) -> ParsedSeries {
    let mut unparsed = 0;

    let series = raw
        .iter()
        .filter_map(|record| match record {
            RawRecord::Valid(raw_series) => Some(parse_points(raw_series, &mut unparsed)),
            RawRecord::Malformed(value) => {
                warn!("Skipping malformed series record {}", value);
                unparsed += 1;
                None
            }
        })
        .collect::<Vec<_>>();

    debug!("Parsed {} series ({} unparsed points)", series.len(), unparsed);

    ParsedSeries { series, unparsed }
}

/// Convert one series, counting every skipped point into `unparsed`
///
/// **Private** - internal helper for parse_series
fn parse_points(raw_series: &RawSeries, unparsed: &mut usize) -> Series {
    let mut points = Vec::with_capacity(raw_series.points.len());

    for record in &raw_series.points {
        let Some(point) = record.valid() else {
            warn!("Skipping malformed point in series '{}'", raw_series.label);
            *unparsed += 1;
            continue;
        };

        match parse_timestamp(&point.x) {
            Some(x) if point.y.is_finite() => points.push(Point {
                x,
                y: point.y,
                series_label: raw_series.label.clone(),
            }),
            _ => {
                warn!(
                    "Skipping point ({}, {}) in series '{}'",
                    point.x, point.y, raw_series.label
                );
                *unparsed += 1;
            }
        }
    }

    Series {
        label: raw_series.label.clone(),
        points,
    }
}
