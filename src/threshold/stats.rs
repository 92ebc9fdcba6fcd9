//! Threshold snapshot computation.
//!
//! A point counts as "below" iff `y <= cursor`. The tie is inclusive.

use crate::axis::AxisTransform;
use crate::parser::Series;
use log::debug;
use serde::{Deserialize, Serialize};

/// Count of points at or below the cursor, with its share of the total
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCount {
    pub count_below_or_equal: usize,
    pub total: usize,

    /// `100 * count / total`; omitted when `total == 0`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

impl ThresholdCount {
    pub fn new(count_below_or_equal: usize, total: usize) -> Self {
        let percent = if total > 0 {
            Some(100.0 * count_below_or_equal as f64 / total as f64)
        } else {
            None
        };
        Self {
            count_below_or_equal,
            total,
            percent,
        }
    }
}

/// Threshold result for one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesThreshold {
    pub label: String,

    #[serde(flatten)]
    pub count: ThresholdCount,
}

/// Threshold statistics for one cursor position
///
/// Always recomputed from scratch; never reused across cursor values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSnapshot {
    pub cursor_value: f64,
    pub per_series: Vec<SeriesThreshold>,
    pub aggregate: ThresholdCount,
}

impl ThresholdSnapshot {
    /// Assemble a snapshot from per-series `(label, count, total)` rows
    pub(crate) fn from_rows<'a>(
        cursor_value: f64,
        rows: impl IntoIterator<Item = (&'a str, usize, usize)>,
    ) -> Self {
        let per_series: Vec<SeriesThreshold> = rows
            .into_iter()
            .map(|(label, count, total)| SeriesThreshold {
                label: label.to_string(),
                count: ThresholdCount::new(count, total),
            })
            .collect();

        let (count, total) = per_series.iter().fold((0, 0), |(c, t), s| {
            (c + s.count.count_below_or_equal, t + s.count.total)
        });

        Self {
            cursor_value,
            per_series,
            aggregate: ThresholdCount::new(count, total),
        }
    }

    pub fn series(&self, label: &str) -> Option<&SeriesThreshold> {
        self.per_series.iter().find(|s| s.label == label)
    }
}

/// Compute threshold statistics for a cursor value
///
/// **Public** - main entry point, called on every cursor move
///
/// # Arguments
/// * `cursor` - Cursor position in real units
/// * `series` - Series to count over
///
/// O(total points). See [`super::ThresholdIndex`] for the presorted
/// variant.
pub fn snapshot(cursor: f64, series: &[Series]) -> ThresholdSnapshot {
    let result = ThresholdSnapshot::from_rows(
        cursor,
        series.iter().map(|s| {
            let below = s.points.iter().filter(|p| p.y <= cursor).count();
            (s.label.as_str(), below, s.points.len())
        }),
    );

    debug!(
        "Threshold at {:.3}: {}/{} points",
        cursor, result.aggregate.count_below_or_equal, result.aggregate.total
    );

    result
}

/// Threshold statistics for a cursor given in the display domain
pub fn snapshot_at_display(display: f64, axis: &AxisTransform, series: &[Series]) -> ThresholdSnapshot {
    snapshot(axis.to_real(display), series)
}

/// Threshold statistics for a pointer position
///
/// **Public** - the hit-testing input path: pixel to display domain,
/// then `to_real`.
pub fn snapshot_at_pixel(
    pixel_y: f64,
    plot_height: f64,
    axis: &AxisTransform,
    series: &[Series],
) -> ThresholdSnapshot {
    snapshot(axis.real_from_pixel(pixel_y, plot_height), series)
}
