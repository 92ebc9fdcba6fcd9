//! Presorted threshold index.
//!
//! Sorting each series' values once turns every cursor query into a
//! binary search per series, O(S log n) instead of O(total points).
//! Answers are identical to [`super::snapshot`].

use super::stats::ThresholdSnapshot;
use crate::parser::Series;

#[derive(Debug, Clone)]
struct SortedSeries {
    label: String,
    values: Vec<f64>,

    /// All points, including NaN values that never count as below
    total: usize,
}

/// Per-series sorted values, built once per dataset
#[derive(Debug, Clone, Default)]
pub struct ThresholdIndex {
    series: Vec<SortedSeries>,
}

impl ThresholdIndex {
    pub fn new(series: &[Series]) -> Self {
        let series = series
            .iter()
            .map(|s| {
                let mut values: Vec<f64> = s
                    .points
                    .iter()
                    .map(|p| p.y)
                    .filter(|y| !y.is_nan())
                    .collect();
                values.sort_unstable_by(f64::total_cmp);
                SortedSeries {
                    label: s.label.clone(),
                    values,
                    total: s.points.len(),
                }
            })
            .collect();
        Self { series }
    }

    pub fn snapshot(&self, cursor: f64) -> ThresholdSnapshot {
        ThresholdSnapshot::from_rows(
            cursor,
            self.series.iter().map(|s| {
                let below = s.values.partition_point(|y| *y <= cursor);
                (s.label.as_str(), below, s.total)
            }),
        )
    }
}
