//! Scatter view assembly.
//!
//! raw series -> GapCompressor (time axis) -> AxisTransform (value
//! axis) -> renderer. Every point keeps its original coordinates for
//! tooltips.

use crate::axis::{AxisTick, AxisTransform, DISPLAY_MAX};
use crate::compress::{compress, union_timestamps, Gap};
use crate::parser::Series;
use crate::utils::config::{TimelineConfig, DEFAULT_TICK_VALUES};
use crate::utils::error::ConfigError;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// Parameters of a scatter view pass
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterOptions {
    pub gap_threshold: Duration,
    pub compressed_gap_size: Duration,
    pub axis: AxisTransform,
    pub tick_values: Vec<f64>,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        let config = TimelineConfig::default();
        Self {
            gap_threshold: config.gap_threshold(),
            compressed_gap_size: config.compressed_gap_size(),
            axis: AxisTransform::default(),
            tick_values: DEFAULT_TICK_VALUES.to_vec(),
        }
    }
}

impl ScatterOptions {
    /// # Errors
    /// * `ConfigError::InvalidCalibration` - axis calibration is unusable
    pub fn from_config(config: &TimelineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            gap_threshold: config.gap_threshold(),
            compressed_gap_size: config.compressed_gap_size(),
            axis: AxisTransform::new(config.calibration())?,
            tick_values: DEFAULT_TICK_VALUES.to_vec(),
        })
    }
}

/// A point ready for the chart widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    /// Compressed time position
    pub x: DateTime<Utc>,

    /// Display-domain value, clamped to `[0, 100]`
    pub y: f64,

    pub original_x: DateTime<Utc>,
    pub original_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub label: String,
    pub points: Vec<ScatterPoint>,
}

/// Everything the renderer needs for one scatter chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterView {
    pub series: Vec<ScatterSeries>,
    pub gaps: Vec<Gap>,
    pub ticks: Vec<AxisTick>,
    pub total_compression_ms: i64,

    /// First and last compressed instant across all series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_extent: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl ScatterView {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Build a scatter view from parsed series
///
/// **Public** - main entry point for the scatter chart
///
/// Gap detection runs once over the union of all timestamps, so every
/// series goes through the same mapping and stays aligned.
pub fn build_scatter_view(series: &[Series], options: &ScatterOptions) -> ScatterView {
    let timestamps = union_timestamps(series);
    let compression = compress(&timestamps, options.gap_threshold, options.compressed_gap_size);
    let axis = &options.axis;

    let series_out: Vec<ScatterSeries> = series
        .iter()
        .map(|s| ScatterSeries {
            label: s.label.clone(),
            points: s
                .points
                .iter()
                .map(|p| ScatterPoint {
                    x: compression.mapping.apply(p.x),
                    y: axis.to_display(p.y).clamp(0.0, DISPLAY_MAX),
                    original_x: p.x,
                    original_y: p.y,
                })
                .collect(),
        })
        .collect();

    let x_extent = match (timestamps.first(), timestamps.last()) {
        (Some(first), Some(last)) => Some((
            compression.mapping.apply(*first),
            compression.mapping.apply(*last),
        )),
        _ => None,
    };

    debug!(
        "Scatter view: {} series, {} gaps, {} ms compressed",
        series_out.len(),
        compression.gaps.len(),
        compression.total_compression_ms
    );

    ScatterView {
        series: series_out,
        gaps: compression.gaps,
        ticks: axis.ticks(&options.tick_values),
        total_compression_ms: compression.total_compression_ms,
        x_extent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn minute(m: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap() + Duration::minutes(m)
    }

    #[test]
    fn test_series_share_one_mapping() {
        let a = Series::from_pairs("a", vec![(minute(0), 1.0), (minute(200), 2.0)]);
        let b = Series::from_pairs("b", vec![(minute(1), 3.0), (minute(200), 4.0)]);
        let view = build_scatter_view(&[a, b], &ScatterOptions::default());

        assert_eq!(view.gaps.len(), 1);
        assert_eq!(view.series[0].points[1].x, view.series[1].points[1].x);
        assert_eq!(view.series[0].points[1].original_x, minute(200));
        assert_eq!(view.x_extent, Some((minute(0), minute(6))));
    }

    #[test]
    fn test_values_scaled_and_clamped() {
        let s = Series::from_pairs("a", vec![(minute(0), 10.0), (minute(1), 500.0), (minute(2), -3.0)]);
        let view = build_scatter_view(&[s], &ScatterOptions::default());
        let ys: Vec<f64> = view.series[0].points.iter().map(|p| p.y).collect();

        assert!((ys[0] - 70.0).abs() < 1e-9);
        assert_eq!(ys[1], 100.0);
        assert_eq!(ys[2], 0.0);
        assert_eq!(view.series[0].points[1].original_y, 500.0);
    }

    #[test]
    fn test_empty_input() {
        let view = build_scatter_view(&[], &ScatterOptions::default());
        assert_eq!(view.point_count(), 0);
        assert!(view.gaps.is_empty());
        assert!(view.x_extent.is_none());
        assert_eq!(view.ticks.len(), DEFAULT_TICK_VALUES.len());
    }
}
