//! Configuration, defaults and constants.
//!
//! Every tunable of the transforms lives in [`TimelineConfig`]. Missing
//! keys in a TOML file fall back to the defaults below.

use super::error::ConfigError;
use chrono::Duration;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

pub const DEFAULT_GRID_CELL_COUNT: usize = 100;
pub const DEFAULT_GAP_THRESHOLD_MINUTES: f64 = 60.0;
pub const DEFAULT_COMPRESSED_GAP_SIZE_MINUTES: f64 = 5.0;
pub const DEFAULT_AXIS_BREAKPOINT: f64 = 10.0;
pub const DEFAULT_AXIS_LOWER_RATIO: f64 = 0.7;
pub const DEFAULT_AXIS_DOMAIN_MAX: f64 = 120.0;
pub const DEFAULT_LOOKBACK_HOURS: f64 = 24.0;

/// Real values that get a labeled tick on the value axis (minutes)
pub const DEFAULT_TICK_VALUES: &[f64] = &[0.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0];

// Multi-event colour rule ratios
pub const FAILED_SATURATION_RATIO: f64 = 0.5;
pub const SUCCESS_SATURATION_RATIO: f64 = 0.7;

/// Interval substituted per cell when the time range has zero width
pub const MIN_CELL_INTERVAL_MS: i64 = 1;

/// Upper bounds accepted by [`TimelineConfig::validate`]
pub const MAX_GRID_CELL_COUNT: usize = 100_000;
pub const MAX_LOOKBACK_HOURS: f64 = 100.0 * 366.0 * 24.0;

/// Full configuration of the timeline transforms
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Number of heatmap cells
    pub grid_cell_count: usize,

    /// Gaps longer than this are compressed
    pub gap_threshold_minutes: f64,

    /// Width a compressed gap keeps on the time axis
    pub compressed_gap_size_minutes: f64,

    /// Real value where the axis switches from the zoomed to the wide segment
    pub axis_breakpoint: f64,

    /// Share of the display range given to `[0, axis_breakpoint]`
    pub axis_lower_ratio: f64,

    /// Largest real value on the axis
    pub axis_domain_max: f64,

    /// Range used when the caller supplies no explicit start/end
    pub lookback_hours: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            grid_cell_count: DEFAULT_GRID_CELL_COUNT,
            gap_threshold_minutes: DEFAULT_GAP_THRESHOLD_MINUTES,
            compressed_gap_size_minutes: DEFAULT_COMPRESSED_GAP_SIZE_MINUTES,
            axis_breakpoint: DEFAULT_AXIS_BREAKPOINT,
            axis_lower_ratio: DEFAULT_AXIS_LOWER_RATIO,
            axis_domain_max: DEFAULT_AXIS_DOMAIN_MAX,
            lookback_hours: DEFAULT_LOOKBACK_HOURS,
        }
    }
}

impl TimelineConfig {
    /// Check the configuration for values the transforms cannot use
    ///
    /// **Public** - called by [`load_config`] and by the CLI after
    /// applying flag overrides
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_cell_count == 0 || self.grid_cell_count > MAX_GRID_CELL_COUNT {
            return Err(ConfigError::Invalid(format!(
                "grid_cell_count must be between 1 and {}, got {}",
                MAX_GRID_CELL_COUNT, self.grid_cell_count
            )));
        }

        if !(self.gap_threshold_minutes.is_finite() && self.gap_threshold_minutes > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "gap_threshold_minutes must be positive, got {}",
                self.gap_threshold_minutes
            )));
        }

        if !(self.compressed_gap_size_minutes.is_finite() && self.compressed_gap_size_minutes >= 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "compressed_gap_size_minutes must be non-negative, got {}",
                self.compressed_gap_size_minutes
            )));
        }

        if !(self.lookback_hours > 0.0 && self.lookback_hours <= MAX_LOOKBACK_HOURS) {
            return Err(ConfigError::Invalid(format!(
                "lookback_hours must be in (0, {}], got {}",
                MAX_LOOKBACK_HOURS, self.lookback_hours
            )));
        }

        self.calibration().validate()
    }

    pub fn calibration(&self) -> crate::axis::AxisCalibration {
        crate::axis::AxisCalibration {
            breakpoint: self.axis_breakpoint,
            lower_ratio: self.axis_lower_ratio,
            domain_max: self.axis_domain_max,
        }
    }

    pub fn gap_threshold(&self) -> Duration {
        minutes_to_duration(self.gap_threshold_minutes)
    }

    pub fn compressed_gap_size(&self) -> Duration {
        minutes_to_duration(self.compressed_gap_size_minutes)
    }

    pub fn lookback(&self) -> Duration {
        minutes_to_duration(self.lookback_hours * 60.0)
    }
}

/// Convert fractional minutes to a millisecond-precision duration
///
/// Saturates at `Duration::MIN`/`Duration::MAX`; NaN maps to zero.
fn minutes_to_duration(minutes: f64) -> Duration {
    let ms = (minutes * 60_000.0).round();
    Duration::try_milliseconds(ms as i64).unwrap_or(if ms < 0.0 {
        Duration::MIN
    } else {
        Duration::MAX
    })
}

/// Load a configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the TOML configuration file
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::Invalid` / `InvalidCalibration` - If values are unusable
///
/// # Example
/// ```ignore
/// let config = load_config("timeline.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TimelineConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading config from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: TimelineConfig = toml::from_str(&contents)?;
    config.validate()?;

    Ok(config)
}
