//! Piecewise-linear real <-> display mapping.

use crate::utils::config::{
    DEFAULT_AXIS_BREAKPOINT, DEFAULT_AXIS_DOMAIN_MAX, DEFAULT_AXIS_LOWER_RATIO,
};
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Upper end of the display domain
pub const DISPLAY_MAX: f64 = 100.0;

/// Calibration of the two axis segments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisCalibration {
    /// Real value where the lower segment ends
    pub breakpoint: f64,

    /// Share of the display range the lower segment occupies
    pub lower_ratio: f64,

    /// Real value mapped to the top of the display range
    pub domain_max: f64,
}

impl Default for AxisCalibration {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_AXIS_BREAKPOINT,
            lower_ratio: DEFAULT_AXIS_LOWER_RATIO,
            domain_max: DEFAULT_AXIS_DOMAIN_MAX,
        }
    }
}

impl AxisCalibration {
    /// Both segments must have positive width for the map to be
    /// strictly increasing and invertible
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self {
            breakpoint,
            lower_ratio,
            domain_max,
        } = *self;

        if !(breakpoint.is_finite() && lower_ratio.is_finite() && domain_max.is_finite()) {
            return Err(ConfigError::InvalidCalibration(
                "calibration values must be finite".to_string(),
            ));
        }
        if breakpoint <= 0.0 {
            return Err(ConfigError::InvalidCalibration(format!(
                "breakpoint must be positive, got {}",
                breakpoint
            )));
        }
        if domain_max <= breakpoint {
            return Err(ConfigError::InvalidCalibration(format!(
                "domain_max ({}) must exceed breakpoint ({})",
                domain_max, breakpoint
            )));
        }
        if lower_ratio <= 0.0 || lower_ratio >= 1.0 {
            return Err(ConfigError::InvalidCalibration(format!(
                "lower_ratio must be strictly between 0 and 1, got {}",
                lower_ratio
            )));
        }
        Ok(())
    }
}

/// A labeled tick on the value axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// Real value
    pub value: f64,

    /// Display-domain position
    pub position: f64,

    pub label: String,
}

/// Calibrated real <-> display transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTransform {
    calibration: AxisCalibration,
}

impl Default for AxisTransform {
    fn default() -> Self {
        Self {
            calibration: AxisCalibration::default(),
        }
    }
}

impl AxisTransform {
    /// Build a transform from a validated calibration
    ///
    /// # Errors
    /// * `ConfigError::InvalidCalibration` - degenerate segment widths
    pub fn new(calibration: AxisCalibration) -> Result<Self, ConfigError> {
        calibration.validate()?;
        Ok(Self { calibration })
    }

    pub fn calibration(&self) -> &AxisCalibration {
        &self.calibration
    }

    /// Display value of the breakpoint
    fn split(&self) -> f64 {
        self.calibration.lower_ratio * DISPLAY_MAX
    }

    /// Real value to display domain
    pub fn to_display(&self, real: f64) -> f64 {
        let AxisCalibration {
            breakpoint,
            lower_ratio,
            domain_max,
        } = self.calibration;

        if real <= breakpoint {
            real * (self.split() / breakpoint)
        } else {
            self.split() + (real - breakpoint) / (domain_max - breakpoint) * (1.0 - lower_ratio) * DISPLAY_MAX
        }
    }

    /// Display domain back to a real value; exact inverse of `to_display`
    pub fn to_real(&self, display: f64) -> f64 {
        let AxisCalibration {
            breakpoint,
            lower_ratio,
            domain_max,
        } = self.calibration;

        if display <= self.split() {
            display * breakpoint / self.split()
        } else {
            breakpoint + (display - self.split()) / ((1.0 - lower_ratio) * DISPLAY_MAX) * (domain_max - breakpoint)
        }
    }

    /// Place labeled ticks for the given real values
    ///
    /// Values outside `[0, domain_max]` are dropped; order is preserved.
    pub fn ticks(&self, values: &[f64]) -> Vec<AxisTick> {
        values
            .iter()
            .copied()
            .filter(|v| v.is_finite() && *v >= 0.0 && *v <= self.calibration.domain_max)
            .map(|value| AxisTick {
                value,
                position: self.to_display(value),
                label: format_tick(value),
            })
            .collect()
    }

    /// Convert a pointer position to a display-domain value
    ///
    /// # Arguments
    /// * `pixel_y` - Offset from the top edge of the plot area
    /// * `plot_height` - Height of the plot area in pixels
    ///
    /// The result is clamped to `[0, 100]`. A non-positive height maps
    /// everything to 0.
    pub fn display_from_pixel(&self, pixel_y: f64, plot_height: f64) -> f64 {
        if plot_height.is_nan() || plot_height <= 0.0 || !pixel_y.is_finite() {
            return 0.0;
        }
        ((1.0 - pixel_y / plot_height) * DISPLAY_MAX).clamp(0.0, DISPLAY_MAX)
    }

    /// Hit-test a pointer position to a real value
    pub fn real_from_pixel(&self, pixel_y: f64, plot_height: f64) -> f64 {
        self.to_real(self.display_from_pixel(pixel_y, plot_height))
    }
}

/// Trim trailing zeros so integer ticks read as "10", not "10.0"
fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
