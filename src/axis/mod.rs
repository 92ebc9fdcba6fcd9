//! Nonlinear value axis.
//!
//! A calibrated two-segment piecewise-linear map between real values
//! (e.g. minutes) and the `[0, 100]` display domain. The lower segment
//! gets most of the display range so small, interesting values stay
//! readable next to rare large ones.

pub mod transform;

pub use transform::{AxisCalibration, AxisTick, AxisTransform, DISPLAY_MAX};
