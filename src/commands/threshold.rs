//! Threshold command implementation.

use super::models::ThresholdArgs;
use super::scatter::read_series;
use super::utils::resolve_config;
use crate::axis::AxisTransform;
use crate::output::{render_threshold, write_view};
use crate::parser::parse_series;
use crate::threshold::{snapshot, snapshot_at_display};
use anyhow::{bail, Context, Result};
use log::{info, warn};

/// Execute the threshold command
///
/// **Public** - main entry point called from main.rs
pub fn execute_threshold(args: ThresholdArgs) -> Result<()> {
    if !args.cursor.is_finite() {
        bail!("Cursor must be a finite number, got {}", args.cursor);
    }

    let config = resolve_config(args.config.as_deref())?;
    let axis = AxisTransform::new(config.calibration()).context("Invalid axis calibration")?;

    let parsed = parse_series(&read_series(&args.input)?);
    if parsed.unparsed > 0 {
        warn!("{} points skipped", parsed.unparsed);
    }

    let result = if args.display {
        info!("Cursor {} in display units", args.cursor);
        snapshot_at_display(args.cursor, &axis, &parsed.series)
    } else {
        snapshot(args.cursor, &parsed.series)
    };

    if let Some(path) = &args.output {
        write_view(&result, path).context("Failed to write threshold JSON")?;
    }

    println!("{}", render_threshold(&result));

    Ok(())
}
