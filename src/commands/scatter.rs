//! Scatter command implementation.

use super::models::ScatterArgs;
use super::utils::resolve_config;
use crate::output::{read_input, render_scatter, view_to_string, write_view};
use crate::parser::{parse_series, InputDocument, RawRecord, RawSeries};
use crate::pipeline::{build_scatter_view, ScatterOptions};
use anyhow::{bail, Context, Result};
use log::{info, warn};

/// Execute the scatter command
///
/// **Public** - main entry point called from main.rs
pub fn execute_scatter(args: ScatterArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref())?;
    let options = ScatterOptions::from_config(&config).context("Invalid axis calibration")?;

    info!("Step 1/3: Reading {}", args.input.display());
    let raw = read_series(&args.input)?;
    let parsed = parse_series(&raw);
    if parsed.unparsed > 0 {
        warn!("{} points skipped", parsed.unparsed);
    }

    info!("Step 2/3: Compressing gaps and scaling values...");
    let view = build_scatter_view(&parsed.series, &options);
    info!(
        "{} points in {} series, {} gaps",
        view.point_count(),
        view.series.len(),
        view.gaps.len()
    );

    info!("Step 3/3: Writing output...");
    if let Some(path) = &args.output {
        write_view(&view, path).context("Failed to write scatter view JSON")?;
    }

    if args.print_summary {
        println!("{}", render_scatter(&view));
    } else if args.output.is_none() {
        println!("{}", view_to_string(&view)?);
    }

    Ok(())
}

/// Read a document that must hold series
///
/// **Public** - shared with the threshold command
pub fn read_series(path: &std::path::Path) -> Result<Vec<RawRecord<RawSeries>>> {
    match read_input(path).context("Failed to read input document")? {
        InputDocument::Series { series } => Ok(series),
        other => bail!("Expected a series document, got {}", other.kind()),
    }
}
