//! Grid command implementation.
//!
//! The grid command:
//! 1. Reads an events or statuses document
//! 2. Resolves the time range and cell count
//! 3. Aggregates into the heatmap
//! 4. Writes or prints the result

use super::models::GridArgs;
use super::utils::resolve_config;
use crate::grid::{aggregate, aggregate_statuses, Grid};
use crate::output::{read_input, render_grid, view_to_string, write_view};
use crate::parser::{parse_events, parse_status_sequence, parse_timestamp, InputDocument, TimeRange};
use crate::utils::config::TimelineConfig;
use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use log::{debug, info, warn};

/// Execute the grid command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable input or config
/// * A series document (the grid needs events or statuses)
/// * An explicit range bound that does not parse
pub fn execute_grid(args: GridArgs) -> Result<()> {
    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(cells) = args.cells {
        config.grid_cell_count = cells;
    }
    config.validate().context("Invalid grid configuration")?;

    info!("Step 1/3: Reading {}", args.input.display());
    let document = read_input(&args.input).context("Failed to read input document")?;
    let explicit_range = explicit_range(&args)?;

    info!("Step 2/3: Aggregating...");
    let grid = build_grid(document, explicit_range, &args, &config)?;
    debug!("{}", grid.summary());

    info!("Step 3/3: Writing output...");
    if let Some(path) = &args.output {
        write_view(&grid, path).context("Failed to write grid JSON")?;
    }

    if args.print_summary {
        println!("{}", render_grid(&grid));
    } else if args.output.is_none() {
        println!("{}", view_to_string(&grid)?);
    }

    Ok(())
}

/// Range from `--start`/`--end`; both or neither
///
/// **Private** - internal helper for execute_grid
fn explicit_range(args: &GridArgs) -> Result<Option<TimeRange>> {
    let parse = |value: &str| {
        parse_timestamp(value).ok_or_else(|| anyhow!("Unparsable timestamp: {}", value))
    };

    match (&args.start, &args.end) {
        (Some(start), Some(end)) => Ok(Some(TimeRange::new(parse(start)?, parse(end)?))),
        (None, None) => Ok(None),
        _ => bail!("--start and --end must be given together"),
    }
}

/// Dispatch on the document kind
///
/// **Private** - internal helper for execute_grid
fn build_grid(
    document: InputDocument,
    explicit_range: Option<TimeRange>,
    args: &GridArgs,
    config: &TimelineConfig,
) -> Result<Grid> {
    let fallback = || TimeRange::lookback(config.lookback(), Utc::now());

    match document {
        InputDocument::Events { events } => {
            let parsed = parse_events(&events);
            if parsed.unparsed > 0 {
                warn!("{} events skipped with unparsable timestamps", parsed.unparsed);
            }
            let range = explicit_range.unwrap_or_else(fallback);
            let grid = aggregate(&parsed.events, range, config.grid_cell_count);
            if grid.out_of_range > 0 {
                warn!("{} events outside {} - {}", grid.out_of_range, range.start, range.end);
            }
            Ok(grid)
        }
        InputDocument::Statuses(sequence) => {
            let parsed = parse_status_sequence(&sequence);
            let range = explicit_range.or(parsed.range).unwrap_or_else(fallback);
            // Without --cells the sequence length is the cell count
            let cells = match args.cells {
                Some(cells) => cells,
                None if !parsed.statuses.is_empty() => parsed.statuses.len(),
                None => config.grid_cell_count,
            };
            Ok(aggregate_statuses(&parsed.statuses, range, cells))
        }
        InputDocument::Series { .. } => {
            bail!("The grid command needs an events or statuses document, got series")
        }
    }
}
