//! Health Timeline CLI
//!
//! Runs the timeline transforms over JSON snapshots already fetched
//! from the gateway backend and writes renderer-ready JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use health_timeline::commands::{
    display_schema, display_version, execute_grid, execute_scatter, execute_threshold, GridArgs,
    ScatterArgs, ThresholdArgs,
};

/// Health Timeline - status heatmaps and scatter views for gateway telemetry
#[derive(Parser, Debug)]
#[command(name = "health-timeline")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate events (or a status sequence) into a heatmap grid
    Grid {
        /// Input JSON with "events" or "statuses"
        #[arg(short, long)]
        input: PathBuf,

        /// TOML configuration file
        #[arg(short, long, env = "HEALTH_TIMELINE_CONFIG")]
        config: Option<PathBuf>,

        /// Number of cells (overrides config)
        #[arg(long)]
        cells: Option<usize>,

        /// Range start, ISO 8601 (requires --end)
        #[arg(long)]
        start: Option<String>,

        /// Range end, ISO 8601 (requires --start)
        #[arg(long)]
        end: Option<String>,

        /// Output path for the grid JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a coloured strip to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Build a gap-compressed, axis-scaled scatter view
    Scatter {
        /// Input JSON with "series"
        #[arg(short, long)]
        input: PathBuf,

        /// TOML configuration file
        #[arg(short, long, env = "HEALTH_TIMELINE_CONFIG")]
        config: Option<PathBuf>,

        /// Output path for the scatter view JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Count points at or below a cursor value
    Threshold {
        /// Input JSON with "series"
        #[arg(short, long)]
        input: PathBuf,

        /// Cursor value
        #[arg(long, allow_negative_numbers = true)]
        cursor: f64,

        /// Interpret the cursor as a display-domain value (0-100)
        #[arg(long)]
        display: bool,

        /// TOML configuration file
        #[arg(short, long, env = "HEALTH_TIMELINE_CONFIG")]
        config: Option<PathBuf>,

        /// Output path for the snapshot JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Grid {
            input,
            config,
            cells,
            start,
            end,
            output,
            summary,
        } => {
            execute_grid(GridArgs {
                input,
                config,
                cells,
                start,
                end,
                output,
                print_summary: summary,
            })?;
        }

        Commands::Scatter {
            input,
            config,
            output,
            summary,
        } => {
            execute_scatter(ScatterArgs {
                input,
                config,
                output,
                print_summary: summary,
            })?;
        }

        Commands::Threshold {
            input,
            cursor,
            display,
            config,
            output,
        } => {
            execute_threshold(ThresholdArgs {
                input,
                config,
                cursor,
                display,
                output,
            })?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
