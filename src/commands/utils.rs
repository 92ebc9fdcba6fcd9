use crate::utils::config::{load_config, TimelineConfig, SCHEMA_VERSION};
use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

/// Load the configuration file if one was given, defaults otherwise
pub fn resolve_config(path: Option<&Path>) -> Result<TimelineConfig> {
    match path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            debug!("No config file given, using defaults");
            Ok(TimelineConfig::default())
        }
    }
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Health Timeline View Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Grid (grid command):");
        println!("  range: object            - start/end of the grid (ISO 8601)");
        println!("  cell_count: number       - Number of cells");
        println!("  interval_ms: number      - Nominal cell width");
        println!("  cells: array             - Exactly cell_count contiguous cells");
        println!("    start, end: string     - Cell bounds [start, end)");
        println!("    color: string          - no_data | neutral | green | light_green | red | light_red | amber | blue");
        println!("    tooltip: string        - Human-readable window and breakdown");
        println!("    counts: object         - success/failed/skipped/other");
        println!("  out_of_range: number     - Events outside the range");
        println!();
        println!("Scatter view (scatter command):");
        println!("  series: array            - label + points");
        println!("    x, y                   - Compressed time, display value [0, 100]");
        println!("    original_x, original_y - Values before transformation");
        println!("  gaps: array              - original_start, original_end, duration_ms, compressed_anchor");
        println!("  ticks: array             - value, position, label");
        println!("  total_compression_ms: number");
        println!();
        println!("Threshold snapshot (threshold command):");
        println!("  cursor_value: number     - Cursor in real units");
        println!("  per_series: array        - label, count_below_or_equal, total, percent?");
        println!("  aggregate: object        - count_below_or_equal, total, percent?");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Health Timeline v{}", env!("CARGO_PKG_VERSION"));
    println!("View Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Status heatmaps, gap-compressed scatter views and threshold statistics");
    println!("for AI-API gateway telemetry.");
}
