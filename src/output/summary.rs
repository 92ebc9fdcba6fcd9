//! Terminal summaries of view models.
//!
//! Quick visual checks for the CLI; the real renderer lives elsewhere.

use crate::grid::{CellColor, Grid};
use crate::pipeline::ScatterView;
use crate::threshold::ThresholdSnapshot;
use colored::*;

/// Glyph used for every heatmap cell
const CELL_GLYPH: &str = "█";

/// Render a grid as one coloured strip plus its summary line
pub fn render_grid(grid: &Grid) -> String {
    let mut out = String::new();

    out.push_str(&"Status Timeline".bold().to_string());
    out.push_str(&format!(
        "\n{} - {}\n",
        grid.range.start.format("%Y-%m-%d %H:%M"),
        grid.range.end.format("%Y-%m-%d %H:%M")
    ));

    for cell in &grid.cells {
        out.push_str(&paint(CELL_GLYPH, cell.color).to_string());
    }
    out.push('\n');
    out.push_str(&grid.summary());
    out.push('\n');

    out
}

fn paint(glyph: &str, color: CellColor) -> ColoredString {
    match color {
        CellColor::NoData => glyph.bright_black(),
        CellColor::Neutral => glyph.white(),
        CellColor::Green => glyph.green(),
        CellColor::LightGreen => glyph.bright_green(),
        CellColor::Red => glyph.red(),
        CellColor::LightRed => glyph.bright_red(),
        CellColor::Amber => glyph.yellow(),
        CellColor::Blue => glyph.blue(),
    }
}

/// Render a scatter view as per-series counts and the detected gaps
pub fn render_scatter(view: &ScatterView) -> String {
    let mut out = String::new();

    out.push_str(&"Scatter View".bold().to_string());
    out.push('\n');

    for series in &view.series {
        out.push_str(&format!("  {:<24} {} points\n", series.label, series.points.len()));
    }

    if view.gaps.is_empty() {
        out.push_str("No gaps compressed\n");
    } else {
        out.push_str(&format!(
            "{} gaps compressed ({} min removed):\n",
            view.gaps.len(),
            view.total_compression_ms / 60_000
        ));
        for gap in &view.gaps {
            out.push_str(&format!(
                "  {} -> {} ({} min)\n",
                gap.original_start.format("%Y-%m-%d %H:%M"),
                gap.original_end.format("%Y-%m-%d %H:%M"),
                gap.duration_ms / 60_000
            ));
        }
    }

    out
}

/// Render a threshold snapshot as a small table
pub fn render_threshold(snapshot: &ThresholdSnapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {:.2}\n",
        "Points at or below".bold(),
        snapshot.cursor_value
    ));

    for series in &snapshot.per_series {
        out.push_str(&format!(
            "  {:<24} {:>6} / {:<6} {}\n",
            series.label,
            series.count.count_below_or_equal,
            series.count.total,
            format_percent(series.count.percent)
        ));
    }

    out.push_str(&format!(
        "  {:<24} {:>6} / {:<6} {}\n",
        "all".bold(),
        snapshot.aggregate.count_below_or_equal,
        snapshot.aggregate.total,
        format_percent(snapshot.aggregate.percent)
    ));

    out
}

fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(p) => format!("{:.1}%", p),
        None => "-".to_string(),
    }
}
