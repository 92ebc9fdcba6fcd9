//! Bucket events into N fixed time cells.
//!
//! Cells partition `[start, end)` contiguously. Bounds are computed in
//! integer milliseconds, `start + floor(i * width / N)`, and an event
//! lands in the cell whose bounds contain it. This is the same as
//! `floor((t - start) / interval)` without floating-point drift at
//! cell edges.

use super::color::{resolve_color, CellColor};
use crate::parser::{Category, Event, Outcome, TimeRange};
use crate::utils::config::MIN_CELL_INTERVAL_MS;
use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Outcome breakdown of a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCounts {
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
    pub other: usize,
}

impl RawCounts {
    pub fn total(&self) -> usize {
        self.success + self.failed + self.skipped + self.other
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.success += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Other => self.other += 1,
        }
    }

    fn merge(mut self, other: &RawCounts) -> Self {
        self.success += other.success;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.other += other.other;
        self
    }
}

/// One time slice of the heatmap, covering `[start, end)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: CellColor,
    pub tooltip: String,
    pub counts: RawCounts,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.counts.total() == 0
    }
}

/// A complete heatmap: exactly `cell_count` contiguous cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub range: TimeRange,
    pub cell_count: usize,

    /// Nominal cell width in milliseconds
    pub interval_ms: f64,

    pub cells: Vec<Cell>,

    /// Events discarded for falling outside the range
    pub out_of_range: usize,
}

impl Grid {
    /// Sum of all cell breakdowns
    pub fn counts(&self) -> RawCounts {
        self.cells
            .iter()
            .fold(RawCounts::default(), |acc, cell| acc.merge(&cell.counts))
    }

    /// Number of cells that hold at least one event
    pub fn populated_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        let counts = self.counts();
        format!(
            "Cells: {} ({} with data) | Events: {} | Success: {} | Failed: {} | Skipped: {} | Out of range: {}",
            self.cell_count,
            self.populated_cells(),
            counts.total(),
            counts.success,
            counts.failed,
            counts.skipped,
            self.out_of_range
        )
    }
}

/// Integer-millisecond cell bounds for one grid
#[derive(Debug, Clone, Copy)]
struct CellLayout {
    start: DateTime<Utc>,
    width_ms: i64,
    cells: usize,
}

impl CellLayout {
    fn new(range: TimeRange, cells: usize) -> Self {
        let mut width_ms = range.width_ms();
        if width_ms <= 0 {
            // Zero-width range: give every cell the minimum interval
            width_ms = MIN_CELL_INTERVAL_MS * cells as i64;
        }
        Self {
            start: range.start,
            width_ms,
            cells,
        }
    }

    /// Offset of the lower bound of cell `i`; `bound(cells) == width_ms`
    fn bound(&self, i: usize) -> i64 {
        ((self.width_ms as i128 * i as i128) / self.cells as i128) as i64
    }

    fn cell_start(&self, i: usize) -> DateTime<Utc> {
        self.start + Duration::milliseconds(self.bound(i))
    }

    fn interval_ms(&self) -> f64 {
        self.width_ms as f64 / self.cells as f64
    }

    /// Cell index for an offset from `start`, `None` when out of range
    fn index_of(&self, offset_ms: i64) -> Option<usize> {
        if offset_ms < 0 || offset_ms >= self.width_ms {
            return None;
        }

        let mut idx = ((offset_ms as i128 * self.cells as i128) / self.width_ms as i128) as usize;
        idx = idx.min(self.cells - 1);

        // Floored bounds can sit up to one step off the estimate
        while idx + 1 < self.cells && self.bound(idx + 1) <= offset_ms {
            idx += 1;
        }
        while idx > 0 && self.bound(idx) > offset_ms {
            idx -= 1;
        }

        Some(idx)
    }
}

/// Per-cell running state while bucketing
#[derive(Debug, Clone, Copy, Default)]
struct CellAccumulator {
    counts: RawCounts,
    first: Option<Category>,
}

impl CellAccumulator {
    fn push(&mut self, status: Category) {
        self.counts.record(status.outcome());
        self.first.get_or_insert(status);
    }
}

/// Bucket events into `cell_count` fixed time cells
///
/// **Public** - main entry point for event input
///
/// # Arguments
/// * `events` - Events in any order
/// * `range` - Time window the cells partition
/// * `cell_count` - Number of cells (0 is treated as 1)
///
/// # Returns
/// A grid with exactly `cell_count` cells. Events outside the range are
/// counted in `out_of_range`, never dropped silently. When the range is
/// shorter than `cell_count` milliseconds some cells have `start == end`;
/// such cells can never hold an event and always read "no data".
pub fn aggregate(events: &[Event], range: TimeRange, cell_count: usize) -> Grid {
    let cells = cell_count.max(1);
    let layout = CellLayout::new(range, cells);

    debug!(
        "Aggregating {} events into {} cells of {:.0} ms",
        events.len(),
        cells,
        layout.interval_ms()
    );

    let mut accumulators = vec![CellAccumulator::default(); cells];
    let mut out_of_range = 0;

    for event in events {
        let offset_ms = (event.timestamp - layout.start).num_milliseconds();
        match layout.index_of(offset_ms) {
            Some(idx) => accumulators[idx].push(event.status),
            None => out_of_range += 1,
        }
    }

    if out_of_range > 0 {
        debug!("{} events fell outside the grid range", out_of_range);
    }

    build_grid(range, layout, &accumulators, out_of_range)
}

/// Build a grid from a pre-aggregated status sequence
///
/// **Public** - alternate input mode, bypasses event bucketing
///
/// Cell `i` takes `statuses[i]` and the same bounds `aggregate` would
/// give it. A sequence shorter than `cell_count` is padded with empty
/// cells; a longer one is truncated.
pub fn aggregate_statuses(statuses: &[Category], range: TimeRange, cell_count: usize) -> Grid {
    let cells = cell_count.max(1);
    let layout = CellLayout::new(range, cells);

    if statuses.len() != cells {
        warn!(
            "Status sequence has {} entries for {} cells, {}",
            statuses.len(),
            cells,
            if statuses.len() < cells { "padding with empty cells" } else { "truncating" }
        );
    }

    let accumulators: Vec<CellAccumulator> = (0..cells)
        .map(|i| {
            let mut acc = CellAccumulator::default();
            if let Some(status) = statuses.get(i) {
                acc.push(*status);
            }
            acc
        })
        .collect();

    build_grid(range, layout, &accumulators, 0)
}

/// Turn accumulators into finished cells
///
/// **Private** - shared tail of both input modes
fn build_grid(
    range: TimeRange,
    layout: CellLayout,
    accumulators: &[CellAccumulator],
    out_of_range: usize,
) -> Grid {
    let with_seconds = layout.interval_ms() < 60_000.0;

    let cells = accumulators
        .iter()
        .enumerate()
        .map(|(i, acc)| {
            let start = layout.cell_start(i);
            let end = layout.cell_start(i + 1);
            let color = resolve_color(&acc.counts, acc.first);
            Cell {
                start,
                end,
                color,
                tooltip: format_tooltip(start, end, &acc.counts, with_seconds),
                counts: acc.counts,
            }
        })
        .collect();

    Grid {
        range,
        cell_count: layout.cells,
        interval_ms: layout.interval_ms(),
        cells,
        out_of_range,
    }
}

/// Human-readable `[start, end)` plus breakdown
///
/// **Private** - internal formatting
fn format_tooltip(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    counts: &RawCounts,
    with_seconds: bool,
) -> String {
    let fmt = if with_seconds { "%Y-%m-%d %H:%M:%S" } else { "%Y-%m-%d %H:%M" };
    let window = format!("{} - {}", start.format(fmt), end.format(fmt));

    if counts.total() == 0 {
        format!("{} | no data", window)
    } else {
        format!(
            "{} | total: {}, success: {}, failed: {}, skipped: {}",
            window,
            counts.total(),
            counts.success,
            counts.failed,
            counts.skipped
        )
    }
}
