//! Fixed-resolution status heatmap.
//!
//! This module turns irregular events into exactly N contiguous time
//! cells and resolves each cell's colour and tooltip:
//! - Event bucketing or pre-aggregated status input (`aggregator`)
//! - The deterministic colour priority rule (`color`)

pub mod aggregator;
pub mod color;

// Re-export main types and functions
pub use aggregator::{aggregate, aggregate_statuses, Cell, Grid, RawCounts};
pub use color::{resolve_color, CellColor};
