//! Cursor threshold statistics.
//!
//! Given a cursor value on the value axis, count how many points of
//! each series sit at or below it:
//! - Full recount per cursor move (`stats`)
//! - Presorted binary-search index for large series (`index`)

pub mod index;
pub mod stats;

// Re-export main types and functions
pub use index::ThresholdIndex;
pub use stats::{
    snapshot, snapshot_at_display, snapshot_at_pixel, SeriesThreshold, ThresholdCount,
    ThresholdSnapshot,
};
