//! Input parsing and domain types.
//!
//! This module handles:
//! - Wire formats delivered by the upstream fetch (`schema`)
//! - Timestamp parsing and time ranges (`timestamp`)
//! - Health/usage events and their status categories (`events`)
//! - Scatter series (`series`)
//!
//! Nothing here fails on bad records. Unparsable entries are skipped
//! and counted so the caller can surface them as diagnostics.

pub mod events;
pub mod schema;
pub mod series;
pub mod timestamp;

// Re-export main types
pub use events::{parse_events, parse_status_sequence, Category, Event, Outcome, ParsedEvents, ParsedStatuses};
pub use schema::{InputDocument, RawEvent, RawPoint, RawRecord, RawSeries, RawStatusSequence};
pub use series::{parse_series, ParsedSeries, Point, Series};
pub use timestamp::{parse_timestamp, TimeRange};
