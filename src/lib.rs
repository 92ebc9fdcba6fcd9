//! Health Timeline
//!
//! Transforms irregular, timestamped health and usage events from an
//! AI-API gateway into renderer-ready view models:
//! - a fixed-resolution status heatmap (`grid`)
//! - a gap-compressed time axis (`compress`)
//! - a nonlinear, zoomed value axis (`axis`)
//! - cursor threshold statistics (`threshold`)
//!
//! Every transform is a pure function over an immutable input. None of
//! them fail: empty or malformed input degrades to an empty view.
//!
//! ## Getting Started
//!
//! ```ignore
//! use health_timeline::grid::aggregate;
//! use health_timeline::parser::{parse_events, TimeRange};
//!
//! let parsed = parse_events(&raw_events);
//! let grid = aggregate(&parsed.events, TimeRange::new(start, end), 100);
//! ```
//!
//! The `health-timeline` binary wraps the same functions for JSON
//! snapshots on disk.

pub mod axis;
pub mod commands;
pub mod compress;
pub mod grid;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod threshold;
pub mod utils;
