//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands read an already-fetched snapshot, run the transforms and
//! write or print the resulting view model.

pub mod grid;
pub mod models;
pub mod scatter;
pub mod threshold;
pub mod utils;

// Re-export main command functions
pub use grid::execute_grid;
pub use models::{GridArgs, ScatterArgs, ThresholdArgs};
pub use scatter::execute_scatter;
pub use threshold::execute_threshold;
pub use utils::{display_schema, display_version, resolve_config};
