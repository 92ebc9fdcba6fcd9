//! Output writers for view models.
//!
//! This module handles:
//! - Reading input documents and writing JSON views (`json`)
//! - Coloured terminal summaries (`summary`)

pub mod json;
pub mod summary;

// Re-export main functions
pub use json::{read_input, view_to_string, write_view};
pub use summary::{render_grid, render_scatter, render_threshold};
