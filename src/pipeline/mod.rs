//! Composition of the transforms into renderer-ready views.
//!
//! - Scatter view: gap compression on x, axis transform on y (`scatter`)
//! - "Latest request wins" sequencing for off-thread callers (`sequence`)

pub mod scatter;
pub mod sequence;

pub use scatter::{build_scatter_view, ScatterOptions, ScatterPoint, ScatterSeries, ScatterView};
pub use sequence::{RequestSequencer, RequestTicket};
