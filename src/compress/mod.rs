//! Time-axis gap compression.
//!
//! Long stretches with no samples waste horizontal space in a scatter
//! view. This module detects them over the union of all series and
//! builds one monotonic mapping that squeezes each gap to a fixed width:
//! - Gap detection as a fold over sorted timestamps (`gap`)
//! - The resulting instant-to-instant mapping (`mapping`)

pub mod gap;
pub mod mapping;

// Re-export main types and functions
pub use gap::{compress, union_timestamps, Compression, Gap};
pub use mapping::TimeMapping;
