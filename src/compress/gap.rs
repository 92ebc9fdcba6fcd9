//! Gap detection over the union of series timestamps.

use super::mapping::{MappedGap, TimeMapping};
use crate::parser::Series;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// An abnormally long stretch with no samples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub original_start: DateTime<Utc>,
    pub original_end: DateTime<Utc>,
    pub duration_ms: i64,

    /// Where the renderer draws the break marker on the compressed axis
    pub compressed_anchor: DateTime<Utc>,
}

/// Result of one compression pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compression {
    pub mapping: TimeMapping,
    pub gaps: Vec<Gap>,
    pub total_compression_ms: i64,
}

impl Compression {
    /// Width between two instants after compression
    pub fn compressed_span(&self, first: DateTime<Utc>, last: DateTime<Utc>) -> Duration {
        self.mapping.apply(last) - self.mapping.apply(first)
    }
}

/// Running state of the left-to-right scan
#[derive(Debug, Default)]
struct Scan {
    mapped: Vec<MappedGap>,
    gaps: Vec<Gap>,
    removed_ms: i64,
}

/// Sorted, deduplicated union of every series' timestamps
///
/// Deduplication only affects detection; the series themselves are
/// left untouched.
pub fn union_timestamps(series: &[Series]) -> Vec<DateTime<Utc>> {
    let mut all: Vec<DateTime<Utc>> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.x))
        .collect();
    all.sort_unstable();
    all.dedup();
    all
}

/// Detect gaps and build the compression mapping
///
/// **Public** - main entry point for time compression
///
/// # Arguments
/// * `timestamps` - Union of all series timestamps (sorted and
///   deduplicated here if the caller did not)
/// * `gap_threshold` - Consecutive samples further apart than this form a gap
/// * `compressed_gap_size` - Width each gap keeps after compression
///
/// # Returns
/// The mapping plus one `Gap` per detected gap, in time order. Fewer
/// than two distinct timestamps yield the identity mapping.
pub fn compress(
    timestamps: &[DateTime<Utc>],
    gap_threshold: Duration,
    compressed_gap_size: Duration,
) -> Compression {
    let mut sorted = timestamps.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    if sorted.len() < 2 {
        return Compression::default();
    }

    let threshold_ms = gap_threshold.num_milliseconds();
    let slot_ms = compressed_gap_size.num_milliseconds().max(0);

    let scan = sorted.windows(2).fold(Scan::default(), |mut scan, pair| {
        let (start, end) = (pair[0], pair[1]);
        let duration_ms = (end - start).num_milliseconds();

        if duration_ms <= threshold_ms {
            return scan;
        }

        // A gap narrower than the slot keeps its width
        let removed_ms = (duration_ms - slot_ms).max(0);
        let kept_ms = duration_ms - removed_ms;
        let mapped_start = start - Duration::milliseconds(scan.removed_ms);

        scan.mapped.push(MappedGap {
            start,
            end,
            removed_ms,
            removed_before_ms: scan.removed_ms,
        });
        scan.gaps.push(Gap {
            original_start: start,
            original_end: end,
            duration_ms,
            compressed_anchor: mapped_start + Duration::milliseconds(kept_ms / 2),
        });
        scan.removed_ms += removed_ms;
        scan
    });

    debug!(
        "Detected {} gaps over {} timestamps, removing {} ms",
        scan.gaps.len(),
        sorted.len(),
        scan.removed_ms
    );

    Compression {
        mapping: TimeMapping::from_gaps(scan.mapped),
        gaps: scan.gaps,
        total_compression_ms: scan.removed_ms,
    }
}
