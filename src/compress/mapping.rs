//! Monotonic time mapping produced by a compression pass.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One compressed gap as the mapping sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct MappedGap {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,

    /// Milliseconds this gap removes from the axis
    pub removed_ms: i64,

    /// Milliseconds removed by all earlier gaps
    pub removed_before_ms: i64,
}

impl MappedGap {
    fn removed_through_ms(&self) -> i64 {
        self.removed_before_ms + self.removed_ms
    }
}

/// Monotonic non-decreasing `Instant -> Instant'` map
///
/// `apply(t) = t - (compression of every gap ending at or before t)`.
/// The same mapping is applied to every series so they stay aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeMapping {
    gaps: Vec<MappedGap>,
}

impl TimeMapping {
    pub fn identity() -> Self {
        Self::default()
    }

    /// Gaps must be ascending and non-overlapping
    pub(crate) fn from_gaps(gaps: Vec<MappedGap>) -> Self {
        Self { gaps }
    }

    pub fn is_identity(&self) -> bool {
        self.gaps.iter().all(|g| g.removed_ms == 0)
    }

    pub fn total_compression_ms(&self) -> i64 {
        self.gaps.last().map_or(0, MappedGap::removed_through_ms)
    }

    /// Map an original instant onto the compressed axis
    ///
    /// Instants strictly inside a gap never come from the data (gaps lie
    /// between consecutive samples), but the renderer may still ask, e.g.
    /// for a range bound. They are squeezed proportionally into the
    /// compressed slot, which keeps the map continuous and monotonic.
    pub fn apply(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        let before = self.gaps.partition_point(|g| g.end <= t);
        let removed = if before == 0 {
            0
        } else {
            self.gaps[before - 1].removed_through_ms()
        };

        if let Some(gap) = self.gaps.get(before) {
            if gap.start < t {
                let span_ms = (gap.end - gap.start).num_milliseconds();
                let kept_ms = span_ms - gap.removed_ms;
                let into_ms = (t - gap.start).num_milliseconds();
                let scaled = if span_ms > 0 {
                    (into_ms as i128 * kept_ms as i128 / span_ms as i128) as i64
                } else {
                    0
                };
                return gap.start - Duration::milliseconds(removed) + Duration::milliseconds(scaled);
            }
        }

        t - Duration::milliseconds(removed)
    }

    /// Map a batch of instants
    pub fn apply_all(&self, ts: &[DateTime<Utc>]) -> Vec<DateTime<Utc>> {
        ts.iter().map(|t| self.apply(*t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn minute(m: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap() + Duration::minutes(m)
    }

    fn single_gap() -> TimeMapping {
        // 10 -> 110 squeezed to 10 minutes wide
        TimeMapping::from_gaps(vec![MappedGap {
            start: minute(10),
            end: minute(110),
            removed_ms: Duration::minutes(90).num_milliseconds(),
            removed_before_ms: 0,
        }])
    }

    #[test]
    fn test_identity() {
        let mapping = TimeMapping::identity();
        assert!(mapping.is_identity());
        assert_eq!(mapping.apply(minute(42)), minute(42));
        assert_eq!(mapping.total_compression_ms(), 0);
    }

    #[test]
    fn test_shift_after_gap() {
        let mapping = single_gap();
        assert_eq!(mapping.apply(minute(5)), minute(5));
        assert_eq!(mapping.apply(minute(10)), minute(10));
        assert_eq!(mapping.apply(minute(110)), minute(20));
        assert_eq!(mapping.apply(minute(130)), minute(40));
    }

    #[test]
    fn test_inside_gap_is_squeezed() {
        let mapping = single_gap();
        // halfway through the gap lands halfway through the slot
        assert_eq!(mapping.apply(minute(60)), minute(15));
    }

    #[test]
    fn test_monotonic_across_gap() {
        let mapping = single_gap();
        let mapped: Vec<_> = (0..150).map(|m| mapping.apply(minute(m))).collect();
        assert!(mapped.windows(2).all(|w| w[0] <= w[1]));
    }
}
