use chrono::{DateTime, Duration, TimeZone, Utc};
use health_timeline::compress::{compress, union_timestamps};
use health_timeline::parser::Series;
use pretty_assertions::assert_eq;

fn minute(m: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap() + Duration::minutes(m)
}

#[test]
fn test_gap_compression_arithmetic() {
    let ts: Vec<_> = [0, 1, 2, 200].iter().map(|m| minute(*m)).collect();
    let result = compress(&ts, Duration::minutes(60), Duration::minutes(5));

    assert_eq!(result.gaps.len(), 1);
    assert_eq!(result.gaps[0].original_start, minute(2));
    assert_eq!(result.gaps[0].original_end, minute(200));
    assert_eq!(result.gaps[0].duration_ms, 198 * 60_000);

    // One gap removes 198 - 5 minutes
    assert_eq!(result.total_compression_ms, 193 * 60_000);
    // so first to last spans 200 - 193 = 7 minutes, not 9
    assert_eq!(result.compressed_span(minute(0), minute(200)), Duration::minutes(7));
    assert_eq!(result.gaps[0].compressed_anchor, minute(2) + Duration::seconds(150));
}

#[test]
fn test_mapping_consistency_across_series() {
    let shared = minute(300);
    let a = Series::from_pairs("a", vec![(minute(0), 1.0), (shared, 2.0), (minute(301), 1.0)]);
    let b = Series::from_pairs("b", vec![(minute(150), 3.0), (shared, 9.0)]);

    let result = compress(
        &union_timestamps(&[a.clone(), b.clone()]),
        Duration::minutes(60),
        Duration::minutes(5),
    );

    let from_a = result.mapping.apply(a.points[1].x);
    let from_b = result.mapping.apply(b.points[1].x);
    assert_eq!(from_a, from_b);
    assert_eq!(result.gaps.len(), 2);
}

#[test]
fn test_union_detection_differs_from_per_series() {
    // Alone, each series has a 100-minute hole; together there is none
    let a = Series::from_pairs("a", vec![(minute(0), 1.0), (minute(100), 1.0)]);
    let b = Series::from_pairs("b", vec![(minute(50), 1.0)]);

    let per_series = compress(
        &union_timestamps(std::slice::from_ref(&a)),
        Duration::minutes(60),
        Duration::minutes(5),
    );
    assert_eq!(per_series.gaps.len(), 1);

    let union = compress(&union_timestamps(&[a, b]), Duration::minutes(60), Duration::minutes(5));
    assert!(union.gaps.is_empty());
}

#[test]
fn test_mapping_is_monotonic() {
    let ts: Vec<_> = [0, 5, 90, 91, 400, 401, 402, 1000]
        .iter()
        .map(|m| minute(*m))
        .collect();
    let result = compress(&ts, Duration::minutes(30), Duration::minutes(5));

    let mapped: Vec<_> = (-10..1100).map(|m| result.mapping.apply(minute(m))).collect();
    assert!(mapped.windows(2).all(|w| w[0] <= w[1]));

    // Data timestamps keep their order and gaps shrink to the slot width
    let data = result.mapping.apply_all(&ts);
    assert_eq!(data[2] - data[1], Duration::minutes(5));
    assert_eq!(data[7] - data[6], Duration::minutes(5));
}

#[test]
fn test_degenerate_inputs() {
    let empty = compress(&[], Duration::minutes(60), Duration::minutes(5));
    assert!(empty.gaps.is_empty());
    assert_eq!(empty.mapping.apply(minute(7)), minute(7));

    let dupes = compress(&[minute(4), minute(4)], Duration::minutes(60), Duration::minutes(5));
    assert!(dupes.gaps.is_empty());
    assert!(dupes.mapping.is_identity());
}
