use chrono::{DateTime, Duration, TimeZone, Utc};
use health_timeline::grid::{aggregate, aggregate_statuses, CellColor};
use health_timeline::parser::{parse_events, Category, Event, RawEvent, RawRecord, TimeRange};
use pretty_assertions::assert_eq;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
}

fn day() -> TimeRange {
    TimeRange::new(base(), base() + Duration::hours(24))
}

fn event(offset_secs: i64, status: Category) -> Event {
    Event::new(base() + Duration::seconds(offset_secs), status)
}

#[test]
fn test_partition_property() {
    // Pseudo-random spread, some before and after the range
    let statuses = [
        Category::Success,
        Category::Failed,
        Category::Skipped,
        Category::Healthy,
        Category::Started,
        Category::Unknown,
    ];
    let events: Vec<Event> = (0..500)
        .map(|i| {
            let offset = (i * 7919 % 100_000) as i64 - 5_000;
            event(offset, statuses[i % statuses.len()])
        })
        .collect();

    for cells in [1, 7, 24, 100, 1000] {
        let grid = aggregate(&events, day(), cells);
        let in_cells: usize = grid.cells.iter().map(|c| c.counts.total()).sum();
        assert_eq!(in_cells + grid.out_of_range, events.len(), "cells = {}", cells);
        assert_eq!(grid.cells.len(), cells);
    }
}

#[test]
fn test_cells_partition_range_contiguously() {
    let grid = aggregate(&[], TimeRange::new(base(), base() + Duration::milliseconds(1_000_003)), 97);
    assert_eq!(grid.cells.first().unwrap().start, grid.range.start);
    assert_eq!(grid.cells.last().unwrap().end, grid.range.end);
    assert!(grid.cells.windows(2).all(|w| w[0].end == w[1].start));
    assert!(grid.cells.iter().all(|c| c.start <= c.end));
}

#[test]
fn test_empty_input_property() {
    let grid = aggregate(&[], day(), 100);
    assert_eq!(grid.cells.len(), 100);
    assert!(grid
        .cells
        .iter()
        .all(|c| c.color == CellColor::NoData && c.tooltip.ends_with("| no data")));
    assert_eq!(grid.out_of_range, 0);
}

#[test]
fn test_every_event_lands_in_its_own_cell_bounds() {
    let events: Vec<Event> = (0..200).map(|i| event(i * 431, Category::Success)).collect();
    let grid = aggregate(&events, day(), 13);

    for ev in &events {
        let holders: Vec<_> = grid
            .cells
            .iter()
            .filter(|c| c.start <= ev.timestamp && ev.timestamp < c.end)
            .collect();
        assert_eq!(holders.len(), 1);
        assert!(holders[0].counts.total() > 0);
    }
}

#[test]
fn test_priority_rule_across_cells() {
    let hour = 3600;
    let events = vec![
        // cell 0: 2 failed of 3 -> red
        event(10, Category::Failed),
        event(20, Category::Failed),
        event(30, Category::Success),
        // cell 1: 1 failed of 4 -> light red
        event(hour + 1, Category::Failed),
        event(hour + 2, Category::Success),
        event(hour + 3, Category::Success),
        event(hour + 4, Category::Success),
        // cell 2: 4 of 5 success -> green
        event(2 * hour + 1, Category::Success),
        event(2 * hour + 2, Category::Success),
        event(2 * hour + 3, Category::Healthy),
        event(2 * hour + 4, Category::Success),
        event(2 * hour + 5, Category::Skipped),
        // cell 3: 2 of 3 success -> light green
        event(3 * hour + 1, Category::Success),
        event(3 * hour + 2, Category::Success),
        event(3 * hour + 3, Category::Warning),
        // cell 4: only skips -> amber
        event(4 * hour + 1, Category::Skipped),
        event(4 * hour + 2, Category::Skipped),
        // cell 5: single started event -> blue
        event(5 * hour + 1, Category::Started),
        // cell 6: unknown and started -> neutral
        event(6 * hour + 1, Category::Unknown),
        event(6 * hour + 2, Category::Started),
    ];

    let grid = aggregate(&events, day(), 24);
    let colors: Vec<CellColor> = grid.cells.iter().take(8).map(|c| c.color).collect();

    assert_eq!(
        colors,
        vec![
            CellColor::Red,
            CellColor::LightRed,
            CellColor::Green,
            CellColor::LightGreen,
            CellColor::Amber,
            CellColor::Blue,
            CellColor::Neutral,
            CellColor::NoData,
        ]
    );
}

#[test]
fn test_both_input_modes_are_structurally_identical() {
    let statuses = [Category::Success, Category::Failed, Category::Skipped, Category::Started];
    let range = TimeRange::new(base(), base() + Duration::hours(4));

    // One event at the start of each hour vs the same statuses pre-aggregated
    let events: Vec<Event> = statuses
        .iter()
        .enumerate()
        .map(|(i, s)| event(i as i64 * 3600, *s))
        .collect();

    let from_events = aggregate(&events, range, 4);
    let from_statuses = aggregate_statuses(&statuses, range, 4);

    assert_eq!(from_events, from_statuses);
}

#[test]
fn test_unparsed_and_out_of_range_are_separate_diagnostics() {
    let raw: Vec<RawRecord<RawEvent>> = vec![
        RawEvent {
            timestamp: "2024-05-01T01:00:00Z".into(),
            status: "success".into(),
            latency_ms: Some(850.0),
            status_code: Some(200),
            error_type: None,
        }
        .into(),
        RawEvent {
            timestamp: "2024-04-30T23:00:00Z".into(),
            status: "failed".into(),
            latency_ms: None,
            status_code: Some(500),
            error_type: Some("upstream_timeout".into()),
        }
        .into(),
        RawEvent {
            timestamp: "soon".into(),
            status: "failed".into(),
            latency_ms: None,
            status_code: None,
            error_type: None,
        }
        .into(),
    ];

    let parsed = parse_events(&raw);
    let grid = aggregate(&parsed.events, day(), 24);

    assert_eq!(parsed.unparsed, 1);
    assert_eq!(grid.out_of_range, 1);
    assert_eq!(grid.counts().success, 1);
    assert_eq!(grid.cells[1].color, CellColor::Green);
}

#[test]
fn test_zero_width_cells_stay_empty() {
    // 3 ms split into 10 cells: most cells have no width
    let range = TimeRange::new(base(), base() + Duration::milliseconds(3));
    let events: Vec<Event> = (0..3)
        .map(|ms| Event::new(base() + Duration::milliseconds(ms), Category::Success))
        .collect();

    let grid = aggregate(&events, range, 10);

    assert_eq!(grid.cells.len(), 10);
    assert_eq!(grid.out_of_range, 0);
    assert_eq!(grid.populated_cells(), 3);
    for cell in &grid.cells {
        if cell.start == cell.end {
            assert_eq!(cell.counts.total(), 0);
            assert_eq!(cell.color, CellColor::NoData);
        }
    }
    for event in &events {
        let holder = grid
            .cells
            .iter()
            .find(|c| c.counts.total() > 0 && c.start <= event.timestamp && event.timestamp < c.end);
        assert!(holder.is_some(), "no cell holds {}", event.timestamp);
    }
}
