//! Cell colour resolution.
//!
//! Colours are a priority rule over the cell's counts, never a blend.

use super::aggregator::RawCounts;
use crate::parser::Category;
use crate::utils::config::{FAILED_SATURATION_RATIO, SUCCESS_SATURATION_RATIO};
use serde::{Deserialize, Serialize};

/// Colour class of a heatmap cell
///
/// The renderer owns the actual palette; this only names the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellColor {
    /// Empty cell
    NoData,
    Neutral,
    Green,
    LightGreen,
    Red,
    LightRed,
    Amber,
    Blue,
}

impl CellColor {
    /// Direct mapping used when a cell holds exactly one event
    pub fn for_status(status: Category) -> Self {
        match status {
            Category::Success | Category::Healthy => CellColor::Green,
            Category::Failed | Category::Unhealthy => CellColor::Red,
            Category::Skipped | Category::Warning => CellColor::Amber,
            Category::Started => CellColor::Blue,
            Category::Unknown => CellColor::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CellColor::NoData => "no_data",
            CellColor::Neutral => "neutral",
            CellColor::Green => "green",
            CellColor::LightGreen => "light_green",
            CellColor::Red => "red",
            CellColor::LightRed => "light_red",
            CellColor::Amber => "amber",
            CellColor::Blue => "blue",
        }
    }
}

/// Resolve a cell's colour from its contents
///
/// **Public** - the priority rule shared by both grid input modes
///
/// # Arguments
/// * `counts` - Outcome breakdown of the cell
/// * `single` - The cell's status when it holds exactly one event
///
/// # Rule
/// 1. Empty cell: no data
/// 2. One event: colour of its status
/// 3. Any failure: red if failures are more than half, else light red
/// 4. Any success: green if successes are more than 70%, else light green
/// 5. Any skip: amber
/// 6. Otherwise neutral
pub fn resolve_color(counts: &RawCounts, single: Option<Category>) -> CellColor {
    let total = counts.total();

    if total == 0 {
        return CellColor::NoData;
    }

    if total == 1 {
        if let Some(status) = single {
            return CellColor::for_status(status);
        }
    }

    let total = total as f64;

    if counts.failed > 0 {
        if counts.failed as f64 / total > FAILED_SATURATION_RATIO {
            CellColor::Red
        } else {
            CellColor::LightRed
        }
    } else if counts.success > 0 {
        if counts.success as f64 / total > SUCCESS_SATURATION_RATIO {
            CellColor::Green
        } else {
            CellColor::LightGreen
        }
    } else if counts.skipped > 0 {
        CellColor::Amber
    } else {
        CellColor::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(success: usize, failed: usize, skipped: usize, other: usize) -> RawCounts {
        RawCounts {
            success,
            failed,
            skipped,
            other,
        }
    }

    #[test]
    fn test_empty_is_no_data() {
        assert_eq!(resolve_color(&RawCounts::default(), None), CellColor::NoData);
    }

    #[test]
    fn test_single_event_maps_directly() {
        assert_eq!(
            resolve_color(&counts(0, 0, 0, 1), Some(Category::Started)),
            CellColor::Blue
        );
        assert_eq!(
            resolve_color(&counts(0, 1, 0, 0), Some(Category::Unhealthy)),
            CellColor::Red
        );
        assert_eq!(
            resolve_color(&counts(0, 0, 0, 1), Some(Category::Unknown)),
            CellColor::Neutral
        );
    }

    #[test]
    fn test_failure_takes_priority() {
        // 1 of 10 failed still paints the cell red-ish
        assert_eq!(resolve_color(&counts(9, 1, 0, 0), None), CellColor::LightRed);
        assert_eq!(resolve_color(&counts(1, 2, 0, 0), None), CellColor::Red);
        // exactly half is not "more than half"
        assert_eq!(resolve_color(&counts(1, 1, 0, 0), None), CellColor::LightRed);
    }

    #[test]
    fn test_success_saturation_boundary() {
        assert_eq!(resolve_color(&counts(8, 0, 2, 0), None), CellColor::Green);
        // exactly 70% stays light
        assert_eq!(resolve_color(&counts(7, 0, 3, 0), None), CellColor::LightGreen);
    }

    #[test]
    fn test_skipped_and_neutral() {
        assert_eq!(resolve_color(&counts(0, 0, 2, 1), None), CellColor::Amber);
        assert_eq!(resolve_color(&counts(0, 0, 0, 3), None), CellColor::Neutral);
    }
}
