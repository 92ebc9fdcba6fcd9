use std::path::PathBuf;

/// Arguments for the grid command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct GridArgs {
    /// Input JSON with `events` or `statuses`
    pub input: PathBuf,

    /// Optional TOML configuration
    pub config: Option<PathBuf>,

    /// Overrides `grid_cell_count`
    pub cells: Option<usize>,

    /// Explicit range start (ISO-8601)
    pub start: Option<String>,

    /// Explicit range end (ISO-8601)
    pub end: Option<String>,

    /// Output path for the grid JSON
    pub output: Option<PathBuf>,

    /// Print coloured strip to stdout
    pub print_summary: bool,
}

/// Arguments for the scatter command
#[derive(Debug, Clone, Default)]
pub struct ScatterArgs {
    /// Input JSON with `series`
    pub input: PathBuf,

    pub config: Option<PathBuf>,

    /// Output path for the scatter view JSON
    pub output: Option<PathBuf>,

    pub print_summary: bool,
}

/// Arguments for the threshold command
#[derive(Debug, Clone, Default)]
pub struct ThresholdArgs {
    /// Input JSON with `series`
    pub input: PathBuf,

    pub config: Option<PathBuf>,

    /// Cursor value, real units unless `display` is set
    pub cursor: f64,

    /// Treat `cursor` as a display-domain value
    pub display: bool,

    /// Output path for the snapshot JSON
    pub output: Option<PathBuf>,
}
