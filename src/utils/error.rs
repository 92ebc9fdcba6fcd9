//! Error types for the edges of the crate.
//!
//! The transforms themselves never fail; every degenerate input is
//! represented in the returned value. Errors only exist where we touch
//! configuration or the file system. We use `thiserror` for these
//! library-style errors and `anyhow` in main.rs and the commands.

use thiserror::Error;

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid axis calibration: {0}")]
    InvalidCalibration(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that can occur while reading inputs or writing view models
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Unrecognised input document: {0}")]
    UnknownDocument(String),
}
