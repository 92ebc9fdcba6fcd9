//! JSON input/output for snapshots and view models.
//!
//! The transforms never touch the file system; this is the only place
//! that does, on behalf of the CLI.

use crate::parser::InputDocument;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a view model to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `value` - Grid, scatter view or threshold snapshot
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::Io` - I/O error during write
/// * `OutputError::Json` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let grid = aggregate(&events, range, 100);
/// write_view(&grid, "grid.json")?;
/// ```
pub fn write_view<T: Serialize>(value: &T, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing view to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value)?;

    info!(
        "View written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a view model to a pretty JSON string
pub fn view_to_string<T: Serialize>(value: &T) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read an input document (events, statuses or series) from a JSON file
///
/// **Public** - used by every CLI command
///
/// # Errors
/// * `OutputError::Io` - File read error
/// * `OutputError::Json` - Invalid JSON, or a known key with an unusable body
/// * `OutputError::UnknownDocument` - None of the known top-level keys
pub fn read_input(input_path: impl AsRef<Path>) -> Result<InputDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading input from: {}", input_path.display());

    let file = File::open(input_path)?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;

    let document = InputDocument::from_value(value)?.ok_or_else(|| {
        OutputError::UnknownDocument(format!(
            "{} has none of the keys \"events\", \"statuses\" or \"series\"",
            input_path.display()
        ))
    })?;

    debug!("Input loaded: {} document", document.kind());

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::ThresholdCount;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_and_read_back() {
        let temp_file = NamedTempFile::new().unwrap();
        let count = ThresholdCount::new(2, 3);

        write_view(&count, temp_file.path()).unwrap();

        let text = std::fs::read_to_string(temp_file.path()).unwrap();
        let loaded: ThresholdCount = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded, count);
    }

    #[test]
    fn test_validate_output_path_empty() {
        assert!(validate_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_output_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/view.json");

        write_view(&ThresholdCount::new(0, 0), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_read_input_rejects_unknown_shape() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"rows": []}}"#).unwrap();

        assert!(matches!(
            read_input(file.path()),
            Err(OutputError::UnknownDocument(_))
        ));
    }

    #[test]
    fn test_read_input_events() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"events": [{{"timestamp": "2024-05-01T00:00:00Z", "status": "success"}}]}}"#
        )
        .unwrap();

        let doc = read_input(file.path()).unwrap();
        assert!(matches!(doc, InputDocument::Events { ref events } if events.len() == 1));
    }

    #[test]
    fn test_read_input_keeps_good_records_next_to_bad_ones() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"events": [
                {{"timestamp": "2024-05-01T00:00:00Z", "status": "success"}},
                {{"timestamp": 1714521600, "status": "failed"}}
            ]}}"#
        )
        .unwrap();

        let InputDocument::Events { events } = read_input(file.path()).unwrap() else {
            panic!("expected events document");
        };
        let parsed = crate::parser::parse_events(&events);
        assert_eq!(parsed.events.len(), 1);
        assert_eq!(parsed.unparsed, 1);
    }

    #[test]
    fn test_read_input_reports_bad_body() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"events": {{"timestamp": "2024-05-01T00:00:00Z"}}}}"#).unwrap();

        assert!(matches!(read_input(file.path()), Err(OutputError::Json(_))));
    }
}
