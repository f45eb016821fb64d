//! CSV writers and readers for the flattened record sets.
//!
//! Column headers come from the record struct field names via serde.

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::utils::error::OutputError;

/// Write a record set to a CSV file
///
/// **Public** - main entry point for CSV output
///
/// Creates parent directories on demand. An empty record set still
/// produces a file (with no rows); callers that want skip-on-empty
/// semantics check before calling.
///
/// # Errors
/// * `OutputError::Csv` - CSV serialization error
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - path is empty, a directory, or cannot be created
pub fn write_records<T: Serialize>(
    records: &[T],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!(
        "Writing {} records to: {}",
        records.len(),
        output_path.display()
    );

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
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

    let mut writer = csv::Writer::from_path(output_path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Read a record set back from a CSV file
///
/// Used by the tests and by anything that wants to inspect an
/// intermediate without going through the store.
pub fn read_records<T: DeserializeOwned>(
    input_path: impl AsRef<Path>,
) -> Result<Vec<T>, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading records from: {}", input_path.display());

    let mut reader = csv::Reader::from_path(input_path)?;
    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result?);
    }

    debug!("Loaded {} records", records.len());

    Ok(records)
}

/// Validate that output path is writable
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
