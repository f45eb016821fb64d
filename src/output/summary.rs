//! Run manifest writer.
//!
//! After an extraction run, a small JSON manifest records what each
//! subject produced so a load or audit step can cross-check the CSVs.

use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::extractor::schema::ExtractSummary;
use crate::utils::error::OutputError;

/// Write the extraction summary as pretty JSON
pub fn write_summary(
    summary: &ExtractSummary,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing run summary to: {}", output_path.display());

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, summary).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Read a summary back from disk
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<ExtractSummary, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading run summary from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let summary: ExtractSummary =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::schema::SubjectSummary;

    fn sample_summary() -> ExtractSummary {
        ExtractSummary {
            version: "1.0.0".to_string(),
            generated_at: "2024-01-01T00:00:00+00:00".to_string(),
            subjects: vec![
                SubjectSummary {
                    subject: "aggregated_transactions".to_string(),
                    files_visited: 4,
                    files_skipped: 1,
                    records: 12,
                },
                SubjectSummary {
                    subject: "top_users".to_string(),
                    files_visited: 2,
                    files_skipped: 0,
                    records: 20,
                },
            ],
        }
    }

    #[test]
    fn test_write_and_read_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extract_summary.json");

        let summary = sample_summary();
        write_summary(&summary, &path).unwrap();

        let loaded = read_summary(&path).unwrap();
        assert_eq!(loaded.version, summary.version);
        assert_eq!(loaded.subjects.len(), 2);
        assert_eq!(loaded.total_records(), 32);
    }
}
