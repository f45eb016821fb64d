//! Extract command implementation.
//!
//! The extract command:
//! 1. Walks each subject's raw JSON tree
//! 2. Flattens leaves into record sets
//! 3. Writes one CSV per subject
//! 4. Writes the run summary manifest
//!
//! A subject whose root directory is missing is reported and skipped;
//! the other subjects still run.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::ValueEnum;
use log::{info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::extractor::schema::{ExtractSummary, SubjectSummary, WalkStats};
use crate::extractor::{
    extract_aggregated_transactions, extract_aggregated_users, extract_map_transactions,
    extract_map_users, extract_top_transactions, extract_top_users,
};
use crate::output::{write_records, write_summary};
use crate::utils::config::{
    Subject, AGGREGATED_TRANSACTION_SUBPATH, AGGREGATED_USER_SUBPATH, MAP_TRANSACTION_SUBPATH,
    MAP_USER_SUBPATH, SCHEMA_VERSION, SUMMARY_FILE, TOP_TRANSACTION_SUBPATH, TOP_USER_SUBPATH,
};
use crate::utils::error::ExtractError;

/// One runnable extractor unit, as selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExtractUnit {
    AggregatedTransactions,
    AggregatedUsers,
    MapTransactions,
    MapUsers,
    /// Produces both the top-district and top-pincode subjects
    TopTransactions,
    TopUsers,
}

impl ExtractUnit {
    /// All units, in run order
    pub const ALL: [ExtractUnit; 6] = [
        ExtractUnit::AggregatedTransactions,
        ExtractUnit::AggregatedUsers,
        ExtractUnit::MapTransactions,
        ExtractUnit::MapUsers,
        ExtractUnit::TopTransactions,
        ExtractUnit::TopUsers,
    ];

    /// Source subpath under the data dir
    fn subpath(&self) -> &'static str {
        match self {
            ExtractUnit::AggregatedTransactions => AGGREGATED_TRANSACTION_SUBPATH,
            ExtractUnit::AggregatedUsers => AGGREGATED_USER_SUBPATH,
            ExtractUnit::MapTransactions => MAP_TRANSACTION_SUBPATH,
            ExtractUnit::MapUsers => MAP_USER_SUBPATH,
            ExtractUnit::TopTransactions => TOP_TRANSACTION_SUBPATH,
            ExtractUnit::TopUsers => TOP_USER_SUBPATH,
        }
    }
}

/// Arguments for the extract command
#[derive(Debug, Clone)]
pub struct ExtractArgs {
    /// Root of the raw telemetry tree
    pub data_dir: PathBuf,

    /// Directory for the CSV intermediates and run summary
    pub out_dir: PathBuf,

    /// Single unit to run (None = all)
    pub unit: Option<ExtractUnit>,
}

/// Validate extract arguments
pub fn validate_args(args: &ExtractArgs) -> Result<()> {
    if args.data_dir.as_os_str().is_empty() {
        anyhow::bail!("data directory cannot be empty");
    }
    if args.out_dir.as_os_str().is_empty() {
        anyhow::bail!("output directory cannot be empty");
    }
    if args.data_dir == args.out_dir {
        anyhow::bail!("output directory must differ from the data directory");
    }
    Ok(())
}

/// Execute the extract command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The run summary that was also written to disk
pub fn execute_extract(args: &ExtractArgs) -> Result<ExtractSummary> {
    let units = match args.unit {
        Some(unit) => vec![unit],
        None => ExtractUnit::ALL.to_vec(),
    };

    info!("Looking for JSON files under: {}", args.data_dir.display());

    let mut subjects = Vec::new();
    for unit in units {
        run_unit(unit, &args.data_dir, &args.out_dir, &mut subjects)?;
    }

    let summary = ExtractSummary {
        version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        subjects,
    };

    write_summary(&summary, args.out_dir.join(SUMMARY_FILE))
        .context("Failed to write run summary")?;

    if summary.total_records() == 0 {
        warn!("No data extracted. Check your paths and JSON files.");
    } else {
        info!("Extracted {} records total", summary.total_records());
    }

    Ok(summary)
}

/// Run one extractor unit, appending per-subject outcomes
///
/// An extractor failure (missing root, unreadable tree) halts that unit
/// only and is reported; a CSV write failure is a real error and
/// propagates.
fn run_unit(
    unit: ExtractUnit,
    data_dir: &Path,
    out_dir: &Path,
    subjects: &mut Vec<SubjectSummary>,
) -> Result<()> {
    let root = data_dir.join(unit.subpath());

    match unit {
        ExtractUnit::AggregatedTransactions => match extract_aggregated_transactions(&root) {
            Ok(x) => write_subject(out_dir, Subject::AggregatedTransactions, &x.records, x.stats, subjects)?,
            Err(e) => skip_unit(unit, &e),
        },
        ExtractUnit::AggregatedUsers => match extract_aggregated_users(&root) {
            Ok(x) => write_subject(out_dir, Subject::AggregatedUsers, &x.records, x.stats, subjects)?,
            Err(e) => skip_unit(unit, &e),
        },
        ExtractUnit::MapTransactions => match extract_map_transactions(&root) {
            Ok(x) => write_subject(out_dir, Subject::MapTransactions, &x.records, x.stats, subjects)?,
            Err(e) => skip_unit(unit, &e),
        },
        ExtractUnit::MapUsers => match extract_map_users(&root) {
            Ok(x) => write_subject(out_dir, Subject::MapUsers, &x.records, x.stats, subjects)?,
            Err(e) => skip_unit(unit, &e),
        },
        ExtractUnit::TopTransactions => match extract_top_transactions(&root) {
            Ok(top) => {
                write_subject(out_dir, Subject::TopDistricts, &top.districts, top.stats, subjects)?;
                write_subject(out_dir, Subject::TopPincodes, &top.pincodes, top.stats, subjects)?;
            }
            Err(e) => skip_unit(unit, &e),
        },
        ExtractUnit::TopUsers => match extract_top_users(&root) {
            Ok(x) => write_subject(out_dir, Subject::TopUsers, &x.records, x.stats, subjects)?,
            Err(e) => skip_unit(unit, &e),
        },
    }
    Ok(())
}

fn skip_unit(unit: ExtractUnit, error: &ExtractError) {
    warn!("Skipping {:?}: {}", unit, error);
}

/// Write one subject's CSV (unless empty) and record its summary
fn write_subject<T: Serialize>(
    out_dir: &Path,
    subject: Subject,
    records: &[T],
    stats: WalkStats,
    subjects: &mut Vec<SubjectSummary>,
) -> Result<()> {
    if records.is_empty() {
        warn!("{}: no records extracted, skipping CSV", subject);
    } else {
        let path = out_dir.join(subject.csv_file());
        write_records(records, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("{}: {} records written", subject, records.len());
    }

    subjects.push(SubjectSummary {
        subject: subject.table_name().to_string(),
        files_visited: stats.files_visited,
        files_skipped: stats.files_skipped,
        records: records.len(),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_valid() {
        let args = ExtractArgs {
            data_dir: PathBuf::from("data/raw"),
            out_dir: PathBuf::from("data/processed"),
            unit: None,
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_same_dirs() {
        let args = ExtractArgs {
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("data"),
            unit: None,
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_data_dir() {
        let args = ExtractArgs {
            data_dir: PathBuf::new(),
            out_dir: PathBuf::from("data/processed"),
            unit: None,
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_missing_roots_yield_empty_summary() {
        let dir = tempfile::tempdir().unwrap();
        let args = ExtractArgs {
            data_dir: dir.path().join("raw"),
            out_dir: dir.path().join("processed"),
            unit: None,
        };

        let summary = execute_extract(&args).unwrap();
        assert_eq!(summary.total_records(), 0);
        assert!(summary.subjects.is_empty());
        assert!(args.out_dir.join(SUMMARY_FILE).exists());
    }
}
