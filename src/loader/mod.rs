//! Loading of CSV intermediates into the DuckDB store.
//!
//! Each subject's table is replaced wholesale: drop, then recreate from
//! the CSV's full contents. A missing CSV is skipped with a warning so
//! one absent subject never fails the whole load. Re-running with the
//! same inputs yields bit-identical tables.

use duckdb::Connection;
use log::{info, warn};
use std::path::Path;

use crate::utils::config::Subject;
use crate::utils::error::LoadError;

/// Outcome of one load run
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

/// Load every subject CSV found under `processed_dir` into the store
///
/// **Public** - main entry point for the load stage
///
/// Creates the database (and its parent directory) if absent.
///
/// # Errors
/// * `LoadError::Database` - DuckDB rejected a statement
/// * `LoadError::Io` - the database directory could not be created
pub fn load_store(processed_dir: &Path, db_path: &Path) -> Result<LoadReport, LoadError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(db_path)?;
    info!("Loading store at: {}", db_path.display());

    let mut report = LoadReport::default();
    for subject in Subject::ALL {
        let csv_path = processed_dir.join(subject.csv_file());
        if !csv_path.exists() {
            warn!("{} not found. Skipping.", csv_path.display());
            report.skipped.push(subject.table_name());
            continue;
        }

        info!("Loading {} -> {}", subject.csv_file(), subject.table_name());
        replace_table(&conn, subject.table_name(), &csv_path)?;
        report.loaded.push(subject.table_name());
    }

    Ok(report)
}

/// Replace one table with the full contents of a CSV file
pub fn replace_table(conn: &Connection, table: &str, csv_path: &Path) -> Result<(), LoadError> {
    // Single-quote escaping for the path literal; table names come from
    // the fixed Subject set, not user input.
    let path_literal = csv_path.to_string_lossy().replace('\'', "''");
    let sql = format!(
        "DROP TABLE IF EXISTS {table}; \
         CREATE TABLE {table} AS SELECT * FROM read_csv_auto('{path_literal}');"
    );
    conn.execute_batch(&sql)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::schema::TransactionRecord;
    use crate::output::write_records;

    fn sample_records() -> Vec<TransactionRecord> {
        vec![
            TransactionRecord {
                state: "goa".to_string(),
                year: 2021,
                quarter: 1,
                transaction_type: "P2P".to_string(),
                count: 10,
                amount: 100.0,
            },
            TransactionRecord {
                state: "kerala".to_string(),
                year: 2021,
                quarter: 2,
                transaction_type: "P2M".to_string(),
                count: 5,
                amount: 50.0,
            },
        ]
    }

    fn table_rows(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn test_load_creates_table_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let processed = dir.path().join("processed");
        let db_path = dir.path().join("db/pulse.duckdb");

        write_records(
            &sample_records(),
            processed.join(Subject::AggregatedTransactions.csv_file()),
        )
        .unwrap();

        let report = load_store(&processed, &db_path).unwrap();
        assert_eq!(report.loaded, vec!["aggregated_transactions"]);
        assert_eq!(report.skipped.len(), 6);

        let conn = Connection::open(&db_path).unwrap();
        assert_eq!(table_rows(&conn, "aggregated_transactions"), 2);
    }

    #[test]
    fn test_reload_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let processed = dir.path().join("processed");
        let db_path = dir.path().join("pulse.duckdb");

        write_records(
            &sample_records(),
            processed.join(Subject::AggregatedTransactions.csv_file()),
        )
        .unwrap();

        load_store(&processed, &db_path).unwrap();
        load_store(&processed, &db_path).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        assert_eq!(table_rows(&conn, "aggregated_transactions"), 2);

        let total: f64 = conn
            .query_row(
                "SELECT SUM(amount) FROM aggregated_transactions",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(total, 150.0);
    }

    #[test]
    fn test_replace_drops_old_contents() {
        let dir = tempfile::tempdir().unwrap();
        let processed = dir.path().join("processed");
        let db_path = dir.path().join("pulse.duckdb");
        let csv_path = processed.join(Subject::AggregatedTransactions.csv_file());

        write_records(&sample_records(), &csv_path).unwrap();
        load_store(&processed, &db_path).unwrap();

        // Shrink the CSV, reload, and confirm the old rows are gone
        write_records(&sample_records()[..1], &csv_path).unwrap();
        load_store(&processed, &db_path).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        assert_eq!(table_rows(&conn, "aggregated_transactions"), 1);
    }
}
