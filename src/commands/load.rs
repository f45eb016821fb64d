//! Load command implementation.
//!
//! Reads the CSV intermediates and replaces the corresponding tables in
//! the DuckDB store.

use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use crate::loader::{load_store, LoadReport};

/// Arguments for the load command
#[derive(Debug, Clone)]
pub struct LoadArgs {
    /// Directory holding the CSV intermediates
    pub processed_dir: PathBuf,

    /// Path of the DuckDB store to (re)create tables in
    pub db_path: PathBuf,
}

/// Execute the load command
pub fn execute_load(args: &LoadArgs) -> Result<LoadReport> {
    if !args.processed_dir.is_dir() {
        anyhow::bail!(
            "processed directory not found: {} (run `pulse extract` first)",
            args.processed_dir.display()
        );
    }

    let report = load_store(&args.processed_dir, &args.db_path)
        .context("Failed to load the store")?;

    info!(
        "Load complete: {} tables loaded, {} skipped",
        report.loaded.len(),
        report.skipped.len()
    );

    Ok(report)
}
