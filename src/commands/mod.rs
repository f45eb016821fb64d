//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod dashboard;
pub mod extract;
pub mod load;
pub mod query;

// Re-export main command functions
pub use dashboard::{execute_dashboard, DashboardArgs};
pub use extract::{execute_extract, validate_args, ExtractArgs, ExtractUnit};
pub use load::{execute_load, LoadArgs};
pub use query::{execute_query, list_insights, QueryArgs};

use anyhow::{Context, Result};
use duckdb::Connection;
use std::path::Path;

use crate::analysis::first_state;
use crate::utils::error::QueryError;

/// Open an existing store, failing with a hint if it is absent
fn open_store(db_path: &Path) -> Result<Connection> {
    if !db_path.exists() {
        anyhow::bail!(
            "database not found: {} (run `pulse load` first)",
            db_path.display()
        );
    }
    Connection::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))
}

/// Resolve the state filter: explicit choice, else first state in the store
fn resolve_state(conn: &Connection, requested: Option<&str>) -> Result<String> {
    if let Some(state) = requested {
        return Ok(state.to_string());
    }
    let state = first_state(conn)?
        .ok_or_else(|| QueryError::EmptyStore("aggregated_transactions".to_string()))?;
    Ok(state)
}
