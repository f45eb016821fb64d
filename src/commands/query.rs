//! Query command implementation.
//!
//! Runs one or all named insights against the store and prints each
//! result as a text table.

use anyhow::Result;
use log::info;
use std::path::PathBuf;

use crate::analysis::{find_insight, run_query, Insight, INSIGHTS};
use crate::dashboard::render_table;
use crate::utils::error::QueryError;

use super::{open_store, resolve_state};

/// Arguments for the query command
#[derive(Debug, Clone)]
pub struct QueryArgs {
    /// Path of the DuckDB store
    pub db_path: PathBuf,

    /// Insight name (None = run all)
    pub name: Option<String>,

    /// State for state-parameterized insights (None = first state)
    pub state: Option<String>,
}

/// Execute the query command
pub fn execute_query(args: &QueryArgs) -> Result<()> {
    let conn = open_store(&args.db_path)?;

    let insights: Vec<&Insight> = match &args.name {
        Some(name) => {
            let insight = find_insight(name)
                .ok_or_else(|| QueryError::UnknownInsight(name.clone()))?;
            vec![insight]
        }
        None => INSIGHTS.iter().collect(),
    };

    for insight in insights {
        let result = if insight.needs_state {
            let state = resolve_state(&conn, args.state.as_deref())?;
            info!("Running '{}' for state: {}", insight.name, state);
            run_query(&conn, insight.sql, &[&state])?
        } else {
            run_query(&conn, insight.sql, &[])?
        };

        println!("\n{}", insight.title);
        println!("{}", render_table(&result));
    }

    Ok(())
}

/// List the available insights with their titles
pub fn list_insights() -> String {
    INSIGHTS
        .iter()
        .map(|insight| format!("  {:<20} {}", insight.name, insight.title))
        .collect::<Vec<_>>()
        .join("\n")
}
