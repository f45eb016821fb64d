//! Dashboard command implementation.
//!
//! Renders the fixed set of views the original charting dashboard
//! showed, as text tables. Year and state filters default to the latest
//! year in the store and the alphabetically first state.

use anyhow::Result;
use log::info;
use std::path::PathBuf;

use crate::analysis::latest_year;
use crate::dashboard::{
    app_opens_trend, recharge_trend, render_table, top_districts, top_pincodes,
    top_states_by_amount, transaction_types,
};
use crate::utils::error::QueryError;

use super::{open_store, resolve_state};

/// Arguments for the dashboard command
#[derive(Debug, Clone)]
pub struct DashboardArgs {
    /// Path of the DuckDB store
    pub db_path: PathBuf,

    /// Year filter (None = latest year in the store)
    pub year: Option<i64>,

    /// State filter (None = first state)
    pub state: Option<String>,
}

/// Execute the dashboard command
pub fn execute_dashboard(args: &DashboardArgs) -> Result<()> {
    let conn = open_store(&args.db_path)?;

    let year = match args.year {
        Some(year) => year,
        None => latest_year(&conn)?
            .ok_or_else(|| QueryError::EmptyStore("aggregated_transactions".to_string()))?,
    };
    let state = resolve_state(&conn, args.state.as_deref())?;

    info!("Rendering dashboard for year {} / state {}", year, state);

    println!("{}", "=".repeat(80));
    println!("PULSE ANALYTICS DASHBOARD");
    println!("{}", "=".repeat(80));

    print_view(
        "Top 10 States by Transaction Amount (Cr)",
        render_table(&top_states_by_amount(&conn)?),
    );
    print_view(
        &format!("Transaction Types in {} - {}", year, state),
        render_table(&transaction_types(&conn, year, &state)?),
    );
    print_view(
        "Quarterly App Opens Trend",
        render_table(&app_opens_trend(&conn)?),
    );
    print_view(
        "Top Districts by Transaction Volume",
        render_table(&top_districts(&conn)?),
    );
    print_view(
        "Top 10 Pincodes by Transaction Volume",
        render_table(&top_pincodes(&conn)?),
    );
    print_view(
        "Recharge & Bill Payments Trend",
        render_table(&recharge_trend(&conn)?),
    );

    println!("{}", "=".repeat(80));

    Ok(())
}

fn print_view(title: &str, table: String) {
    println!("\n{}", title);
    println!("{}", table);
}
