//! Fixed text views over the loaded store.
//!
//! The terminal counterpart of the original charting dashboard: each
//! view is one aggregate query plus an aligned text table. Amounts are
//! reported in crore (1e7) to match the upstream convention.

use duckdb::Connection;
use serde_json::Value;

use crate::analysis::{run_query, QueryResult};
use crate::utils::error::QueryError;

/// Top 10 states by total transaction amount (crore)
pub fn top_states_by_amount(conn: &Connection) -> Result<QueryResult, QueryError> {
    run_query(
        conn,
        "\
SELECT state,
       ROUND(SUM(amount) / 10000000, 2) AS amount_cr
FROM aggregated_transactions
GROUP BY state
ORDER BY amount_cr DESC
LIMIT 10;",
        &[],
    )
}

/// Transaction types for one (year, state)
pub fn transaction_types(
    conn: &Connection,
    year: i64,
    state: &str,
) -> Result<QueryResult, QueryError> {
    let state = state.to_string();
    run_query(
        conn,
        "\
SELECT transaction_type,
       SUM(count) AS total_txns,
       ROUND(SUM(amount) / 10000000, 2) AS amount_cr
FROM aggregated_transactions
WHERE year = ? AND state = ?
GROUP BY transaction_type
ORDER BY total_txns DESC;",
        &[&year, &state],
    )
}

/// Quarterly app opens across all states
pub fn app_opens_trend(conn: &Connection) -> Result<QueryResult, QueryError> {
    run_query(
        conn,
        "\
SELECT year,
       quarter,
       SUM(app_opens) AS total_opens
FROM map_users
GROUP BY year, quarter
ORDER BY year, quarter;",
        &[],
    )
}

/// Top districts by transaction volume
pub fn top_districts(conn: &Connection) -> Result<QueryResult, QueryError> {
    run_query(
        conn,
        "\
SELECT district,
       ROUND(SUM(amount) / 10000000, 2) AS amount_cr,
       SUM(count) AS txn_count
FROM map_transactions
GROUP BY district
ORDER BY amount_cr DESC
LIMIT 10;",
        &[],
    )
}

/// Top 10 pincodes by transaction volume (blank pincodes excluded)
pub fn top_pincodes(conn: &Connection) -> Result<QueryResult, QueryError> {
    run_query(
        conn,
        "\
SELECT pincode,
       ROUND(SUM(amount) / 10000000, 2) AS amount_cr,
       SUM(count) AS txn_count
FROM top_pincodes
WHERE pincode IS NOT NULL AND pincode != ''
GROUP BY pincode
ORDER BY amount_cr DESC
LIMIT 10;",
        &[],
    )
}

/// Quarterly trend for recharge & bill payments
pub fn recharge_trend(conn: &Connection) -> Result<QueryResult, QueryError> {
    run_query(
        conn,
        "\
SELECT year,
       quarter,
       SUM(count) AS total_txns
FROM aggregated_transactions
WHERE transaction_type = 'Recharge & bill payments'
GROUP BY year, quarter
ORDER BY year, quarter;",
        &[],
    )
}

/// Render a result set as an aligned text table
pub fn render_table(result: &QueryResult) -> String {
    if result.is_empty() {
        return "(no rows)".to_string();
    }

    let formatted: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(format_value).collect())
        .collect();

    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.len()).collect();
    for row in &formatted {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.len());
        }
    }

    let mut out = String::new();
    render_row(&mut out, &result.columns, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_row(&mut out, &rule, &widths);
    for row in &formatted {
        render_row(&mut out, row, &widths);
    }
    out
}

fn render_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref()))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// One cell as display text; NULL renders as empty
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
