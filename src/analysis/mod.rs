//! Read-only SQL analysis over the loaded store.
//!
//! This module handles:
//! - Running fixed and parameterized SQL against DuckDB
//! - Reading result sets into a generic, renderer-friendly shape
//! - The named insight registry

pub mod queries;

use duckdb::types::Value as DuckValue;
use duckdb::{Connection, ToSql};
use serde_json::{Number, Value};

use crate::utils::error::QueryError;

pub use queries::{find_insight, Insight, INSIGHTS};

/// Generic result set: column names plus rows of JSON values
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Run one SELECT and collect the full result set
///
/// **Public** - main entry point for reads against the store
///
/// Parameters are bound positionally; queries here are pure reads.
pub fn run_query(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<QueryResult, QueryError> {
    let mut statement = conn.prepare(sql)?;

    // Execute once so column metadata is populated, then read it
    let _ = statement.query(params)?;
    let column_count = statement.column_count();
    let mut columns = Vec::with_capacity(column_count);
    for index in 0..column_count {
        columns.push(statement.column_name(index)?.to_string());
    }

    let mut rows_cursor = statement.query(params)?;
    let mut rows = Vec::new();
    while let Some(row) = rows_cursor.next()? {
        let mut output = Vec::with_capacity(column_count);
        for index in 0..column_count {
            let value: DuckValue = row.get(index)?;
            output.push(to_json_value(value));
        }
        rows.push(output);
    }

    Ok(QueryResult { columns, rows })
}

/// Latest year present in the store, if any
pub fn latest_year(conn: &Connection) -> Result<Option<i64>, QueryError> {
    let result = run_query(conn, "SELECT MAX(year) FROM aggregated_transactions", &[])?;
    Ok(first_cell(&result).and_then(|v| v.as_i64()))
}

/// Alphabetically first state in the store, if any
pub fn first_state(conn: &Connection) -> Result<Option<String>, QueryError> {
    let result = run_query(conn, "SELECT MIN(state) FROM aggregated_transactions", &[])?;
    Ok(first_cell(&result)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string()))
}

fn first_cell(result: &QueryResult) -> Option<&Value> {
    result.rows.first().and_then(|row| row.first())
}

/// Convert one DuckDB value into a JSON value for uniform handling
///
/// **Private** - internal conversion
fn to_json_value(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(v) => Value::Bool(v),
        DuckValue::TinyInt(v) => Value::Number(Number::from(v)),
        DuckValue::SmallInt(v) => Value::Number(Number::from(v)),
        DuckValue::Int(v) => Value::Number(Number::from(v)),
        DuckValue::BigInt(v) => Value::Number(Number::from(v)),
        // Aggregates over BIGINT columns come back as HUGEINT
        DuckValue::HugeInt(v) => match i64::try_from(v) {
            Ok(narrow) => Value::Number(Number::from(narrow)),
            Err(_) => number_from_f64(v as f64),
        },
        DuckValue::UTinyInt(v) => Value::Number(Number::from(v)),
        DuckValue::USmallInt(v) => Value::Number(Number::from(v)),
        DuckValue::UInt(v) => Value::Number(Number::from(v)),
        DuckValue::UBigInt(v) => Value::Number(Number::from(v)),
        DuckValue::Float(v) => number_from_f64(v as f64),
        DuckValue::Double(v) => number_from_f64(v),
        DuckValue::Text(v) => Value::String(v),
        other => Value::String(format!("{other:?}")),
    }
}

fn number_from_f64(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}
