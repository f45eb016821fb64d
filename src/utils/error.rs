//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while walking and flattening raw telemetry
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("data folder not found: {0}")]
    MissingRoot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid partition component: {0}")]
    InvalidPartition(String),
}

/// Errors that can occur while writing intermediate files
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading tables into the store
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("database error: {0}")]
    Database(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while querying the store
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("database error: {0}")]
    Database(#[from] duckdb::Error),

    #[error("unknown insight: {0}")]
    UnknownInsight(String),

    #[error("store has no data: {0}")]
    EmptyStore(String),
}
