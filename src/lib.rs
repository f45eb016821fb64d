//! Pulse Analytics Studio
//!
//! ETL and SQL analytics for PhonePe-Pulse-style mobile payment
//! statistics: flatten the quarterly JSON telemetry tree into CSV
//! intermediates, load them into a DuckDB store, and query the result
//! from the `pulse` CLI.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install pulse-analytics
//! pulse --help
//! ```

pub mod analysis;
pub mod commands;
pub mod dashboard;
pub mod extractor;
pub mod loader;
pub mod output;
pub mod utils;
