//! Flat record definitions for the tabular intermediates.
//!
//! One struct per output schema; field order is the CSV column order.
//! The run summary manifest is versioned to allow future evolution.

use serde::{Deserialize, Serialize};

/// One row of `aggregated_transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub state: String,
    pub year: u16,
    pub quarter: u8,
    pub transaction_type: String,
    pub count: u64,
    pub amount: f64,
}

/// One row of `aggregated_users` / `map_users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub state: String,
    pub year: u16,
    pub quarter: u8,
    pub district: String,
    pub registered_users: u64,
    pub app_opens: u64,
}

/// One row of `map_transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapTransactionRecord {
    pub state: String,
    pub year: u16,
    pub quarter: u8,
    pub district: String,
    pub count: u64,
    pub amount: f64,
}

/// One row of `top_districts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDistrictRecord {
    pub state: String,
    pub year: u16,
    pub quarter: u8,
    /// Absent upstream entity names come through as empty CSV fields
    pub district: Option<String>,
    pub count: u64,
    pub amount: f64,
}

/// One row of `top_pincodes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPincodeRecord {
    pub state: String,
    pub year: u16,
    pub quarter: u8,
    pub pincode: Option<String>,
    pub count: u64,
    pub amount: f64,
}

/// One row of `top_users` (national-only subject, no state column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopUserRecord {
    pub year: u16,
    pub quarter: u8,
    pub pincode: Option<String>,
    pub registered_users: u64,
}

/// Walk statistics for one extractor run over one tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Leaf files seen (including skipped ones)
    pub files_visited: usize,

    /// Leaf files skipped because they were malformed or unreadable
    pub files_skipped: usize,
}

/// Records plus walk statistics from one extractor unit
#[derive(Debug)]
pub struct Extraction<T> {
    pub records: Vec<T>,
    pub stats: WalkStats,
}

/// Top-level manifest written next to the CSV intermediates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractSummary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the extraction ran
    pub generated_at: String,

    /// Per-subject outcomes, in extraction order
    pub subjects: Vec<SubjectSummary>,
}

/// Outcome of one subject's extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub subject: String,
    pub files_visited: usize,
    pub files_skipped: usize,
    pub records: usize,
}

impl ExtractSummary {
    /// Total records across all subjects
    pub fn total_records(&self) -> usize {
        self.subjects.iter().map(|s| s.records).sum()
    }
}
