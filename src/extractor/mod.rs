//! Flattening of raw telemetry trees into tabular records.
//!
//! This module handles:
//! - Walking the state/year/quarter directory layout
//! - Deserializing the known leaf JSON shapes
//! - Projecting leaves into flat record sets, one per subject
//! - Defining the intermediate record schemas

pub mod aggregated;
pub mod map;
pub mod raw;
pub mod schema;
pub mod top;
pub mod walk;

// Re-export main types and functions
pub use aggregated::{extract_aggregated_transactions, extract_aggregated_users};
pub use map::{extract_map_transactions, extract_map_users};
pub use schema::{
    ExtractSummary, Extraction, MapTransactionRecord, SubjectSummary, TopDistrictRecord,
    TopPincodeRecord, TopUserRecord, TransactionRecord, UserRecord, WalkStats,
};
pub use top::{extract_top_transactions, extract_top_users, TopTransactions};
pub use walk::{walk_national_tree, walk_state_tree};
