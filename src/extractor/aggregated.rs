//! Extractors for the aggregated transaction and user subjects.
//!
//! Aggregated transactions flatten the instrument list under each
//! transaction category into one row per instrument. Aggregated users
//! carry the same district-level hover mapping as the map subject and
//! share its flattening.

use std::path::Path;

use super::map::extract_user_hover_tree;
use super::raw::{read_leaf, TransactionLeaf};
use super::schema::{Extraction, TransactionRecord, UserRecord};
use crate::utils::error::ExtractError;

/// Flatten `data.transactionData[*].paymentInstruments[*]` into rows
///
/// **Public** - main entry point for the aggregated transaction subject
///
/// One record per (state, year, quarter, transaction_type, instrument).
/// A file missing the category name is rejected whole; missing counts
/// and amounts default to zero.
///
/// # Errors
/// * `ExtractError::MissingRoot` - the tree root does not exist
/// * `ExtractError::Io` - a directory could not be read
pub fn extract_aggregated_transactions(
    root: &Path,
) -> Result<Extraction<TransactionRecord>, ExtractError> {
    let mut records = Vec::new();

    let stats = super::walk::walk_state_tree(root, |state, year, quarter, path| {
        let leaf: TransactionLeaf = read_leaf(path)?;
        let before = records.len();

        for entry in leaf.data.into_iter().flat_map(|d| d.transaction_data) {
            for instrument in &entry.payment_instruments {
                records.push(TransactionRecord {
                    state: state.to_string(),
                    year,
                    quarter,
                    transaction_type: entry.name.clone(),
                    count: instrument.count,
                    amount: instrument.amount,
                });
            }
        }
        Ok(records.len() - before)
    })?;

    Ok(Extraction { records, stats })
}

/// Flatten the aggregated user tree into district rows
pub fn extract_aggregated_users(root: &Path) -> Result<Extraction<UserRecord>, ExtractError> {
    extract_user_hover_tree(root)
}
