//! Extractors for the map (district-hover) subjects.
//!
//! Map transactions come from `hoverDataList`, a list of districts whose
//! metrics live in a usually single-element `metric` list; only the first
//! element is read, and a district with an empty list contributes no row.
//! Map users come from the `hoverData` district mapping.

use std::path::Path;

use super::raw::{read_leaf, HoverListLeaf, UserHoverLeaf};
use super::schema::{Extraction, MapTransactionRecord, UserRecord};
use super::walk::walk_state_tree;
use crate::utils::error::ExtractError;

/// Flatten `data.hoverDataList[*].metric[0]` into district rows
pub fn extract_map_transactions(
    root: &Path,
) -> Result<Extraction<MapTransactionRecord>, ExtractError> {
    let mut records = Vec::new();

    let stats = walk_state_tree(root, |state, year, quarter, path| {
        let leaf: HoverListLeaf = read_leaf(path)?;
        let before = records.len();

        for entry in leaf.data.into_iter().flat_map(|d| d.hover_data_list) {
            if let Some(metric) = entry.metric.first() {
                records.push(MapTransactionRecord {
                    state: state.to_string(),
                    year,
                    quarter,
                    district: entry.name.clone(),
                    count: metric.count,
                    amount: metric.amount,
                });
            }
        }
        Ok(records.len() - before)
    })?;

    Ok(Extraction { records, stats })
}

/// Flatten the map user tree into district rows
pub fn extract_map_users(root: &Path) -> Result<Extraction<UserRecord>, ExtractError> {
    extract_user_hover_tree(root)
}

/// Flatten a `data.hoverData{district: metrics}` tree into user rows
///
/// Shared by the aggregated and map user subjects, which carry the same
/// leaf shape under different roots. Districts are emitted in sorted
/// order per file.
pub fn extract_user_hover_tree(root: &Path) -> Result<Extraction<UserRecord>, ExtractError> {
    let mut records = Vec::new();

    let stats = walk_state_tree(root, |state, year, quarter, path| {
        let leaf: UserHoverLeaf = read_leaf(path)?;
        let before = records.len();

        for (district, metrics) in leaf.data.into_iter().flat_map(|d| d.hover_data) {
            records.push(UserRecord {
                state: state.to_string(),
                year,
                quarter,
                district,
                registered_users: metrics.registered_users,
                app_opens: metrics.app_opens,
            });
        }
        Ok(records.len() - before)
    })?;

    Ok(Extraction { records, stats })
}
