//! Extractors for the ranked (top-N) subjects.
//!
//! Top transactions carry both a district list and a pincode list per
//! leaf; one walk fills both record sets. Top users is national-only
//! (no state directory level) and reads registered users per pincode.

use std::path::Path;

use super::raw::{read_leaf, TopLeaf};
use super::schema::{Extraction, TopDistrictRecord, TopPincodeRecord, TopUserRecord, WalkStats};
use super::walk::{walk_national_tree, walk_state_tree};
use crate::utils::error::ExtractError;

/// Districts and pincodes flattened from one top-transaction tree
#[derive(Debug)]
pub struct TopTransactions {
    pub districts: Vec<TopDistrictRecord>,
    pub pincodes: Vec<TopPincodeRecord>,
    pub stats: WalkStats,
}

/// Flatten `data.districts[*]` and `data.pincodes[*]` into ranked rows
pub fn extract_top_transactions(root: &Path) -> Result<TopTransactions, ExtractError> {
    let mut districts = Vec::new();
    let mut pincodes = Vec::new();

    let stats = walk_state_tree(root, |state, year, quarter, path| {
        let leaf: TopLeaf = read_leaf(path)?;
        let Some(data) = leaf.data else {
            return Ok(0);
        };

        for entry in &data.districts {
            districts.push(TopDistrictRecord {
                state: state.to_string(),
                year,
                quarter,
                district: entry.entity_name.clone(),
                count: entry.metric.count,
                amount: entry.metric.amount,
            });
        }
        for entry in &data.pincodes {
            pincodes.push(TopPincodeRecord {
                state: state.to_string(),
                year,
                quarter,
                pincode: entry.entity_name.clone(),
                count: entry.metric.count,
                amount: entry.metric.amount,
            });
        }
        Ok(data.districts.len() + data.pincodes.len())
    })?;

    Ok(TopTransactions {
        districts,
        pincodes,
        stats,
    })
}

/// Flatten the national top-user tree into pincode rows
pub fn extract_top_users(root: &Path) -> Result<Extraction<TopUserRecord>, ExtractError> {
    let mut records = Vec::new();

    let stats = walk_national_tree(root, |year, quarter, path| {
        let leaf: TopLeaf = read_leaf(path)?;
        let before = records.len();

        for entry in leaf.data.into_iter().flat_map(|d| d.pincodes) {
            records.push(TopUserRecord {
                year,
                quarter,
                pincode: entry.entity_name,
                registered_users: entry.metric.registered_users,
            });
        }
        Ok(records.len() - before)
    })?;

    Ok(Extraction { records, stats })
}
