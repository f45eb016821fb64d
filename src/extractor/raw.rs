//! Serde models of the known raw leaf shapes.
//!
//! Each quarterly JSON file carries one of a small, fixed set of nested
//! shapes under a `data` envelope. These models are deliberately tolerant:
//! missing numeric fields default to zero, a null or absent `data` envelope
//! yields no entries, and unknown fields are ignored. Anything that fails
//! to deserialize fails the whole file.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::utils::error::ExtractError;

/// `data.transactionData[*].paymentInstruments[*]` leaf
#[derive(Debug, Deserialize)]
pub struct TransactionLeaf {
    #[serde(default)]
    pub data: Option<TransactionData>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionData {
    #[serde(default, rename = "transactionData")]
    pub transaction_data: Vec<TransactionEntry>,
}

/// One instrument category, e.g. "Peer-to-peer payments"
#[derive(Debug, Deserialize)]
pub struct TransactionEntry {
    /// Category name. Required: a file without it is rejected whole.
    pub name: String,

    #[serde(default, rename = "paymentInstruments")]
    pub payment_instruments: Vec<PaymentInstrument>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentInstrument {
    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub amount: f64,
}

/// `data.hoverDataList[*].metric[0]` leaf
#[derive(Debug, Deserialize)]
pub struct HoverListLeaf {
    #[serde(default)]
    pub data: Option<HoverListData>,
}

#[derive(Debug, Deserialize)]
pub struct HoverListData {
    #[serde(default, rename = "hoverDataList")]
    pub hover_data_list: Vec<HoverListEntry>,
}

#[derive(Debug, Deserialize)]
pub struct HoverListEntry {
    /// District name; upstream files occasionally omit it
    #[serde(default)]
    pub name: String,

    /// Usually a single-element list
    #[serde(default)]
    pub metric: Vec<CountAmount>,
}

#[derive(Debug, Deserialize)]
pub struct CountAmount {
    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub amount: f64,
}

/// `data.hoverData{district: metrics}` leaf
///
/// The mapping is read into a `BTreeMap` so districts come out in sorted
/// order and repeated extraction over the same inputs is byte-identical.
#[derive(Debug, Deserialize)]
pub struct UserHoverLeaf {
    #[serde(default)]
    pub data: Option<UserHoverData>,
}

#[derive(Debug, Deserialize)]
pub struct UserHoverData {
    #[serde(default, rename = "hoverData")]
    pub hover_data: BTreeMap<String, UserMetrics>,
}

#[derive(Debug, Deserialize)]
pub struct UserMetrics {
    #[serde(default, rename = "registeredUsers")]
    pub registered_users: u64,

    #[serde(default, rename = "appOpens")]
    pub app_opens: u64,
}

/// `data.districts[*]` / `data.pincodes[*]` leaf
#[derive(Debug, Deserialize)]
pub struct TopLeaf {
    #[serde(default)]
    pub data: Option<TopData>,
}

#[derive(Debug, Deserialize)]
pub struct TopData {
    #[serde(default)]
    pub districts: Vec<TopEntry>,

    #[serde(default)]
    pub pincodes: Vec<TopEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TopEntry {
    #[serde(default, rename = "entityName")]
    pub entity_name: Option<String>,

    #[serde(default)]
    pub metric: TopMetric,
}

/// Ranked-entry metric. Transaction files carry count/amount, user files
/// carry registeredUsers; the unused fields default to zero either way.
#[derive(Debug, Default, Deserialize)]
pub struct TopMetric {
    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub amount: f64,

    #[serde(default, rename = "registeredUsers")]
    pub registered_users: u64,
}

/// Read and deserialize one leaf file
pub fn read_leaf<T: DeserializeOwned>(path: &Path) -> Result<T, ExtractError> {
    let file = File::open(path)?;
    let leaf = serde_json::from_reader(BufReader::new(file))?;
    Ok(leaf)
}
