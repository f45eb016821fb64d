//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default root of the raw telemetry tree
pub const DEFAULT_DATA_DIR: &str = "data/raw";

/// Default directory for flattened CSV intermediates
pub const DEFAULT_PROCESSED_DIR: &str = "data/processed";

/// Default path of the DuckDB store
pub const DEFAULT_DB_PATH: &str = "db/pulse.duckdb";

/// File name of the extraction run manifest
pub const SUMMARY_FILE: &str = "extract_summary.json";

// Source subpaths per subject, relative to the data dir.
// The upstream archive nests everything under country/india; state-level
// subjects add one more directory level per state.
pub const AGGREGATED_TRANSACTION_SUBPATH: &str = "aggregated/transaction/country/india/state";
pub const AGGREGATED_USER_SUBPATH: &str = "aggregated/user/country/india/state";
pub const MAP_TRANSACTION_SUBPATH: &str = "map/transaction/hover/country/india/state";
pub const MAP_USER_SUBPATH: &str = "map/user/hover/country/india/state";
pub const TOP_TRANSACTION_SUBPATH: &str = "top/transaction/country/india/state";
pub const TOP_USER_SUBPATH: &str = "top/user/country/india";

/// One flattened data category, with its CSV intermediate and store table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    AggregatedTransactions,
    AggregatedUsers,
    MapTransactions,
    MapUsers,
    TopDistricts,
    TopPincodes,
    TopUsers,
}

impl Subject {
    /// All subjects, in load order
    pub const ALL: [Subject; 7] = [
        Subject::AggregatedTransactions,
        Subject::AggregatedUsers,
        Subject::MapTransactions,
        Subject::MapUsers,
        Subject::TopDistricts,
        Subject::TopPincodes,
        Subject::TopUsers,
    ];

    /// Table name in the analytical store
    pub fn table_name(&self) -> &'static str {
        match self {
            Subject::AggregatedTransactions => "aggregated_transactions",
            Subject::AggregatedUsers => "aggregated_users",
            Subject::MapTransactions => "map_transactions",
            Subject::MapUsers => "map_users",
            Subject::TopDistricts => "top_districts",
            Subject::TopPincodes => "top_pincodes",
            Subject::TopUsers => "top_users",
        }
    }

    /// File name of the CSV intermediate
    pub fn csv_file(&self) -> &'static str {
        match self {
            Subject::AggregatedTransactions => "aggregated_transactions.csv",
            Subject::AggregatedUsers => "aggregated_users.csv",
            Subject::MapTransactions => "map_transactions.csv",
            Subject::MapUsers => "map_users.csv",
            Subject::TopDistricts => "top_districts.csv",
            Subject::TopPincodes => "top_pincodes.csv",
            Subject::TopUsers => "top_users.csv",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_match_csv_stems() {
        for subject in Subject::ALL {
            let stem = subject.csv_file().strip_suffix(".csv").unwrap();
            assert_eq!(subject.table_name(), stem);
        }
    }
}
