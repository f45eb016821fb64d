//! Directory walk over the raw telemetry tree.
//!
//! State-level subjects are laid out as `state/year/<quarter>.json`;
//! the national-only subject drops the state level. The walk owns the
//! failure policy: a malformed or unreadable leaf is skipped with a
//! warning and the walk continues, while a missing root halts the
//! subject with an error. Entries are visited in sorted order so
//! repeated runs produce identical output.

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::schema::WalkStats;
use crate::utils::error::ExtractError;

/// Walk a `state/year/<quarter>.json` tree
///
/// The visitor receives (state, year, quarter, leaf path) and returns the
/// number of records it emitted for that file. A visitor error marks the
/// file skipped; it never aborts the walk.
pub fn walk_state_tree<F>(root: &Path, mut visit: F) -> Result<WalkStats, ExtractError>
where
    F: FnMut(&str, u16, u8, &Path) -> Result<usize, ExtractError>,
{
    if !root.is_dir() {
        return Err(ExtractError::MissingRoot(root.display().to_string()));
    }

    let mut stats = WalkStats::default();
    for state_dir in sorted_subdirs(root)? {
        let state = dir_name(&state_dir);
        debug!("Walking state: {}", state);
        for year_dir in sorted_subdirs(&state_dir)? {
            visit_quarter_files(&year_dir, &mut stats, |year, quarter, path| {
                visit(&state, year, quarter, path)
            })?;
        }
    }
    Ok(stats)
}

/// Walk a national-only `year/<quarter>.json` tree
pub fn walk_national_tree<F>(root: &Path, mut visit: F) -> Result<WalkStats, ExtractError>
where
    F: FnMut(u16, u8, &Path) -> Result<usize, ExtractError>,
{
    if !root.is_dir() {
        return Err(ExtractError::MissingRoot(root.display().to_string()));
    }

    let mut stats = WalkStats::default();
    for year_dir in sorted_subdirs(root)? {
        visit_quarter_files(&year_dir, &mut stats, &mut visit)?;
    }
    Ok(stats)
}

/// Visit every `<quarter>.json` under one year directory
///
/// **Private** - internal helper for the tree walks
///
/// Year and quarter are parsed per file, so one unparseable directory
/// name produces a warning per leaf instead of a hard failure.
fn visit_quarter_files<F>(
    year_dir: &Path,
    stats: &mut WalkStats,
    mut visit: F,
) -> Result<(), ExtractError>
where
    F: FnMut(u16, u8, &Path) -> Result<usize, ExtractError>,
{
    let year_name = dir_name(year_dir);

    for leaf in sorted_json_files(year_dir)? {
        stats.files_visited += 1;

        let outcome = parse_partition(&year_name, &leaf)
            .and_then(|(year, quarter)| visit(year, quarter, &leaf));

        match outcome {
            Ok(records) => debug!("{}: {} records", leaf.display(), records),
            Err(e) => {
                warn!("Skipped {} due to error: {}", leaf.display(), e);
                stats.files_skipped += 1;
            }
        }
    }
    Ok(())
}

/// Parse (year, quarter) from the directory name and file stem
fn parse_partition(year_name: &str, leaf: &Path) -> Result<(u16, u8), ExtractError> {
    let year = year_name
        .parse::<u16>()
        .map_err(|_| ExtractError::InvalidPartition(format!("year '{}'", year_name)))?;

    let stem = leaf
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let quarter = stem
        .parse::<u8>()
        .map_err(|_| ExtractError::InvalidPartition(format!("quarter '{}'", stem)))?;

    Ok((year, quarter))
}

/// Subdirectories of `dir`, sorted by name
fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            subdirs.push(path);
        }
    }
    subdirs.sort();
    Ok(subdirs)
}

/// `*.json` files directly under `dir`, sorted by name
fn sorted_json_files(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Final path component as an owned string
fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
