//! Snapshot persistence for fetched repository records.
//!
//! A snapshot is one JSON array of records. Reading one back replaces the
//! search-and-fetch path entirely, for repeatable scoring runs.

use crate::facts::repo_record::RepoRecord;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a snapshot name to its file path, appending `.json` when the name
/// carries no extension.
#[must_use]
pub fn snapshot_path(name: &str) -> PathBuf {
    if Path::new(name).extension().is_some() {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.json"))
    }
}

/// Write the records to the named snapshot, returning the resolved path.
pub fn save(name: &str, records: &[RepoRecord]) -> Result<PathBuf> {
    let path = snapshot_path(name);
    let json = serde_json::to_string(records).context("serializing repository records")?;
    fs::write(&path, json).with_context(|| format!("writing snapshot {}", path.display()))?;
    Ok(path)
}

/// Read a previously written snapshot.
pub fn load(name: &str) -> Result<Vec<RepoRecord>> {
    let path = snapshot_path(name);
    let json = fs::read_to_string(&path).with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing snapshot {}", path.display()))
}
