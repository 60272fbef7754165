//! DocSet persistence — local files and remote snapshots.
//!
//! The on-disk encoding is stable, pretty-printed JSON (see `docset` for the
//! schema). Loading a missing path is an error, never an empty snapshot, so
//! a misconfigured path cannot silently orphan every entry.

use std::fs;
use std::path::Path;
use tracing::info;

use crate::docset::DocSet;
use crate::error::{DocPortError, Result};

/// Write a DocSet to `path`, creating missing parent directories.
pub fn save(doc_set: &DocSet, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(doc_set)?;
    fs::write(path, json)?;
    info!(path = %path.display(), entries = doc_set.entries.len(), "doc set saved");
    Ok(())
}

/// Load a DocSet from a local path.
pub fn load(path: &Path) -> Result<DocSet> {
    if !path.exists() {
        return Err(DocPortError::DocSetNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| DocPortError::DocSetMalformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Fetch a DocSet over HTTP. Any transport or decode failure is wrapped into
/// one error carrying the URL.
pub fn load_remote(url: &str) -> Result<DocSet> {
    fetch(url).map_err(|source| DocPortError::Remote {
        url: url.to_string(),
        source,
    })
}

fn fetch(url: &str) -> std::result::Result<DocSet, Box<dyn std::error::Error + Send + Sync>> {
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;
    Ok(serde_json::from_str(&body)?)
}
