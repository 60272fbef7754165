//! Error types for docport.
//!
//! Fatal errors (configuration, top-level I/O, transport, deserialization)
//! abort a run and carry enough context to diagnose. Per-file parse and
//! processing errors are not represented here as fatal values — they are
//! recovered inside extraction and injection and surfaced as warnings.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, DocPortError>;

#[derive(Debug, Error)]
pub enum DocPortError {
    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// No doc set file, URL, or old-sources directory was supplied.
    #[error("no documentation source provided: set a docs file, a docs URL, or an old-sources directory")]
    NoDocSource,

    /// A required source directory does not exist.
    #[error("source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// A stored doc set was requested from a path that does not exist.
    #[error("docs file not found: {}", .0.display())]
    DocSetNotFound(PathBuf),

    /// A stored doc set exists but is not valid JSON for the schema.
    #[error("malformed docs file {}: {source}", .path.display())]
    DocSetMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Fetching or decoding a remote doc set failed.
    #[error("failed to download docs from {url}: {source}")]
    Remote {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A single source file could not be parsed. Used inside per-file
    /// outcomes; never aborts a whole run on its own.
    #[error("failed to parse {}: {message}", .file.display())]
    Parse { file: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
