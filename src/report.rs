//! Migration report — aggregated statistics plus orphaned entries.
//!
//! Pure aggregation: the migration engine already classified everything and
//! computed the orphan set; this module only packages and persists it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::docset::DocEntry;
use crate::error::Result;

/// Counters accumulated by one migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStats {
    /// Declarations whose documentation was carried over.
    pub preserved: usize,
    /// Declarations unknown to the old snapshot that received a marker.
    pub new_items: usize,
    /// Old entries with no structural match in the new tree.
    pub orphaned: usize,
}

/// The terminal, write-once artifact of a migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    /// ISO-8601 completion time.
    pub timestamp: String,
    pub stats: MigrationStats,
    pub orphaned: Vec<DocEntry>,
}

impl MigrationReport {
    pub fn new(stats: MigrationStats, orphaned: Vec<DocEntry>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            stats,
            orphaned,
        }
    }
}

/// Persist a report as pretty JSON, creating missing parent directories.
pub fn write_report(report: &MigrationReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(report)?)?;
    info!(path = %path.display(), orphaned = report.orphaned.len(), "migration report written");
    Ok(())
}
