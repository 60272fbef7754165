//! The DocSet data model — a persisted documentation snapshot.
//!
//! A DocSet maps signature hashes to captured documentation text. Entries
//! exist only for declarations that carried documentation at capture time;
//! the full set of observed hashes (documented or not) is tracked separately
//! during extraction and is what lets migration tell "known but undocumented"
//! apart from "brand new".

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::signature::DeclKind;

/// On-disk schema version.
pub const FORMAT_VERSION: &str = "1.0";

/// One captured documentation comment, keyed by signature hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    /// 64 lowercase hex chars (SHA-256 of the canonical signature string).
    pub hash: String,
    #[serde(rename = "type")]
    pub kind: DeclKind,
    /// The raw canonical string, kept human-readable for diagnostics.
    pub signature: String,
    /// The documentation text, stripped of comment scaffolding.
    pub javadoc: String,
}

/// Provenance metadata stored alongside the entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocSetMetadata {
    pub format_version: String,
    pub generated_from: String,
    /// Capture time, epoch milliseconds.
    pub timestamp: i64,
}

impl DocSetMetadata {
    pub fn new(generated_from: &str) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            generated_from: generated_from.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// A captured snapshot: metadata plus the documented entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSet {
    pub metadata: DocSetMetadata,
    pub entries: Vec<DocEntry>,
}

impl DocSet {
    pub fn new(generated_from: &str, entries: Vec<DocEntry>) -> Self {
        Self {
            metadata: DocSetMetadata::new(generated_from),
            entries,
        }
    }

    /// Hash → documentation text, for the migration engine.
    pub fn javadocs(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.hash.clone(), e.javadoc.clone()))
            .collect()
    }

    /// The set of hashes this snapshot knows about. For a snapshot loaded
    /// from disk this is exactly the documented hashes; live extraction
    /// supplies a wider set (see `ExtractionResult::all_hashes`).
    pub fn hashes(&self) -> HashSet<String> {
        self.entries.iter().map(|e| e.hash.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hash: &str, javadoc: &str) -> DocEntry {
        DocEntry {
            hash: hash.to_string(),
            kind: DeclKind::Method,
            signature: format!("METHOD:p.C:void m{}()", hash),
            javadoc: javadoc.to_string(),
        }
    }

    #[test]
    fn test_schema_field_names() {
        let set = DocSet::new("source-export", vec![entry("abc", "does X")]);
        let json = serde_json::to_value(&set).unwrap();

        assert_eq!(json["metadata"]["formatVersion"], "1.0");
        assert_eq!(json["metadata"]["generatedFrom"], "source-export");
        assert!(json["metadata"]["timestamp"].is_i64());
        assert_eq!(json["entries"][0]["hash"], "abc");
        assert_eq!(json["entries"][0]["type"], "METHOD");
        assert_eq!(json["entries"][0]["javadoc"], "does X");
    }

    #[test]
    fn test_javadocs_and_hashes_views() {
        let set = DocSet::new("x", vec![entry("a", "doc a"), entry("b", "doc b")]);
        let docs = set.javadocs();
        assert_eq!(docs.get("a").map(String::as_str), Some("doc a"));
        assert_eq!(docs.len(), 2);

        let hashes = set.hashes();
        assert!(hashes.contains("a") && hashes.contains("b"));
    }
}
