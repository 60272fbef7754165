//! Optional project configuration (`docport.toml`).
//!
//! Everything here has a CLI flag that overrides it; the file just saves
//! retyping stable choices like the docs URL or the marker text.
//!
//! ```toml
//! docs-file = "build/javadocs-export.json"
//! docs-url = "https://docs.example.org/javadocs-export.json"
//! new-marker = "@Undocumented"
//! label = "mirror-v2"
//! report-file = "build/migration-report.json"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{DocPortError, Result};

/// Marker attached to newly appeared, undocumented declarations.
pub const DEFAULT_NEW_MARKER: &str = "@Undocumented";
/// Default doc set artifact name.
pub const DEFAULT_EXPORT_FILE: &str = "javadocs-export.json";
/// Default migration report artifact name.
pub const DEFAULT_REPORT_FILE: &str = "migration-report.json";
/// Default `generatedFrom` label for exported doc sets.
pub const DEFAULT_EXPORT_LABEL: &str = "source-export";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub docs_file: Option<PathBuf>,
    pub docs_url: Option<String>,
    pub old_sources: Option<PathBuf>,
    pub new_marker: Option<String>,
    pub label: Option<String>,
    pub report_file: Option<PathBuf>,
}

impl Config {
    /// Load `docport.toml` from `root`, or defaults when absent.
    pub fn load(root: &Path) -> Result<Config> {
        let path = root.join("docport.toml");
        if !path.exists() {
            return Ok(Config::default());
        }
        debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(&path)?;
        toml::from_str(&text)
            .map_err(|e| DocPortError::Config(format!("invalid {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(config.docs_url.is_none());
        assert!(config.new_marker.is_none());
    }

    #[test]
    fn test_parses_known_fields() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("docport.toml"),
            "docs-url = \"https://example.org/docs.json\"\nnew-marker = \"@Undocumented\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(
            config.docs_url.as_deref(),
            Some("https://example.org/docs.json")
        );
        assert_eq!(config.new_marker.as_deref(), Some("@Undocumented"));
    }

    #[test]
    fn test_unknown_field_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("docport.toml"), "typo-field = true\n").unwrap();

        let result = Config::load(dir.path());
        assert!(matches!(result, Err(DocPortError::Config(_))));
    }
}
