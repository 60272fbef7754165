//! Extractor — captures a documentation snapshot from a Java source tree.
//!
//! Walks the tree respecting .gitignore, parses every `.java` file in
//! parallel, and folds the per-file results into one `ExtractionResult`:
//! a DocEntry for every documented declaration plus the set of all observed
//! hashes, documented or not. A file that fails to parse is skipped with a
//! warning; it never aborts the run.

use ignore::WalkBuilder;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::docset::DocEntry;
use crate::error::{DocPortError, Result};
use crate::parser::{parse_declarations, Declaration};

/// Everything one extraction pass observed.
#[derive(Debug, Default)]
pub struct ExtractionResult {
    /// One entry per documented declaration, first registration wins.
    pub entries: Vec<DocEntry>,
    /// Hashes of every visited declaration, documented or not. This is what
    /// lets migration distinguish "known but undocumented" from "new".
    pub all_hashes: HashSet<String>,
    /// Files that were skipped, with the reason.
    pub warnings: Vec<FileWarning>,
}

/// A recovered per-file failure.
#[derive(Debug, Clone)]
pub struct FileWarning {
    pub file: PathBuf,
    pub message: String,
}

/// Extract a DocSet's worth of data from every `.java` file under `root`.
pub fn extract_dir(root: &Path) -> Result<ExtractionResult> {
    if !root.exists() {
        return Err(DocPortError::SourceNotFound(root.to_path_buf()));
    }

    let files = java_files(root);
    info!(file_count = files.len(), root = %root.display(), "extracting javadocs");

    let outcomes: Vec<(PathBuf, Result<Vec<Declaration>>)> = files
        .into_par_iter()
        .map(|path| {
            let outcome = extract_file(&path);
            (path, outcome)
        })
        .collect();

    let mut result = ExtractionResult::default();
    let mut registered: HashSet<String> = HashSet::new();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(declarations) => {
                for decl in declarations {
                    result.all_hashes.insert(decl.signature.hash.clone());
                    let Some(doc) = decl.doc else { continue };
                    // Colliding signatures register once; later hits are no-ops.
                    if registered.insert(decl.signature.hash.clone()) {
                        result.entries.push(DocEntry {
                            hash: decl.signature.hash,
                            kind: decl.signature.kind,
                            signature: decl.signature.raw,
                            javadoc: doc.text,
                        });
                    }
                }
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping file");
                result.warnings.push(FileWarning {
                    file: path,
                    message: e.to_string(),
                });
            }
        }
    }

    debug!(
        documented = result.entries.len(),
        total = result.all_hashes.len(),
        skipped = result.warnings.len(),
        "extraction complete"
    );
    Ok(result)
}

fn extract_file(path: &Path) -> Result<Vec<Declaration>> {
    let source = fs::read_to_string(path)?;
    parse_declarations(path, &source)
}

/// All `.java` files under `root`, respecting .gitignore, in a stable order.
pub fn java_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "java"))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}
