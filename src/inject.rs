//! Migration engine — replays an old documentation snapshot onto a freshly
//! generated source tree.
//!
//! Every visited declaration lands in exactly one of three states:
//!
//! - **preserved**: its hash has documentation in the old snapshot; the text
//!   is carried over verbatim and the hash marked used.
//! - **known, undocumented**: the hash existed before without documentation;
//!   nothing changes, but the hash is marked used so it cannot be orphaned.
//! - **new**: the hash is unknown; if a marker is configured and the
//!   declaration carries no documentation, a plain `//` comment flags it.
//!
//! Old entries whose hash was never used are orphaned. Files are processed
//! in parallel and independently; a file that fails to parse or rewrite is
//! copied through to the output unmodified.

use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::docset::{DocEntry, DocSet};
use crate::error::{DocPortError, Result};
use crate::extract::{extract_dir, java_files, FileWarning};
use crate::parser::{javadoc, parse_declarations};
use crate::report::MigrationStats;
use crate::store;

/// Where the old documentation comes from: a stored snapshot, a remote
/// snapshot, or live extraction from the old source tree.
#[derive(Debug, Clone)]
pub enum DocSource {
    File(PathBuf),
    Url(String),
    Sources(PathBuf),
}

/// One migration run's configuration: the old snapshot plus the marker.
pub struct Injector {
    old_javadocs: HashMap<String, String>,
    old_signatures: HashSet<String>,
    old_entries: Vec<DocEntry>,
    new_marker: String,
}

/// What a completed run produced, orphans included. The engine is the single
/// source of truth for classification; the report only packages this.
#[derive(Debug)]
pub struct MigrationOutcome {
    pub stats: MigrationStats,
    /// Old entries with no structural match in the new tree.
    pub orphaned: Vec<DocEntry>,
    /// Every old hash that matched some new declaration.
    pub used: HashSet<String>,
    /// Files copied through unmodified, with the reason.
    pub warnings: Vec<FileWarning>,
}

/// Per-file classification deltas, folded into the shared accumulators at
/// the join point.
#[derive(Debug, Default)]
struct FileDelta {
    preserved: usize,
    new_items: usize,
    used: HashSet<String>,
}

enum FileOutcome {
    Processed(FileDelta),
    CopiedThrough(FileWarning),
}

impl Injector {
    /// Build an engine from explicit inputs. `known_hashes` is the full set
    /// of hashes observed in the old tree, a superset of the documented ones.
    pub fn new(entries: Vec<DocEntry>, known_hashes: HashSet<String>, new_marker: &str) -> Self {
        let old_javadocs = entries
            .iter()
            .map(|e| (e.hash.clone(), e.javadoc.clone()))
            .collect();
        Self {
            old_javadocs,
            old_signatures: known_hashes,
            old_entries: entries,
            new_marker: javadoc::normalize_marker(new_marker).to_string(),
        }
    }

    /// Build an engine from a stored snapshot. A snapshot only knows about
    /// documented declarations, so the known set equals the entry hashes.
    pub fn from_snapshot(doc_set: &DocSet, new_marker: &str) -> Self {
        Self::new(doc_set.entries.clone(), doc_set.hashes(), new_marker)
    }

    /// Resolve a documentation source and build the engine from it.
    pub fn from_source(source: &DocSource, new_marker: &str) -> Result<Self> {
        match source {
            DocSource::File(path) => {
                info!(path = %path.display(), "loading javadocs from file");
                Ok(Self::from_snapshot(&store::load(path)?, new_marker))
            }
            DocSource::Url(url) => {
                info!(url = %url, "loading javadocs from url");
                Ok(Self::from_snapshot(&store::load_remote(url)?, new_marker))
            }
            DocSource::Sources(dir) => {
                info!(dir = %dir.display(), "extracting javadocs from old sources");
                let extraction = extract_dir(dir)?;
                Ok(Self::new(
                    extraction.entries,
                    extraction.all_hashes,
                    new_marker,
                ))
            }
        }
    }

    /// Walk `source_root`, classify every declaration, and write the
    /// annotated tree under `output_root`, mirroring relative paths.
    pub fn run(&self, source_root: &Path, output_root: &Path) -> Result<MigrationOutcome> {
        if !source_root.exists() {
            return Err(DocPortError::SourceNotFound(source_root.to_path_buf()));
        }

        let files = java_files(source_root);
        info!(file_count = files.len(), "injecting javadocs");

        let outcomes: Vec<Result<FileOutcome>> = files
            .par_iter()
            .map(|input| {
                let rel = input.strip_prefix(source_root).unwrap_or(input);
                let output = output_root.join(rel);
                match self.process_file(input, &output) {
                    Ok(delta) => Ok(FileOutcome::Processed(delta)),
                    Err(e) => {
                        warn!(file = %input.display(), error = %e, "copying file through unmodified");
                        copy_through(input, &output)?;
                        Ok(FileOutcome::CopiedThrough(FileWarning {
                            file: input.clone(),
                            message: e.to_string(),
                        }))
                    }
                }
            })
            .collect();

        let mut stats = MigrationStats::default();
        let mut used = HashSet::new();
        let mut warnings = Vec::new();
        for outcome in outcomes {
            match outcome? {
                FileOutcome::Processed(delta) => {
                    stats.preserved += delta.preserved;
                    stats.new_items += delta.new_items;
                    used.extend(delta.used);
                }
                FileOutcome::CopiedThrough(warning) => warnings.push(warning),
            }
        }

        let orphaned: Vec<DocEntry> = self
            .old_entries
            .iter()
            .filter(|e| !used.contains(&e.hash))
            .cloned()
            .collect();
        stats.orphaned = orphaned.len();

        info!(
            preserved = stats.preserved,
            new_items = stats.new_items,
            orphaned = stats.orphaned,
            "injection complete"
        );
        Ok(MigrationOutcome {
            stats,
            orphaned,
            used,
            warnings,
        })
    }

    fn process_file(&self, input: &Path, output: &Path) -> Result<FileDelta> {
        let source = fs::read_to_string(input)?;
        let declarations = parse_declarations(input, &source)?;

        let mut delta = FileDelta::default();
        let mut edits = Vec::new();
        for decl in &declarations {
            let hash = &decl.signature.hash;
            if let Some(text) = self.old_javadocs.get(hash) {
                // Exact structural match: carry the old documentation over.
                let rendered = javadoc::render_doc_comment(text, &decl.indent);
                match &decl.doc {
                    Some(doc) => edits.push(Edit {
                        start: doc.start,
                        end: doc.end,
                        text: rendered,
                    }),
                    None => edits.push(Edit {
                        start: decl.insert_offset,
                        end: decl.insert_offset,
                        text: format!("{}\n{}", rendered, decl.indent),
                    }),
                }
                delta.used.insert(hash.clone());
                delta.preserved += 1;
            } else if self.old_signatures.contains(hash) {
                // Existed before without documentation: leave as is.
                delta.used.insert(hash.clone());
            } else if !self.new_marker.is_empty() && decl.doc.is_none() {
                edits.push(Edit {
                    start: decl.insert_offset,
                    end: decl.insert_offset,
                    text: format!(
                        "{}\n{}",
                        javadoc::render_marker_comment(&self.new_marker),
                        decl.indent
                    ),
                });
                delta.new_items += 1;
            }
        }

        let rewritten = apply_edits(&source, edits);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, rewritten)?;
        Ok(delta)
    }
}

struct Edit {
    start: usize,
    end: usize,
    text: String,
}

/// Splice edits into the source back to front so earlier offsets stay valid.
fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| e.start);
    let mut out = source.to_string();
    for edit in edits.iter().rev() {
        out.replace_range(edit.start..edit.end, &edit.text);
    }
    out
}

fn copy_through(input: &Path, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(input, output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::method_signature;

    fn entry_for(sig: &crate::signature::Signature, javadoc: &str) -> DocEntry {
        DocEntry {
            hash: sig.hash.clone(),
            kind: sig.kind,
            signature: sig.raw.clone(),
            javadoc: javadoc.to_string(),
        }
    }

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(dir: &Path, rel: &str) -> String {
        fs::read_to_string(dir.join(rel)).unwrap()
    }

    // Scenario: the old snapshot documents a declaration that still exists
    // structurally. Its documentation must come back verbatim.
    #[test]
    fn test_preserves_matching_documentation() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(
            src.path(),
            "p/C.java",
            "package p;\n\npublic class C {\n    void doWork() {}\n}\n",
        );

        let class_sig = crate::signature::class_signature("p.C", &[], &[]);
        let method_sig = method_signature("p.C", "void", "doWork", &[]);
        let entries = vec![entry_for(&method_sig, "does X")];
        let known: HashSet<String> = [class_sig.hash.clone(), method_sig.hash.clone()]
            .into_iter()
            .collect();

        let outcome = Injector::new(entries, known, "")
            .run(src.path(), out.path())
            .unwrap();

        assert_eq!(outcome.stats.preserved, 1);
        assert_eq!(outcome.stats.new_items, 0);
        assert_eq!(outcome.stats.orphaned, 0);

        let result = read(out.path(), "p/C.java");
        assert!(result.contains("    /**\n     * does X\n     */\n    void doWork() {}"));
    }

    // Scenario: the documented declaration vanished from the new tree.
    #[test]
    fn test_orphans_unmatched_documentation() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(src.path(), "p/C.java", "package p;\n\npublic class C {\n}\n");

        let gone = method_signature("p.C", "void", "vanished", &[]);
        let class_sig = crate::signature::class_signature("p.C", &[], &[]);
        let entries = vec![entry_for(&gone, "was documented")];
        let known: HashSet<String> = [gone.hash.clone(), class_sig.hash.clone()]
            .into_iter()
            .collect();

        let outcome = Injector::new(entries, known, "")
            .run(src.path(), out.path())
            .unwrap();

        assert_eq!(outcome.stats.preserved, 0);
        assert_eq!(outcome.stats.orphaned, 1);
        assert_eq!(outcome.orphaned[0].hash, gone.hash);
    }

    // Scenario: a brand-new undocumented declaration gets a plain marker
    // comment, never a doc comment.
    #[test]
    fn test_marks_new_declarations() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(
            src.path(),
            "p/B.java",
            "package p;\n\npublic class B {\n    void fresh() {}\n}\n",
        );

        let outcome = Injector::new(Vec::new(), HashSet::new(), "@Undocumented")
            .run(src.path(), out.path())
            .unwrap();

        // Both the class and the method are new.
        assert_eq!(outcome.stats.new_items, 2);
        let result = read(out.path(), "p/B.java");
        assert!(result.contains("// @Undocumented\npublic class B {"));
        assert!(result.contains("    // @Undocumented\n    void fresh() {}"));
        assert!(!result.contains("/** @Undocumented"));
    }

    // Scenario: known but never documented. Untouched, used, not orphaned.
    #[test]
    fn test_known_undocumented_is_left_alone() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let original = "package p;\n\npublic class C {\n    void quiet() {}\n}\n";
        write(src.path(), "p/C.java", original);

        let class_sig = crate::signature::class_signature("p.C", &[], &[]);
        let quiet = method_signature("p.C", "void", "quiet", &[]);
        let known: HashSet<String> = [class_sig.hash.clone(), quiet.hash.clone()]
            .into_iter()
            .collect();

        let outcome = Injector::new(Vec::new(), known, "@Undocumented")
            .run(src.path(), out.path())
            .unwrap();

        assert_eq!(outcome.stats.preserved, 0);
        assert_eq!(outcome.stats.new_items, 0);
        assert_eq!(outcome.stats.orphaned, 0);
        assert!(outcome.used.contains(&quiet.hash));
        assert_eq!(read(out.path(), "p/C.java"), original);
    }

    #[test]
    fn test_replaces_stale_documentation() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(
            src.path(),
            "p/C.java",
            "package p;\n\npublic class C {\n    /** Decompiler noise. */\n    void doWork() {}\n}\n",
        );

        let class_sig = crate::signature::class_signature("p.C", &[], &[]);
        let method_sig = method_signature("p.C", "void", "doWork", &[]);
        let entries = vec![entry_for(&method_sig, "the real doc")];
        let known: HashSet<String> = [class_sig.hash.clone(), method_sig.hash.clone()]
            .into_iter()
            .collect();

        Injector::new(entries, known, "")
            .run(src.path(), out.path())
            .unwrap();

        let result = read(out.path(), "p/C.java");
        assert!(result.contains("the real doc"));
        assert!(!result.contains("Decompiler noise"));
    }

    // An unparseable file is copied through byte for byte; other files still
    // classify normally.
    #[test]
    fn test_broken_file_copied_through() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let broken = "public class { nope";
        write(src.path(), "Broken.java", broken);
        write(
            src.path(),
            "Fine.java",
            "package p;\n\npublic class Fine {\n}\n",
        );

        let outcome = Injector::new(Vec::new(), HashSet::new(), "@Undocumented")
            .run(src.path(), out.path())
            .unwrap();

        assert_eq!(read(out.path(), "Broken.java"), broken);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].file.ends_with("Broken.java"));
        // Fine.java was still classified.
        assert_eq!(outcome.stats.new_items, 1);
    }

    // Unrelated formatting survives injection untouched.
    #[test]
    fn test_preserves_unrelated_formatting() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(
            src.path(),
            "p/C.java",
            "package p;\n\npublic class C {\n\n    int   oddly =  1;\n\n    void doWork() {}\n}\n",
        );

        let class_sig = crate::signature::class_signature("p.C", &[], &[]);
        let field_sig = crate::signature::field_signature("p.C", &[], "int", 1);
        let method_sig = method_signature("p.C", "void", "doWork", &[]);
        let entries = vec![entry_for(&method_sig, "does X")];
        let known: HashSet<String> =
            [class_sig.hash, field_sig.hash, method_sig.hash].into_iter().collect();

        Injector::new(entries, known, "")
            .run(src.path(), out.path())
            .unwrap();

        let result = read(out.path(), "p/C.java");
        assert!(result.contains("    int   oddly =  1;"));
        assert!(result.contains("/**\n     * does X\n     */\n    void doWork()"));
    }

    #[test]
    fn test_no_marker_when_empty() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let original = "package p;\n\npublic class B {\n}\n";
        write(src.path(), "B.java", original);

        let outcome = Injector::new(Vec::new(), HashSet::new(), "")
            .run(src.path(), out.path())
            .unwrap();

        // With no marker configured nothing is inserted or counted.
        assert_eq!(outcome.stats.new_items, 0);
        assert_eq!(read(out.path(), "B.java"), original);
    }

    #[test]
    fn test_output_mirrors_relative_paths() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(
            src.path(),
            "com/example/deep/D.java",
            "package com.example.deep;\nclass D {}\n",
        );

        Injector::new(Vec::new(), HashSet::new(), "")
            .run(src.path(), out.path())
            .unwrap();

        assert!(out.path().join("com/example/deep/D.java").exists());
    }

    #[test]
    fn test_missing_source_root_is_fatal() {
        let out = tempfile::tempdir().unwrap();
        let result = Injector::new(Vec::new(), HashSet::new(), "")
            .run(&PathBuf::from("/nonexistent/docport-new"), out.path());
        assert!(matches!(result, Err(DocPortError::SourceNotFound(_))));
    }
}
