//! # docport
//!
//! Preserve hand-written Javadoc across regenerated sources.
//!
//! When a Java codebase is re-created from a newer binary (typically by a
//! decompiler), every manually curated documentation comment is lost.
//! docport captures documentation into a snapshot keyed by structural
//! signatures (stable identities derived from declaration content, never
//! from file layout or formatting) and later replays that snapshot onto a
//! freshly parsed tree, classifying every declaration as preserved,
//! known-but-undocumented, or new, and reporting the entries it could no
//! longer place.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use docport::{extract_dir, Injector};
//! use std::path::Path;
//!
//! // Capture a snapshot from the old sources
//! let extraction = extract_dir(Path::new("old/src")).unwrap();
//!
//! // Replay it onto the regenerated tree
//! let injector = Injector::new(
//!     extraction.entries,
//!     extraction.all_hashes,
//!     "@Undocumented",
//! );
//! let outcome = injector
//!     .run(Path::new("new/src"), Path::new("out/src"))
//!     .unwrap();
//! println!("preserved: {}", outcome.stats.preserved);
//! ```

pub mod config;
pub mod docset;
pub mod error;
pub mod extract;
pub mod inject;
pub mod parser;
pub mod report;
pub mod signature;
pub mod store;

// Re-exports for convenience
pub use error::{DocPortError, Result};

pub use docset::{DocEntry, DocSet, DocSetMetadata};
pub use extract::{extract_dir, ExtractionResult, FileWarning};
pub use inject::{DocSource, Injector, MigrationOutcome};
pub use report::{write_report, MigrationReport, MigrationStats};
pub use signature::{DeclKind, Signature};
pub use store::{load, load_remote, save};
