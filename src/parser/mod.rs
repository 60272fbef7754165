//! The Java parser collaborator.
//!
//! docport's matching and migration logic never inspects syntax trees
//! directly; this module is the only place that talks to tree-sitter. It
//! turns a source file into a flat, source-ordered list of documentable
//! declarations, and owns the text-level doc-comment helpers used when
//! files are edited.

pub mod java;
pub mod javadoc;

pub use java::{parse_declarations, Declaration, DocComment};
