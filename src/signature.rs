//! Canonical structural signatures for Java declarations.
//!
//! A signature is a pure function of declaration content (qualified name,
//! modifiers, parameter types, return type, extends/implements, field arity),
//! never of file path, comment text, or formatting. The canonical string
//! formats are fixed; two independent runs over the same declaration must
//! hash identically.
//!
//! Overloads whose parameter types render to the same text, and multiple
//! same-typed fields declared under identical modifiers, intentionally share
//! one signature. Matching is coarse by design.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// The kind of declaration a signature identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeclKind {
    Class,
    Method,
    Constructor,
    Field,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclKind::Class => write!(f, "CLASS"),
            DeclKind::Method => write!(f, "METHOD"),
            DeclKind::Constructor => write!(f, "CONSTRUCTOR"),
            DeclKind::Field => write!(f, "FIELD"),
        }
    }
}

/// Canonical structural identity of one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Lowercase hex SHA-256 of the canonical string.
    pub hash: String,
    /// The canonical string itself (kept for diagnostics and reports).
    pub raw: String,
    pub kind: DeclKind,
}

impl Signature {
    fn new(raw: String, kind: DeclKind) -> Self {
        Self {
            hash: content_hash(&raw),
            raw,
            kind,
        }
    }
}

/// Signature of a class, interface, or enum declaration.
///
/// Extended type names keep declaration order; implemented type names are
/// sorted lexicographically so `implements A, B` and `implements B, A`
/// collapse to the same identity.
pub fn class_signature(qualified_name: &str, extends: &[String], implements: &[String]) -> Signature {
    let extended = extends.join(",");
    let mut implemented: Vec<&str> = implements.iter().map(String::as_str).collect();
    implemented.sort_unstable();
    let raw = format!(
        "CLASS:{}:EXTENDS:{}:IMPLEMENTS:{}",
        qualified_name,
        extended,
        implemented.join(",")
    );
    Signature::new(raw, DeclKind::Class)
}

/// Signature of a method declaration. Parameter types keep declaration order.
pub fn method_signature(
    qualified_name: &str,
    return_type: &str,
    name: &str,
    param_types: &[String],
) -> Signature {
    let raw = format!(
        "METHOD:{}:{} {}({})",
        qualified_name,
        return_type,
        name,
        param_types.join(",")
    );
    Signature::new(raw, DeclKind::Method)
}

/// Signature of a constructor declaration.
pub fn constructor_signature(
    qualified_name: &str,
    simple_name: &str,
    param_types: &[String],
) -> Signature {
    let raw = format!(
        "CONSTRUCTOR:{}:{}({})",
        qualified_name,
        simple_name,
        param_types.join(",")
    );
    Signature::new(raw, DeclKind::Constructor)
}

/// Signature of a field declaration.
///
/// Covers the whole declaration statement: all variables declared together
/// count as one identity (`x{count}`), keyed by modifiers and element type.
pub fn field_signature(
    qualified_name: &str,
    modifiers: &[String],
    element_type: &str,
    var_count: usize,
) -> Signature {
    let raw = format!(
        "FIELD:{}:{} {} x{}",
        qualified_name,
        modifiers.join(","),
        element_type,
        var_count
    );
    Signature::new(raw, DeclKind::Field)
}

/// Lowercase hex SHA-256 of a string's UTF-8 bytes.
fn content_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
