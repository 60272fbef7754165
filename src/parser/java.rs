//! Java declaration harvesting via tree-sitter.
//!
//! Parses a compilation unit and yields one `Declaration` per documentable
//! node: each class/interface/enum, then its constructors, methods, and
//! fields in source order, with nested types recursing depth-first. Every
//! declaration carries its structural signature, the attached doc comment
//! (if any), and the byte positions needed to replace or insert comments
//! without disturbing any other formatting.

use std::path::Path;
use tree_sitter::{Node, Parser};

use super::javadoc;
use crate::error::{DocPortError, Result};
use crate::signature::{
    class_signature, constructor_signature, field_signature, method_signature, Signature,
};

/// An existing `/** … */` comment attached to a declaration.
#[derive(Debug, Clone)]
pub struct DocComment {
    /// Byte range of the comment block in the original source.
    pub start: usize,
    pub end: usize,
    /// Stripped text (no delimiters, no leading asterisks).
    pub text: String,
}

/// One documentable declaration found in a source file.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub signature: Signature,
    pub doc: Option<DocComment>,
    /// Byte offset of the declaration itself (annotations included).
    /// New comments are inserted here.
    pub insert_offset: usize,
    /// Leading whitespace of the declaration's line, reused when rendering
    /// inserted comments.
    pub indent: String,
}

/// Parse Java source into its documentable declarations.
///
/// Fails when tree-sitter produces no tree or the tree contains syntax
/// errors; callers treat that as a per-file failure, not a fatal one.
pub fn parse_declarations(file: &Path, source: &str) -> Result<Vec<Declaration>> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| DocPortError::Parse {
            file: file.to_path_buf(),
            message: format!("failed to load Java grammar: {}", e),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| DocPortError::Parse {
            file: file.to_path_buf(),
            message: "parser produced no tree".to_string(),
        })?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(DocPortError::Parse {
            file: file.to_path_buf(),
            message: "source contains syntax errors".to_string(),
        });
    }

    let bytes = source.as_bytes();
    let package = package_name(&root, bytes);
    let mut declarations = Vec::new();

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if is_type_declaration(child.kind()) {
            collect_type(&child, bytes, source, &package, &mut declarations);
        }
    }
    Ok(declarations)
}

fn is_type_declaration(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration" | "interface_declaration" | "enum_declaration"
    )
}

/// Visit one type declaration: the type itself, then its members in source
/// order, then nested types.
fn collect_type(
    node: &Node,
    bytes: &[u8],
    source: &str,
    enclosing: &str,
    out: &mut Vec<Declaration>,
) {
    let Some(name) = node
        .child_by_field_name("name")
        .and_then(|n| text(&n, bytes))
    else {
        return;
    };
    let name = name.to_string();
    let qualified = if enclosing.is_empty() {
        name.clone()
    } else {
        format!("{}.{}", enclosing, name)
    };

    let (extends, implements) = supertypes(node, bytes);
    out.push(declaration(
        node,
        source,
        class_signature(&qualified, &extends, &implements),
    ));

    let Some(body) = node.child_by_field_name("body") else {
        return;
    };
    for member in body_members(&body) {
        match member.kind() {
            "constructor_declaration" => {
                if let Some(sig) = constructor_decl(&member, bytes, &qualified) {
                    out.push(declaration(&member, source, sig));
                }
            }
            "method_declaration" => {
                if let Some(sig) = method_decl(&member, bytes, &qualified) {
                    out.push(declaration(&member, source, sig));
                }
            }
            // Interface constants parse as constant_declaration but carry
            // the same shape as fields.
            "field_declaration" | "constant_declaration" => {
                if let Some(sig) = field_decl(&member, bytes, &qualified) {
                    out.push(declaration(&member, source, sig));
                }
            }
            kind if is_type_declaration(kind) => {
                collect_type(&member, bytes, source, &qualified, out);
            }
            _ => {}
        }
    }
}

/// Member nodes of a type body. Enum members sit one level down, behind the
/// constant list.
fn body_members<'tree>(body: &Node<'tree>) -> Vec<Node<'tree>> {
    if body.kind() == "enum_body" {
        let mut cursor = body.walk();
        let decls = body
            .children(&mut cursor)
            .find(|c| c.kind() == "enum_body_declarations");
        match decls {
            Some(d) => {
                let mut inner = d.walk();
                d.children(&mut inner).collect()
            }
            None => Vec::new(),
        }
    } else {
        let mut cursor = body.walk();
        body.children(&mut cursor).collect()
    }
}

// ─── Signature inputs ───────────────────────────────────────────

fn supertypes(node: &Node, bytes: &[u8]) -> (Vec<String>, Vec<String>) {
    let mut extends = Vec::new();
    let mut implements = Vec::new();
    match node.kind() {
        "class_declaration" | "enum_declaration" => {
            if let Some(superclass) = node.child_by_field_name("superclass") {
                let mut cursor = superclass.walk();
                for t in superclass.named_children(&mut cursor) {
                    extends.push(base_type_name(&t, bytes));
                }
            }
            if let Some(interfaces) = node.child_by_field_name("interfaces") {
                implements.extend(type_list_names(&interfaces, bytes));
            }
        }
        "interface_declaration" => {
            // `interface X extends A, B`: extended types, declaration order.
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.kind() == "extends_interfaces" {
                    extends.extend(type_list_names(&child, bytes));
                }
            }
        }
        _ => {}
    }
    (extends, implements)
}

/// Names inside a `super_interfaces` / `extends_interfaces` wrapper.
fn type_list_names(node: &Node, bytes: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "type_list" {
            let mut inner = child.walk();
            for t in child.named_children(&mut inner) {
                out.push(base_type_name(&t, bytes));
            }
        }
    }
    out
}

/// The bare identifier of a type reference: generic arguments dropped,
/// qualified names reduced to their rightmost segment.
fn base_type_name(node: &Node, bytes: &[u8]) -> String {
    match node.kind() {
        "generic_type" => node
            .named_child(0)
            .map(|n| base_type_name(&n, bytes))
            .unwrap_or_default(),
        "scoped_type_identifier" => {
            let last = node.named_child_count().saturating_sub(1);
            node.named_child(last)
                .and_then(|n| text(&n, bytes))
                .unwrap_or_default()
                .to_string()
        }
        _ => text(node, bytes).unwrap_or_default().to_string(),
    }
}

fn method_decl(node: &Node, bytes: &[u8], qualified: &str) -> Option<Signature> {
    let return_type = type_text(&node.child_by_field_name("type")?, bytes);
    let name = text(&node.child_by_field_name("name")?, bytes)?;
    let params = parameter_types(node, bytes);
    Some(method_signature(qualified, &return_type, name, &params))
}

fn constructor_decl(node: &Node, bytes: &[u8], qualified: &str) -> Option<Signature> {
    let name = text(&node.child_by_field_name("name")?, bytes)?;
    let params = parameter_types(node, bytes);
    Some(constructor_signature(qualified, name, &params))
}

fn field_decl(node: &Node, bytes: &[u8], qualified: &str) -> Option<Signature> {
    let type_node = node.child_by_field_name("type")?;
    let element_type = element_type_text(&type_node, bytes);
    let modifiers = modifier_keywords(node, bytes);
    let mut cursor = node.walk();
    let var_count = node.children_by_field_name("declarator", &mut cursor).count();
    Some(field_signature(
        qualified,
        &modifiers,
        &element_type,
        var_count.max(1),
    ))
}

/// Parameter type texts in declaration order. Varargs contribute their
/// element type, matching the erasure-level identity.
fn parameter_types(node: &Node, bytes: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let Some(params) = node.child_by_field_name("parameters") else {
        return out;
    };
    let mut cursor = params.walk();
    for param in params.named_children(&mut cursor) {
        match param.kind() {
            "formal_parameter" => {
                if let Some(t) = param.child_by_field_name("type") {
                    out.push(type_text(&t, bytes));
                }
            }
            "spread_parameter" => {
                let mut inner = param.walk();
                for child in param.named_children(&mut inner) {
                    if child.kind() != "modifiers" && child.kind() != "variable_declarator" {
                        out.push(type_text(&child, bytes));
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    out
}

/// Source text of a type node with whitespace runs collapsed, so a type
/// split across lines hashes the same as its single-line rendering.
fn type_text(node: &Node, bytes: &[u8]) -> String {
    text(node, bytes)
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Element type of a field: array dimensions peeled off.
fn element_type_text(node: &Node, bytes: &[u8]) -> String {
    if node.kind() == "array_type" {
        if let Some(element) = node.child_by_field_name("element") {
            return element_type_text(&element, bytes);
        }
    }
    type_text(node, bytes)
}

/// Modifier keywords in declaration order, annotations excluded.
fn modifier_keywords(node: &Node, bytes: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "modifiers" {
            continue;
        }
        let mut inner = child.walk();
        for modifier in child.children(&mut inner) {
            if modifier.kind() == "annotation" || modifier.kind() == "marker_annotation" {
                continue;
            }
            if let Some(t) = text(&modifier, bytes) {
                out.push(t.to_string());
            }
        }
    }
    out
}

// ─── Positions and comments ─────────────────────────────────────

fn declaration(node: &Node, source: &str, signature: Signature) -> Declaration {
    let start = node.start_byte();
    Declaration {
        signature,
        doc: doc_comment(node, source),
        insert_offset: start,
        indent: line_indent(source, start),
    }
}

/// Leading whitespace of the line a declaration starts on. Empty when the
/// declaration does not start its own line.
fn line_indent(source: &str, offset: usize) -> String {
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &source[line_start..offset];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix.to_string()
    } else {
        String::new()
    }
}

/// The doc comment attached to a declaration: the immediately preceding
/// sibling, when it is a `/** … */` block. A line comment in between
/// detaches it, matching Javadoc semantics.
fn doc_comment(node: &Node, source: &str) -> Option<DocComment> {
    let prev = node.prev_sibling()?;
    if prev.kind() != "block_comment" {
        return None;
    }
    let raw = &source[prev.start_byte()..prev.end_byte()];
    if !raw.starts_with("/**") {
        return None;
    }
    Some(DocComment {
        start: prev.start_byte(),
        end: prev.end_byte(),
        text: javadoc::strip_doc_comment(raw),
    })
}

fn package_name(root: &Node, bytes: &[u8]) -> String {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() != "package_declaration" {
            continue;
        }
        let mut inner = child.walk();
        for part in child.named_children(&mut inner) {
            if part.kind() == "scoped_identifier" || part.kind() == "identifier" {
                return text(&part, bytes).unwrap_or_default().to_string();
            }
        }
    }
    String::new()
}

fn text<'a>(node: &Node, bytes: &'a [u8]) -> Option<&'a str> {
    node.utf8_text(bytes).ok()
}
