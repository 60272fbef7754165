//! Doc-comment text handling.
//!
//! DocSets store documentation as plain text, without the `/** … */`
//! delimiters or the leading asterisk scaffolding, so a snapshot survives
//! reformatting of the surrounding file. Stripping and rendering are inverse
//! operations up to indentation.

/// Strip a raw `/** … */` block down to its text content.
///
/// Removes the delimiters and, per line, the leading whitespace plus one
/// optional `*` and one optional space after it. Leading and trailing blank
/// lines are dropped.
pub fn strip_doc_comment(raw: &str) -> String {
    let inner = raw.strip_prefix("/**").unwrap_or(raw);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    let mut lines: Vec<&str> = inner.lines().map(strip_line).collect();
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn strip_line(line: &str) -> &str {
    let trimmed = line.trim_start();
    let content = match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => trimmed,
    };
    content.trim_end()
}

/// Render plain documentation text back into a `/** … */` block.
///
/// The first line carries no indentation (the caller splices the block at an
/// already-indented position); continuation lines are prefixed with `indent`.
pub fn render_doc_comment(text: &str, indent: &str) -> String {
    let mut out = String::from("/**\n");
    for line in text.lines() {
        if line.is_empty() {
            out.push_str(indent);
            out.push_str(" *\n");
        } else {
            out.push_str(indent);
            out.push_str(" * ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(indent);
    out.push_str(" */");
    out
}

/// Normalize a configured marker: one leading `//` is tolerated and removed,
/// surrounding whitespace trimmed. The result is the marker text itself.
pub fn normalize_marker(marker: &str) -> &str {
    marker.strip_prefix("//").unwrap_or(marker).trim()
}

/// Render a marker as a plain line comment (never a doc comment).
pub fn render_marker_comment(marker: &str) -> String {
    format!("// {}", normalize_marker(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_multi_line() {
        let raw = "/**\n * Checks the user.\n *\n * @param name the name\n */";
        assert_eq!(
            strip_doc_comment(raw),
            "Checks the user.\n\n@param name the name"
        );
    }

    #[test]
    fn test_strip_single_line() {
        assert_eq!(strip_doc_comment("/** Does X. */"), "Does X.");
    }

    #[test]
    fn test_strip_without_leading_asterisks() {
        let raw = "/**\n   First line\n   Second line\n*/";
        assert_eq!(strip_doc_comment(raw), "First line\nSecond line");
    }

    #[test]
    fn test_render_with_indent() {
        let rendered = render_doc_comment("Does X.\n\n@return a value", "    ");
        assert_eq!(
            rendered,
            "/**\n     * Does X.\n     *\n     * @return a value\n     */"
        );
    }

    #[test]
    fn test_strip_render_round_trip() {
        let text = "Line one.\n\nLine two.";
        assert_eq!(strip_doc_comment(&render_doc_comment(text, "  ")), text);
    }

    #[test]
    fn test_marker_normalization() {
        assert_eq!(normalize_marker("// @Undocumented"), "@Undocumented");
        assert_eq!(normalize_marker("@Undocumented"), "@Undocumented");
        assert_eq!(render_marker_comment("// @Undocumented"), "// @Undocumented");
    }
}
