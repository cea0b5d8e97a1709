//! Parser diagnostics (spec.md §4.7.1).
//!
//! Walks the syntax tree and reports an `Error` diagnostic for every
//! `ERROR`/`MISSING` node tree-sitter produced. Smart-contract documents
//! have no tree at all; their diagnostics come entirely from
//! [`crate::contract`] instead.

use crate::context::{to_lsp_severity, walk, DocumentContext};
use ghost_diagnostics_codes::DiagnosticCode;
use lsp_types::Diagnostic;
use rustc_hash::FxHashSet;

/// Collect one diagnostic per error/missing node, deduplicated by start
/// position (spec.md: "two diagnostics at the same `start` are collapsed").
pub fn collect(ctx: &DocumentContext) -> Vec<Diagnostic> {
    let Some(tree) = ctx.tree else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut seen_starts = FxHashSet::default();

    walk(tree.root_node(), |node| {
        if !node.is_error() && !node.is_missing() {
            return;
        }
        let range = ctx.node_range(node);
        if !seen_starts.insert((range.start.line, range.start.character)) {
            return;
        }

        let (code, message) = if node.is_missing() {
            (DiagnosticCode::MissingNode, format!("missing {}", node.kind()))
        } else if node.end_byte() >= ctx.text.len() {
            (DiagnosticCode::UnexpectedEof, "unexpected end of file".to_string())
        } else {
            (DiagnosticCode::SyntaxError, format!("syntax error near `{}`", ctx.node_text(node)))
        };

        out.push(Diagnostic {
            range,
            severity: Some(to_lsp_severity(code.severity())),
            code: Some(lsp_types::NumberOrString::String(code.as_str().to_string())),
            code_description: None,
            source: Some("ghost-lsp".to_string()),
            message,
            related_information: None,
            tags: None,
            data: None,
        });
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_lsp_position::LineIndex;
    use ghost_syntax::LanguageKind;

    #[test]
    fn reports_error_node_once() {
        let text = "let x = ;\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        let diags = collect(&ctx);
        assert!(!diags.is_empty());
    }

    #[test]
    fn clean_source_has_no_diagnostics() {
        let text = "let x = 1;\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        assert!(collect(&ctx).is_empty());
    }
}
