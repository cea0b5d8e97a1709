//! CodeActions (spec.md §4.7.12).

use crate::context::{walk, DocumentContext};
use lsp_types::{CodeAction, CodeActionKind, TextEdit, Url, WorkspaceEdit};
use std::collections::HashMap;

/// Statement-shaped node kinds eligible for the "insert missing semicolon" quick-fix.
const STATEMENT_KINDS: &[&str] =
    &["expression_statement", "variable_declarator", "lexical_declaration", "return_statement"];

/// Quick-fixes plus the reserved, currently-empty refactoring stubs.
pub fn code_actions(ctx: &DocumentContext) -> Vec<CodeAction> {
    let mut actions = missing_semicolon_fixes(ctx);
    actions.push(refactor_stub("Extract function", "extracted"));
    actions.push(refactor_stub("Inline variable", "inlined"));
    actions
}

fn missing_semicolon_fixes(ctx: &DocumentContext) -> Vec<CodeAction> {
    let Some(tree) = ctx.tree else {
        return Vec::new();
    };
    let Ok(uri) = Url::parse(ctx.uri) else {
        return Vec::new();
    };

    let mut actions = Vec::new();
    walk(tree.root_node(), |node| {
        if !STATEMENT_KINDS.contains(&node.kind()) {
            return;
        }
        let has_error = node.parent().map(|p| p.is_error()).unwrap_or(false) || node.next_sibling().map(|s| s.is_error()).unwrap_or(false);
        if !has_error {
            return;
        }
        let text = ctx.node_text(node);
        if text.trim_end().ends_with(';') {
            return;
        }
        let insertion_point = ctx.node_range(node).end;
        let mut changes = HashMap::new();
        changes.insert(
            uri.clone(),
            vec![TextEdit { range: lsp_types::Range { start: insertion_point, end: insertion_point }, new_text: ";".to_string() }],
        );
        actions.push(CodeAction {
            title: "Insert missing semicolon".to_string(),
            kind: Some(CodeActionKind::QUICKFIX),
            diagnostics: None,
            edit: Some(WorkspaceEdit { changes: Some(changes), document_changes: None, change_annotations: None }),
            command: None,
            is_preferred: Some(true),
            disabled: None,
            data: None,
        });
    });
    actions
}

fn refactor_stub(title: &str, _reserved: &str) -> CodeAction {
    CodeAction {
        title: title.to_string(),
        kind: Some(CodeActionKind::REFACTOR),
        diagnostics: None,
        edit: None,
        command: None,
        is_preferred: Some(false),
        disabled: Some(lsp_types::CodeActionDisabled { reason: "not yet implemented".to_string() }),
        data: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_lsp_position::LineIndex;
    use ghost_syntax::LanguageKind;

    #[test]
    fn always_includes_refactor_stubs() {
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
        let actions = code_actions(&ctx);
        assert!(actions.iter().any(|a| a.title == "Extract function"));
        assert!(actions.iter().any(|a| a.title == "Inline variable"));
    }
}
