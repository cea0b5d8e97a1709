//! Rename and prepareRename (spec.md §4.7.11).
//!
//! Purely textual, like [`crate::references`]: every identifier-kind node
//! with matching text, across every open document, is rewritten. No scope
//! resolution is performed.

use crate::context::{is_identifier_like, DocumentContext};
use crate::references::occurrences;
use lsp_types::{Position, Range, TextEdit, Url, WorkspaceEdit};
use std::collections::HashMap;

/// One document participating in a cross-file rename.
pub struct RenameDocument<'a> {
    /// The document's URI.
    pub uri: &'a str,
    /// Its source text.
    pub text: &'a str,
    /// Its parsed tree, if any.
    pub tree: Option<&'a tree_sitter::Tree>,
    /// Its line index.
    pub line_index: &'a ghost_lsp_position::LineIndex,
    /// Its language kind.
    pub language_kind: ghost_syntax::LanguageKind,
}

/// The range of the identifier under `position`, or `None` if the cursor
/// is not on one — the client then refuses to start a rename.
pub fn prepare_rename(ctx: &DocumentContext, position: Position) -> Option<Range> {
    let offset = ctx.offset_of(position)?;
    let node = ctx.node_at_offset(offset)?;
    if !is_identifier_like(node) {
        return None;
    }
    Some(ctx.node_range(node))
}

/// Rename every occurrence of the identifier at `position` (in the first,
/// "current" document) to `new_name`, across all `documents`.
pub fn rename(documents: &[RenameDocument], position: Position, new_name: &str) -> Option<WorkspaceEdit> {
    let current = documents.first()?;
    let current_ctx = DocumentContext {
        uri: current.uri,
        text: current.text,
        tree: current.tree,
        line_index: current.line_index,
        language_kind: current.language_kind,
    };
    let offset = current_ctx.offset_of(position)?;
    let node = current_ctx.node_at_offset(offset)?;
    if !is_identifier_like(node) {
        return None;
    }
    let name = current_ctx.node_text(node).to_string();

    let mut changes: HashMap<Url, Vec<TextEdit>> = HashMap::new();
    for doc in documents {
        let ctx = DocumentContext {
            uri: doc.uri,
            text: doc.text,
            tree: doc.tree,
            line_index: doc.line_index,
            language_kind: doc.language_kind,
        };
        let edits: Vec<TextEdit> = occurrences(&ctx, &name)
            .into_iter()
            .map(|occ| TextEdit { range: ctx.node_range(occ), new_text: new_name.to_string() })
            .collect();
        if !edits.is_empty() {
            if let Ok(url) = Url::parse(doc.uri) {
                changes.insert(url, edits);
            }
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(WorkspaceEdit { changes: Some(changes), document_changes: None, change_annotations: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_lsp_position::LineIndex;
    use ghost_syntax::LanguageKind;

    #[test]
    fn prepare_rename_rejects_non_identifier() {
        let text = "1 + 2;\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        assert!(prepare_rename(&ctx, Position { line: 0, character: 0 }).is_none());
    }

    #[test]
    fn rename_rewrites_every_occurrence() {
        let text = "let x = 1;\nprint(x);\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let docs = vec![RenameDocument {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        }];
        let edit = rename(&docs, Position { line: 0, character: 5 }, "count").expect("edit produced");
        let changes = edit.changes.expect("changes map present");
        assert_eq!(changes.values().next().unwrap().len(), 2);
    }

    #[test]
    fn rename_returns_none_for_unknown_identifier() {
        let text = "print(1);\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let docs = vec![RenameDocument {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        }];
        assert!(rename(&docs, Position { line: 0, character: 7 }, "x").is_none());
    }
}
