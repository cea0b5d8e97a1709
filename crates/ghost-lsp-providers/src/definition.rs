//! Go-to-definition (spec.md §4.7.4).

use crate::context::{is_identifier_like, walk, DocumentContext};
use lsp_types::{Location, Position, Range, Url};

/// Kinds that can declare a name (function/variable/class/struct, across
/// the grammars this workspace binds).
pub(crate) const DECLARATION_KINDS: &[&str] = &[
    "function_declaration",
    "function_definition",
    "variable_declarator",
    "lexical_declaration",
    "class_declaration",
    "struct_item",
];

/// Find the declaration of the identifier under `position` within a single document.
pub fn definition(ctx: &DocumentContext, position: Position) -> Option<Range> {
    let offset = ctx.offset_of(position)?;
    let node = ctx.node_at_offset(offset)?;
    if !is_identifier_like(node) {
        return None;
    }
    let name = ctx.node_text(node);
    find_declaration_range(ctx, name)
}

fn find_declaration_range(ctx: &DocumentContext, name: &str) -> Option<Range> {
    let tree = ctx.tree?;
    let mut found = None;
    walk(tree.root_node(), |node| {
        if found.is_some() || !DECLARATION_KINDS.contains(&node.kind()) {
            return;
        }
        let decl_name = node
            .child_by_field_name("name")
            .or_else(|| node.named_child(0))
            .map(|n| ctx.node_text(n));
        if decl_name == Some(name) {
            found = Some(ctx.node_range(node));
        }
    });
    found
}

/// One document searched by [`definition_cross_file`].
pub struct SearchableDocument<'a> {
    /// The document's URI.
    pub uri: &'a str,
    /// Its parsed tree, if any.
    pub tree: Option<&'a tree_sitter::Tree>,
    /// Its source text.
    pub text: &'a str,
    /// Its line index.
    pub line_index: &'a ghost_lsp_position::LineIndex,
    /// Its language kind.
    pub language_kind: ghost_syntax::LanguageKind,
}

/// Search every document in `documents` for a declaration of the identifier
/// at `position` in the first (current) document, current-file-first.
pub fn definition_cross_file(documents: &[SearchableDocument], position: Position) -> Option<Location> {
    let current = documents.first()?;
    let ctx = DocumentContext {
        uri: current.uri,
        text: current.text,
        tree: current.tree,
        line_index: current.line_index,
        language_kind: current.language_kind,
    };
    let offset = ctx.offset_of(position)?;
    let node = ctx.node_at_offset(offset)?;
    if !is_identifier_like(node) {
        return None;
    }
    let name = ctx.node_text(node).to_string();

    for doc in documents {
        let ctx = DocumentContext {
            uri: doc.uri,
            text: doc.text,
            tree: doc.tree,
            line_index: doc.line_index,
            language_kind: doc.language_kind,
        };
        if let Some(range) = find_declaration_range(&ctx, &name) {
            let uri = Url::parse(doc.uri).ok()?;
            return Some(Location { uri, range });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_lsp_position::LineIndex;
    use ghost_syntax::LanguageKind;

    #[test]
    fn finds_variable_declaration_in_same_file() {
        let text = "let counter = 0;\ncounter;\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        let range = definition(&ctx, Position { line: 1, character: 1 }).expect("definition found");
        assert_eq!(range.start.line, 0);
    }

    #[test]
    fn no_definition_for_unknown_identifier() {
        let text = "missing;\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        assert!(definition(&ctx, Position { line: 0, character: 1 }).is_none());
    }
}
