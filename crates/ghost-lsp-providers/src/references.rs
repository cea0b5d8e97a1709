//! Find-references (spec.md §4.7.5) and document-highlight (§4.7.9), which
//! share the same identifier-collection pass.

use crate::context::{is_identifier_like, walk, DocumentContext};
use crate::definition::DECLARATION_KINDS;
use lsp_types::{Location, Position, Range, Url};

/// Kinds whose presence marks an identifier occurrence as a write rather
/// than a read (spec.md §4.7.9).
const WRITE_PARENT_KINDS: &[&str] = &[
    "assignment_expression",
    "variable_declarator",
    "lexical_declaration",
    "augmented_assignment_expression",
    "update_expression",
];

/// Whether `node`'s occurrence is itself a declaration (as opposed to a
/// later read or write of an already-declared name).
fn is_declaration_occurrence(node: tree_sitter::Node) -> bool {
    node.parent().map(|p| DECLARATION_KINDS.contains(&p.kind())).unwrap_or(false)
}

/// Every occurrence of `name` as an identifier-kind node in the tree.
pub fn occurrences<'a>(ctx: &DocumentContext<'a>, name: &str) -> Vec<tree_sitter::Node<'a>> {
    let Some(tree) = ctx.tree else {
        return Vec::new();
    };
    let mut hits = Vec::new();
    walk(tree.root_node(), |node| {
        if is_identifier_like(node) && ctx.node_text(node) == name {
            hits.push(node);
        }
    });
    hits
}

/// Whether `node`'s occurrence should be classified as a write.
pub fn is_write_occurrence(node: tree_sitter::Node) -> bool {
    node.parent().map(|p| WRITE_PARENT_KINDS.contains(&p.kind())).unwrap_or(false)
}

/// References to the identifier at `position`. Declarations are included
/// unless `include_declaration` is false, in which case only the
/// declaration occurrence itself is dropped; later reads and writes of the
/// same name still come back (the closest approximation available without
/// scope resolution, per spec.md's "purely textual" design note).
pub fn references(ctx: &DocumentContext, position: Position, include_declaration: bool) -> Vec<Location> {
    let Some(offset) = ctx.offset_of(position) else {
        return Vec::new();
    };
    let Some(node) = ctx.node_at_offset(offset) else {
        return Vec::new();
    };
    if !is_identifier_like(node) {
        return Vec::new();
    }
    let name = ctx.node_text(node).to_string();

    let Ok(uri) = Url::parse(ctx.uri) else {
        return Vec::new();
    };

    occurrences(ctx, &name)
        .into_iter()
        .filter(|occ| include_declaration || !is_declaration_occurrence(*occ))
        .map(|occ| Location { uri: uri.clone(), range: ctx.node_range(occ) })
        .collect()
}

/// Same identifier collection as [`references`], but returned as
/// `(Range, is_write)` pairs for `textDocument/documentHighlight`.
pub fn document_highlight(ctx: &DocumentContext, position: Position) -> Vec<(Range, bool)> {
    let Some(offset) = ctx.offset_of(position) else {
        return Vec::new();
    };
    let Some(node) = ctx.node_at_offset(offset) else {
        return Vec::new();
    };
    if !is_identifier_like(node) {
        return Vec::new();
    }
    let name = ctx.node_text(node).to_string();

    occurrences(ctx, &name)
        .into_iter()
        .map(|occ| (ctx.node_range(occ), is_write_occurrence(occ)))
        .collect()
}
