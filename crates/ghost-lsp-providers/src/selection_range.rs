//! SelectionRange (spec.md §4.7.15).
//!
//! Builds a chain of increasingly inclusive ranges from the narrowest
//! meaningful node up to the file root. Unlike the teacher's hand-rolled
//! parent map over a bespoke AST, `tree_sitter::Node::parent()` already
//! gives a direct walk up the tree, so no auxiliary structure is needed.

use crate::context::DocumentContext;
use lsp_types::{Position, SelectionRange};

/// Kinds considered "utility" wrapping nodes with no independent meaning,
/// filtered out of the selection chain.
const SKIPPED_KINDS: &[&str] = &["program", "parenthesized_expression"];

/// Build the selection range chain for `position`.
pub fn selection_range(ctx: &DocumentContext, position: Position) -> Option<SelectionRange> {
    let offset = ctx.offset_of(position)?;
    let leaf = ctx.node_at_offset(offset)?;

    let mut chain = Vec::new();
    let mut current = Some(leaf);
    while let Some(node) = current {
        if !SKIPPED_KINDS.contains(&node.kind()) {
            chain.push(ctx.node_range(node));
        }
        current = node.parent();
    }

    chain.dedup();
    let mut result: Option<SelectionRange> = None;
    for range in chain.into_iter().rev() {
        result = Some(SelectionRange { range, parent: result.map(Box::new) });
    }
    result
}
