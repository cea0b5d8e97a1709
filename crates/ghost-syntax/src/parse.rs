//! Full and incremental parsing, driven by the [`Grammar`](crate::grammar)
//! registry (spec.md §4.6 "After applying all edits, call
//! `parse(old_tree_with_edit_applied, new_text)`").

use crate::grammar::grammar_for;
use crate::language::LanguageKind;
use tree_sitter::{InputEdit, Parser, Tree};

/// Failures loading a grammar or driving the tree-sitter parser.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The grammar could not be installed into a fresh [`Parser`].
    #[error("failed to load tree-sitter grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// The parser returned no tree (cancelled via a parser timeout/callback).
    #[error("tree-sitter parse did not complete")]
    ParseFailed,
}

/// Parse `text` from scratch for `kind`. Returns `Ok(None)` for language
/// kinds with no grammar (currently only [`LanguageKind::SmartContract`]).
pub fn parse_full(kind: LanguageKind, text: &str) -> Result<Option<Tree>, Error> {
    let Some(language) = grammar_for(kind) else {
        return Ok(None);
    };
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser.parse(text, None).ok_or(Error::ParseFailed)?;
    Ok(Some(tree))
}

/// Reparse `new_text` incrementally, reusing `old_tree` after applying `edit`.
///
/// `old_tree` should reflect the document's state before `edit`; this
/// function clones it, applies the edit in place, and feeds it to the
/// parser as the reuse baseline.
pub fn reparse(
    kind: LanguageKind,
    old_tree: &Tree,
    edit: InputEdit,
    new_text: &str,
) -> Result<Option<Tree>, Error> {
    let Some(language) = grammar_for(kind) else {
        return Ok(None);
    };
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let mut edited = old_tree.clone();
    edited.edit(&edit);
    let tree = parser.parse(new_text, Some(&edited)).ok_or(Error::ParseFailed)?;
    Ok(Some(tree))
}
