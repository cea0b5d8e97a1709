//! Shared borrow-only view of a document, passed to every provider
//! (spec.md §4.7: "All providers take `(tree, source_text, …)`, never
//! mutate, and return owned result payloads").

use ghost_lsp_position::LineIndex;
use ghost_syntax::LanguageKind;
use tree_sitter::{Node, Tree};

/// Everything a provider needs to answer one request. Borrowed for the
/// duration of a single call; never held across a handler boundary.
pub struct DocumentContext<'a> {
    /// The document's URI, as received from the client.
    pub uri: &'a str,
    /// The document's current full text.
    pub text: &'a str,
    /// The parsed syntax tree, or `None` for language kinds with no
    /// grammar (smart contracts).
    pub tree: Option<&'a Tree>,
    /// Line/column conversions for `text`.
    pub line_index: &'a LineIndex,
    /// The document's detected language.
    pub language_kind: LanguageKind,
}

impl<'a> DocumentContext<'a> {
    /// The smallest named or unnamed node spanning byte offset `offset`.
    pub fn node_at_offset(&self, offset: usize) -> Option<Node<'a>> {
        let tree = self.tree?;
        Some(tree.root_node().descendant_for_byte_range(offset, offset)?)
    }

    /// Convert an LSP `Position` to a byte offset into `self.text`.
    pub fn offset_of(&self, position: lsp_types::Position) -> Option<usize> {
        self.line_index.position_to_offset(position.line, position.character)
    }

    /// Convert a tree-sitter node's point range to an LSP `Range`.
    pub fn node_range(&self, node: Node) -> lsp_types::Range {
        byte_range_to_lsp(self.line_index, node.start_byte(), node.end_byte())
    }

    /// Slice of `self.text` spanned by `node`.
    pub fn node_text(&self, node: Node) -> &'a str {
        &self.text[node.start_byte()..node.end_byte()]
    }
}

/// Convert a `[start_byte, end_byte)` span to an LSP `Range` via `line_index`.
pub fn byte_range_to_lsp(line_index: &LineIndex, start: usize, end: usize) -> lsp_types::Range {
    let (sl, sc) = line_index.offset_to_position(start);
    let (el, ec) = line_index.offset_to_position(end);
    lsp_types::Range {
        start: lsp_types::Position { line: sl, character: sc },
        end: lsp_types::Position { line: el, character: ec },
    }
}

/// Convert our stable severity enum to the LSP wire severity.
pub fn to_lsp_severity(severity: ghost_diagnostics_codes::DiagnosticSeverity) -> lsp_types::DiagnosticSeverity {
    match severity {
        ghost_diagnostics_codes::DiagnosticSeverity::Error => lsp_types::DiagnosticSeverity::ERROR,
        ghost_diagnostics_codes::DiagnosticSeverity::Warning => lsp_types::DiagnosticSeverity::WARNING,
        ghost_diagnostics_codes::DiagnosticSeverity::Information => lsp_types::DiagnosticSeverity::INFORMATION,
        ghost_diagnostics_codes::DiagnosticSeverity::Hint => lsp_types::DiagnosticSeverity::HINT,
    }
}

/// Whether `node` is an identifier-shaped leaf, across the grammars this
/// workspace binds (`identifier` in the primary/JS-like grammar, `word` and
/// `variable_name` in the shell grammar).
pub fn is_identifier_like(node: Node) -> bool {
    matches!(node.kind(), "identifier" | "property_identifier" | "shorthand_property_identifier" | "word" | "variable_name")
}

/// Walk every descendant of `root`, calling `visit` for each node
/// (pre-order, depth-first). A small, allocation-free substitute for the
/// teacher's hand-rolled `get_node_children` AST walker, built directly on
/// `tree_sitter::TreeCursor`.
pub fn walk<'a>(root: Node<'a>, mut visit: impl FnMut(Node<'a>)) {
    let mut cursor = root.walk();
    loop {
        visit(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}
