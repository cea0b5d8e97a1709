//! Smart-contract semantic analyzer (spec.md §1, §4.7.1).
//!
//! Smart-contract documents carry no syntax tree (spec.md §4.4), so their
//! diagnostics come entirely from this opaque collaborator instead of a
//! tree walk. `SemanticAnalyzer` is a trait so the lint passes can be
//! swapped independently of the document store; [`LintAnalyzer`] is the
//! one implementation, delegating to `ghost_lsp_providers::contract`.

use lsp_types::Diagnostic;

/// Analyzes smart-contract source text and produces diagnostics.
pub trait SemanticAnalyzer {
    /// Run every lint pass over `text`, producing zero or more diagnostics.
    fn analyze(&self, text: &str, line_index: &ghost_lsp_position::LineIndex) -> Vec<Diagnostic>;
}

/// The lint-pass analyzer described in spec.md §4.7.1: reentrancy risk,
/// redundant storage reads, missing access control, unchecked arithmetic,
/// timestamp dependence.
pub struct LintAnalyzer;

impl SemanticAnalyzer for LintAnalyzer {
    fn analyze(&self, text: &str, line_index: &ghost_lsp_position::LineIndex) -> Vec<Diagnostic> {
        ghost_lsp_providers::contract::lint(text, line_index)
    }
}
