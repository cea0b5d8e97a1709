//! Language detection, grammar binding, and the incremental parse adapter
//! (spec.md components C4's `language_kind` derivation and C6).
//!
//! This crate owns everything the rest of `ghost-lsp` needs to go from a
//! document URI and a stream of content changes to an up-to-date
//! `tree_sitter::Tree`: suffix-based [`LanguageKind`] detection, the
//! [`grammar`] registry binding a concrete tree-sitter grammar to each
//! kind, the [`edit`] adapter converting LSP changes into `InputEdit`s, and
//! [`parse`] to drive the parser itself.

#![warn(missing_docs)]

pub mod edit;
pub mod grammar;
pub mod language;
pub mod parse;

pub use edit::compute_input_edit;
pub use grammar::grammar_for;
pub use language::{detect, LanguageKind};
pub use parse::{parse_full, reparse, Error};
