//! Stateless analysis providers for the language server (spec.md §4.7).
//!
//! Every provider function here is a pure transform: it borrows a
//! [`DocumentContext`], maybe a request position, and returns an owned LSP
//! payload. None of them hold state across calls — the server crate owns
//! documents and indexes, these just answer questions about them.

#![warn(missing_docs)]

pub mod code_actions;
pub mod completion;
pub mod context;
pub mod contract;
pub mod definition;
pub mod diagnostics;
pub mod document_symbol;
pub mod folding_range;
pub mod gas;
pub mod hover;
pub mod inlay_hints;
pub mod references;
pub mod rename;
pub mod selection_range;
pub mod semantic_tokens;
pub mod signature_help;
pub mod workspace_symbol;

pub use code_actions::code_actions;
pub use completion::completion;
pub use context::DocumentContext;
pub use contract::lint as contract_lints;
pub use definition::{definition, definition_cross_file, SearchableDocument};
pub use diagnostics::collect as diagnostics;
pub use document_symbol::document_symbols;
pub use folding_range::folding_ranges;
pub use gas::estimate as estimate_gas;
pub use hover::hover;
pub use inlay_hints::inlay_hints;
pub use references::{document_highlight, references};
pub use rename::{prepare_rename, rename, RenameDocument};
pub use selection_range::selection_range;
pub use semantic_tokens::{encode_delta, tokens as semantic_tokens};
pub use signature_help::signature_help;
pub use workspace_symbol::WorkspaceSymbolIndex;
