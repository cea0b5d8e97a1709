//! JSON-RPC protocol types, error handling, and capability assembly for ghost-lsp.
//!
//! This crate isolates the wire-protocol layer from the LSP runtime so it can
//! be shared between the server binary and the provider crates. The standard
//! LSP records themselves (`Position`, `Range`, `Diagnostic`, ...) are not
//! redefined here — they come straight from [`lsp_types`].

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod capabilities;
mod errors;
mod jsonrpc;
pub mod methods;

pub use errors::*;
pub use jsonrpc::*;

// Re-export so downstream crates can depend on ghost-lsp-protocol alone for
// the standard LSP entity types (Position, Range, Diagnostic, ...).
pub use lsp_types;
