//! Grammar registry: binds a [`tree_sitter::Language`] to each [`LanguageKind`]
//! (spec.md §1 "concrete grammar binding").
//!
//! Ghost has no publicly published tree-sitter grammar of its own, so
//! `primary`/`primary_bundle` load `tree-sitter-javascript` (closest
//! available stand-in for a dynamically typed, C-family scripting
//! language) and `shell_script`/`shell_config` load `tree-sitter-bash`.
//! `smart_contract` has no grammar: no tree is ever built for it, and its
//! providers work from source text and FFI lookups only.

use crate::language::LanguageKind;
use std::sync::OnceLock;
use tree_sitter::Language;

static JAVASCRIPT: OnceLock<Language> = OnceLock::new();
static BASH: OnceLock<Language> = OnceLock::new();

fn javascript() -> Language {
    JAVASCRIPT.get_or_init(|| tree_sitter_javascript::LANGUAGE.into()).clone()
}

fn bash() -> Language {
    BASH.get_or_init(|| tree_sitter_bash::LANGUAGE.into()).clone()
}

/// Look up the grammar for `kind`, or `None` when the language has no tree
/// representation (currently only [`LanguageKind::SmartContract`]).
pub fn grammar_for(kind: LanguageKind) -> Option<Language> {
    match kind {
        LanguageKind::Primary | LanguageKind::PrimaryBundle => Some(javascript()),
        LanguageKind::ShellScript | LanguageKind::ShellConfig => Some(bash()),
        LanguageKind::SmartContract => None,
    }
}
