//! Language detection by file suffix (spec.md §4.4, §6).
//!
//! The suffix table is ordered longest-match-first so that `.gshrc.gza`
//! (shell config bundled as an archive) is not mistaken for a plain `.gza`
//! primary bundle.

/// The language a document is parsed and analyzed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageKind {
    /// `.ghost` — the primary scripting language.
    Primary,
    /// `.gza` — a Ghost Archive bundle.
    PrimaryBundle,
    /// `.gsh` — a gsh shell script.
    ShellScript,
    /// `.gshrc` or `.gshrc.gza` — a gsh shell configuration file.
    ShellConfig,
    /// `.ghc` — a ghostract smart contract.
    SmartContract,
}

/// Suffixes checked longest-first; the first match wins.
const SUFFIX_TABLE: &[(&str, LanguageKind)] = &[
    (".gshrc.gza", LanguageKind::ShellConfig),
    (".gshrc", LanguageKind::ShellConfig),
    (".gsh", LanguageKind::ShellScript),
    (".gza", LanguageKind::PrimaryBundle),
    (".ghc", LanguageKind::SmartContract),
    (".ghost", LanguageKind::Primary),
];

/// Detect the [`LanguageKind`] of a document from its URI or path.
///
/// An unrecognized suffix defaults to [`LanguageKind::Primary`] (spec.md
/// §4.4: "Unknown file suffix: default to primary language").
pub fn detect(uri_or_path: &str) -> LanguageKind {
    SUFFIX_TABLE
        .iter()
        .find(|(suffix, _)| uri_or_path.ends_with(suffix))
        .map(|(_, kind)| *kind)
        .unwrap_or(LanguageKind::Primary)
}
