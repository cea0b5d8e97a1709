//! Workspace scanner (spec.md §4.5).
//!
//! On `initialize.rootUri`, recursively enumerates files whose extensions
//! match the recognized set, skipping build-artifact and VCS directories.
//! A `didOpen` for a file outside the scanned set inserts a new entry
//! marked open (handled by the dispatch layer, not here).

use ghost_syntax::LanguageKind;
use std::path::Path;
use walkdir::WalkDir;

/// Directory names skipped outright during the scan, in addition to any
/// hidden (dot-prefixed) directory.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "ghost-cache", "ghost-out"];

/// One file discovered under the workspace root.
#[derive(Debug, Clone)]
pub struct WorkspaceFile {
    /// `file://` URI of the discovered file.
    pub uri: String,
    /// Filesystem path backing `uri`.
    pub path: std::path::PathBuf,
    /// Language detected from the file's extension.
    pub language_kind: LanguageKind,
    /// Whether the client has an open buffer for this file (`didOpen`
    /// always marks discovered-by-scan files `false` initially).
    pub open: bool,
}

/// Recursively enumerate recognized source files under `root`.
///
/// Directory-read errors are logged by the caller and skipped here —
/// `walkdir` already surfaces them as `Err` entries in the iterator rather
/// than aborting the whole walk.
pub fn scan(root: &Path) -> Vec<WorkspaceFile> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_dir() {
            !SKIPPED_DIRS.contains(&name.as_ref()) && !(name.starts_with('.') && name != ".")
        } else {
            true
        }
    });

    for entry in walker.flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(uri) = ghost_lsp_uri::fs_path_to_uri(path).ok() else {
            continue;
        };
        let language_kind = ghost_syntax::detect(&uri);
        if !is_recognized_extension(path) {
            continue;
        }
        files.push(WorkspaceFile { uri, path: path.to_path_buf(), language_kind, open: false });
    }

    files
}

fn is_recognized_extension(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    const RECOGNIZED_SUFFIXES: &[&str] = &[".ghost", ".gza", ".gsh", ".gshrc", ".gshrc.gza", ".ghc"];
    RECOGNIZED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}
