//! Document store (spec.md §4.4).
//!
//! Owns every open document's text, version, detected language, parsed
//! tree, and line index. The single-threaded server loop is the only
//! caller, so no internal locking is needed (spec.md §5).

use ghost_lsp_position::LineIndex;
use ghost_syntax::LanguageKind;
use lsp_types::TextDocumentContentChangeEvent;
use rustc_hash::FxHashMap;
use tree_sitter::Tree;

/// One open document and everything derived from its text.
pub struct Document {
    /// The document's URI, as received from the client.
    pub uri: String,
    /// Current full text.
    pub text: String,
    /// LSP document version, as last reported by the client.
    pub version: i32,
    /// Language detected from the URI's suffix.
    pub language_kind: LanguageKind,
    /// Parsed tree, or `None` for language kinds with no grammar
    /// (smart contracts) or a parse failure.
    pub tree: Option<Tree>,
    /// Line/column index kept in lock-step with `text`.
    pub line_index: LineIndex,
}

/// Failures the document store can report to a dispatch handler.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `update`/`close` referenced a URI the store never opened.
    #[error("unknown document: {0}")]
    UnknownUri(String),
}

/// Every currently-open document, keyed by URI.
#[derive(Default)]
pub struct DocumentStore {
    documents: FxHashMap<String, Document>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `uri` with `text` at `version`. A duplicate `didOpen` replaces
    /// the existing document rather than erroring — the caller is expected
    /// to log a warning, matching editors that resend `didOpen` after a
    /// crash recovery.
    pub fn open(&mut self, uri: String, text: String, version: i32) -> bool {
        let already_open = self.documents.contains_key(&uri);
        let language_kind = ghost_syntax::detect(&uri);
        let tree = ghost_syntax::parse_full(language_kind, &text).ok().flatten();
        let line_index = LineIndex::new(text.clone());
        self.documents.insert(uri.clone(), Document { uri, text, version, language_kind, tree, line_index });
        already_open
    }

    /// Apply `changes` in order, reparsing incrementally where possible
    /// (spec.md §4.6), and record the new `version`.
    pub fn update(
        &mut self,
        uri: &str,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Result<(), StoreError> {
        let doc = self.documents.get_mut(uri).ok_or_else(|| StoreError::UnknownUri(uri.to_string()))?;

        for change in changes {
            let edit = ghost_syntax::compute_input_edit(&doc.line_index, &change);
            match edit {
                Some(edit) => {
                    let mut new_text = doc.text.clone();
                    new_text.replace_range(edit.start_byte..edit.old_end_byte, &change.text);
                    let reused = doc.tree.as_ref().and_then(|old_tree| {
                        ghost_syntax::reparse(doc.language_kind, old_tree, edit, &new_text).ok().flatten()
                    });
                    doc.tree = match reused {
                        Some(tree) => Some(tree),
                        None => ghost_syntax::parse_full(doc.language_kind, &new_text).ok().flatten(),
                    };
                    doc.text = new_text;
                }
                None => {
                    doc.text = change.text;
                    doc.tree = ghost_syntax::parse_full(doc.language_kind, &doc.text).ok().flatten();
                }
            }
            doc.line_index = LineIndex::new(doc.text.clone());
        }
        doc.version = version;
        Ok(())
    }

    /// Drop `uri` and release its tree. A second close of the same URI is
    /// a no-op (spec.md I3).
    pub fn close(&mut self, uri: &str) {
        self.documents.remove(uri);
    }

    /// Read-only borrow of an open document.
    pub fn get(&self, uri: &str) -> Option<&Document> {
        self.documents.get(uri)
    }

    /// Every open document, for cross-file operations (rename, cross-file
    /// definition).
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }
}
