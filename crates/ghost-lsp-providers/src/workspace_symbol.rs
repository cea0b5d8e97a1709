//! WorkspaceSymbol (spec.md §4.7.7).
//!
//! Maintains a `Uri -> Vec<SymbolInformation>` index, re-built per document
//! on `didOpen`/`didChange`, and answered by a case-insensitive subsequence
//! match over symbol names.

use crate::document_symbol::document_symbols;
use crate::context::DocumentContext;
use lsp_types::{DocumentSymbol, SymbolInformation, Url};
use rustc_hash::FxHashMap;

/// Flattened, queryable index of every document's symbols.
#[derive(Default)]
pub struct WorkspaceSymbolIndex {
    by_uri: FxHashMap<String, Vec<SymbolInformation>>,
}

impl WorkspaceSymbolIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-index `uri`'s symbols, replacing whatever was indexed before.
    pub fn reindex(&mut self, ctx: &DocumentContext) {
        let Ok(url) = Url::parse(ctx.uri) else {
            return;
        };
        let mut flat = Vec::new();
        flatten(document_symbols(ctx), &url, None, &mut flat);
        self.by_uri.insert(ctx.uri.to_string(), flat);
    }

    /// Drop `uri` from the index (mirrors `didClose`).
    pub fn remove(&mut self, uri: &str) {
        self.by_uri.remove(uri);
    }

    /// Every symbol whose name matches `query` as a case-insensitive
    /// subsequence. An empty query matches everything.
    pub fn query(&self, query: &str) -> Vec<SymbolInformation> {
        let query = query.to_lowercase();
        self.by_uri
            .values()
            .flatten()
            .filter(|symbol| is_subsequence(&query, &symbol.name.to_lowercase()))
            .cloned()
            .collect()
    }
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut chars = haystack.chars();
    needle.chars().all(|c| chars.any(|h| h == c))
}

#[allow(deprecated)]
fn flatten(symbols: Vec<DocumentSymbol>, uri: &Url, container: Option<&str>, out: &mut Vec<SymbolInformation>) {
    for symbol in symbols {
        out.push(SymbolInformation {
            name: symbol.name.clone(),
            kind: symbol.kind,
            tags: None,
            deprecated: None,
            location: lsp_types::Location { uri: uri.clone(), range: symbol.range },
            container_name: container.map(str::to_string),
        });
        if let Some(children) = symbol.children {
            flatten(children, uri, Some(&symbol.name), out);
        }
    }
}
