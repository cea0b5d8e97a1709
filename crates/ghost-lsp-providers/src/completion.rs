//! Completion (spec.md §4.7.3). Trigger characters: `.` and `:`.

use crate::context::{is_identifier_like, walk, DocumentContext};
use ghost_ffi::{builtins::builtin_signatures, catalog};
use lsp_types::{CompletionItem, CompletionItemKind, Position};

/// Generic keywords offered in general completion, independent of language kind.
const KEYWORDS: &[&str] = &[
    "let", "const", "function", "if", "else", "while", "for", "return", "true", "false", "null",
    "class", "struct", "enum", "interface", "import", "export", "break", "continue",
];

/// Compute completion items for the cursor at `position`.
pub fn completion(ctx: &DocumentContext, position: Position) -> Vec<CompletionItem> {
    let Some(offset) = ctx.offset_of(position) else {
        return Vec::new();
    };

    if let Some(namespace) = namespace_before_separator(ctx.text, offset) {
        return namespace_members(namespace);
    }

    let mut items: Vec<CompletionItem> = KEYWORDS
        .iter()
        .map(|kw| CompletionItem {
            label: kw.to_string(),
            kind: Some(CompletionItemKind::KEYWORD),
            ..Default::default()
        })
        .collect();

    let mut builtins: Vec<_> = builtin_signatures().iter().collect();
    builtins.sort_by_key(|(name, _)| *name);
    for (name, sig) in builtins {
        items.push(CompletionItem {
            label: name.to_string(),
            kind: Some(CompletionItemKind::FUNCTION),
            detail: sig.signatures.first().map(|s| s.to_string()),
            documentation: Some(lsp_types::Documentation::String(sig.documentation.to_string())),
            ..Default::default()
        });
    }

    if ghost_ffi::FfiStore::is_shell_file(extension_of(ctx.uri)) {
        let names: Vec<&str> = catalog().namespace_names().collect();
        for namespace in names {
            for global in catalog().globals(namespace) {
                items.push(CompletionItem {
                    label: global.name.clone(),
                    kind: Some(CompletionItemKind::VARIABLE),
                    detail: Some(global.ty.clone()),
                    documentation: Some(lsp_types::Documentation::String(global.description.clone())),
                    ..Default::default()
                });
            }
        }
    }

    items.extend(local_identifiers(ctx));
    items
}

fn namespace_members(namespace: &str) -> Vec<CompletionItem> {
    let mut items = Vec::new();
    for function in catalog().functions(namespace) {
        items.push(CompletionItem {
            label: function.name.clone(),
            kind: Some(CompletionItemKind::METHOD),
            detail: Some(function.signature.clone()),
            documentation: Some(lsp_types::Documentation::String(function.description.clone())),
            ..Default::default()
        });
    }
    if let Some(ns) = namespace_globals(namespace) {
        items.extend(ns);
    }
    items
}

fn namespace_globals(namespace: &str) -> Option<Vec<CompletionItem>> {
    let items: Vec<CompletionItem> = catalog()
        .globals(namespace)
        .map(|g| CompletionItem {
            label: g.name.clone(),
            kind: Some(CompletionItemKind::VARIABLE),
            detail: Some(g.ty.clone()),
            documentation: Some(lsp_types::Documentation::String(g.description.clone())),
            ..Default::default()
        })
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn extension_of(uri: &str) -> &str {
    uri.rsplit('.').next().unwrap_or("")
}

/// Collect identifiers bound in the enclosing function bodies by walking
/// the whole tree and gathering declared names (spec.md: "in-scope local
/// identifiers collected by walking up the enclosing function bodies").
fn local_identifiers(ctx: &DocumentContext) -> Vec<CompletionItem> {
    let Some(tree) = ctx.tree else {
        return Vec::new();
    };
    let mut names = std::collections::BTreeSet::new();
    walk(tree.root_node(), |node| {
        if matches!(node.kind(), "variable_declarator" | "function_declaration" | "function_definition") {
            if let Some(name_node) = node.child_by_field_name("name") {
                if is_identifier_like(name_node) {
                    names.insert(ctx.node_text(name_node).to_string());
                }
            }
        }
    });
    names
        .into_iter()
        .map(|name| CompletionItem {
            label: name,
            kind: Some(CompletionItemKind::VARIABLE),
            ..Default::default()
        })
        .collect()
}

/// If the cursor at `offset` directly follows `<identifier>.`/`<identifier>:`
/// (optionally with a partial identifier already typed), return that
/// identifier as the candidate FFI namespace.
fn namespace_before_separator(text: &str, offset: usize) -> Option<&str> {
    let prefix = &text[..offset.min(text.len())];
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let trimmed = prefix.trim_end_matches(is_word);
    let separator = trimmed.chars().next_back()?;
    if separator != '.' && separator != ':' {
        return None;
    }
    let before_separator = &trimmed[..trimmed.len() - separator.len_utf8()];
    let ident_start = before_separator
        .char_indices()
        .rev()
        .find(|&(_, c)| !is_word(c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let namespace = &before_separator[ident_start..];
    if namespace.is_empty() {
        None
    } else {
        Some(namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_namespace_before_dot() {
        assert_eq!(namespace_before_separator("shell.", 6), Some("shell"));
    }

    #[test]
    fn detects_namespace_with_partial_identifier() {
        assert_eq!(namespace_before_separator("shell.e", 7), Some("shell"));
    }

    #[test]
    fn no_namespace_without_separator() {
        assert_eq!(namespace_before_separator("shell", 5), None);
    }

    #[test]
    fn namespace_completion_lists_known_functions() {
        let items = namespace_members("shell");
        assert!(items.iter().any(|i| i.label == "exec"));
    }

    #[test]
    fn general_completion_includes_keywords_and_builtins() {
        let text = "let x = 1;\n".to_string();
        let tree = ghost_syntax::parse_full(ghost_syntax::LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = ghost_lsp_position::LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: ghost_syntax::LanguageKind::Primary,
        };
        let items = completion(&ctx, Position { line: 0, character: 0 });
        assert!(items.iter().any(|i| i.label == "let"));
        assert!(items.iter().any(|i| i.label == "arrayPush"));
    }
}
