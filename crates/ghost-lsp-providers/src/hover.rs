//! Hover (spec.md §4.7.2).

use crate::context::DocumentContext;
use crate::gas;
use ghost_ffi::{builtins::builtin_signatures, catalog};
use lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};

/// Render a hover for the identifier at `position`, if any.
pub fn hover(ctx: &DocumentContext, position: Position) -> Option<Hover> {
    match ctx.tree {
        Some(_) => hover_with_tree(ctx, position),
        None => hover_without_tree(ctx, position),
    }
}

fn hover_with_tree(ctx: &DocumentContext, position: Position) -> Option<Hover> {
    let offset = ctx.offset_of(position)?;
    let node = ctx.node_at_offset(offset)?;
    if !crate::context::is_identifier_like(node) {
        return generic_hover(ctx, node);
    }
    let name = ctx.node_text(node);

    if let Some(parent) = node.parent() {
        if parent.kind() == "member_expression" || parent.kind() == "subscript" {
            if let Some(object) = parent.child_by_field_name("object") {
                let namespace = ctx.node_text(object);
                let is_selector = parent
                    .child_by_field_name("property")
                    .map(|p| p == node)
                    .unwrap_or(false);
                if is_selector {
                    if let Some(function) = catalog().get_function(namespace, name) {
                        return Some(markdown_hover(ctx.node_range(node), ffi_function_markdown(namespace, function)));
                    }
                    if let Some(global) = catalog().get_global(namespace, name) {
                        return Some(markdown_hover(ctx.node_range(node), ffi_global_markdown(namespace, global)));
                    }
                }
            }
        }
    }

    if let Some(entry) = builtin_signatures().get(name) {
        let mut md = String::new();
        for sig in &entry.signatures {
            md.push_str(&format!("```\n{sig}\n```\n"));
        }
        md.push_str(entry.documentation);
        return Some(markdown_hover(ctx.node_range(node), md));
    }

    generic_hover(ctx, node)
}

fn generic_hover(ctx: &DocumentContext, node: tree_sitter::Node) -> Option<Hover> {
    let mut md = format!("```\n{}\n```\n\n`{}`", ctx.node_text(node), node.kind());
    if ctx.language_kind == ghost_syntax::LanguageKind::SmartContract
        && (node.kind() == "function_declaration" || node.kind() == "function_definition")
    {
        let body = ctx.node_text(node);
        md.push_str(&format!("\n\nestimated gas: {}", gas::estimate(body)));
    }
    Some(markdown_hover(ctx.node_range(node), md))
}

fn hover_without_tree(ctx: &DocumentContext, position: Position) -> Option<Hover> {
    let offset = ctx.offset_of(position)?;
    let (word, start, end) = word_at(ctx.text, offset)?;
    let range = crate::context::byte_range_to_lsp(ctx.line_index, start, end);

    let is_function = ctx.text[..start].trim_end().ends_with("function");
    if is_function {
        let gas_cost = gas::estimate(ctx.text);
        return Some(markdown_hover(range, format!("```\nfunction {word}\n```\n\nestimated gas: {gas_cost}")));
    }

    if let Some(entry) = builtin_signatures().get(word) {
        return Some(markdown_hover(range, entry.documentation.to_string()));
    }

    Some(markdown_hover(range, format!("`{word}`")))
}

/// Extract the maximal run of identifier characters containing `offset`.
fn word_at(text: &str, offset: usize) -> Option<(&str, usize, usize)> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    if offset > text.len() {
        return None;
    }
    let prev_is_word = text[..offset].chars().next_back().map(is_word).unwrap_or(false);
    let next_is_word = text[offset..].chars().next().map(is_word).unwrap_or(false);
    if !prev_is_word && !next_is_word {
        return None;
    }
    let start = text[..offset].char_indices().rev().find(|&(_, c)| !is_word(c)).map(|(i, c)| i + c.len_utf8()).unwrap_or(0);
    let end = text[offset..].char_indices().find(|&(_, c)| !is_word(c)).map(|(i, _)| offset + i).unwrap_or(text.len());
    if start == end {
        return None;
    }
    Some((&text[start..end], start, end))
}

fn markdown_hover(range: lsp_types::Range, value: String) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent { kind: MarkupKind::Markdown, value }),
        range: Some(range),
    }
}

fn ffi_function_markdown(namespace: &str, function: &ghost_ffi::FfiFunction) -> String {
    let mut md = format!("```\n{}.{}\n```\n\n{}\n", namespace, function.signature, function.description);
    if !function.parameters.is_empty() {
        md.push_str("\n**Parameters**\n");
        for p in &function.parameters {
            md.push_str(&format!("- `{}`: {} — {}\n", p.name, p.ty, p.description));
        }
    }
    md.push_str(&format!("\n**Returns** `{}`", function.returns.ty));
    if let Some(example) = function.examples.first() {
        md.push_str(&format!("\n\n```\n{example}\n```"));
    }
    md
}

fn ffi_global_markdown(namespace: &str, global: &ghost_ffi::FfiGlobal) -> String {
    format!(
        "```\n{}.{}: {}\n```\n\n{}{}",
        namespace,
        global.name,
        global.ty,
        global.description,
        if global.readonly { " (read-only)" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_lsp_position::LineIndex;
    use ghost_syntax::LanguageKind;

    #[test]
    fn hovers_builtin_array_push() {
        let text = "arrayPush(xs, 1);\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        let result = hover(&ctx, Position { line: 0, character: 2 }).expect("hover available");
        let HoverContents::Markup(markup) = result.contents else { panic!("markdown hover") };
        assert!(markup.value.contains("arrayPush(array"));
        assert!(markup.value.contains("array"));
    }

    #[test]
    fn hovers_ffi_namespace_member() {
        let text = "shell.exec(\"ls\");\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        let result = hover(&ctx, Position { line: 0, character: 7 }).expect("hover available");
        let HoverContents::Markup(markup) = result.contents else { panic!("markdown hover") };
        assert!(markup.value.contains("shell."));
    }

    #[test]
    fn smart_contract_function_hover_reports_gas() {
        let text = "function pay() { transfer(to, amount); }".to_string();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghc",
            text: &text,
            tree: None,
            line_index: &line_index,
            language_kind: LanguageKind::SmartContract,
        };
        let result = hover(&ctx, Position { line: 0, character: 10 }).expect("hover available");
        let HoverContents::Markup(markup) = result.contents else { panic!("markdown hover") };
        assert!(markup.value.contains("estimated gas"));
    }
}
