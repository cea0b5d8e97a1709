//! DocumentSymbol (spec.md §4.7.6).

use crate::context::DocumentContext;
use lsp_types::{DocumentSymbol, SymbolKind};
use tree_sitter::Node;

fn symbol_kind(node_kind: &str) -> Option<SymbolKind> {
    match node_kind {
        "function_declaration" | "function_definition" | "method_definition" => Some(SymbolKind::FUNCTION),
        "variable_declarator" => Some(SymbolKind::VARIABLE),
        "lexical_declaration" => Some(SymbolKind::VARIABLE),
        "class_declaration" => Some(SymbolKind::CLASS),
        "struct_item" => Some(SymbolKind::STRUCT),
        "enum_item" => Some(SymbolKind::ENUM),
        "interface_declaration" => Some(SymbolKind::INTERFACE),
        _ => None,
    }
}

/// Build the document symbol outline for the whole tree.
pub fn document_symbols(ctx: &DocumentContext) -> Vec<DocumentSymbol> {
    let Some(tree) = ctx.tree else {
        return Vec::new();
    };
    collect_children(ctx, tree.root_node())
}

fn collect_children(ctx: &DocumentContext, parent: Node) -> Vec<DocumentSymbol> {
    let mut symbols = Vec::new();
    let mut cursor = parent.walk();
    if !cursor.goto_first_child() {
        return symbols;
    }
    loop {
        let node = cursor.node();
        if let Some(symbol) = node_to_symbol(ctx, node) {
            symbols.push(symbol);
        } else {
            symbols.extend(collect_children(ctx, node));
        }
        if !cursor.goto_next_sibling() {
            break;
        }
    }
    symbols
}

fn node_to_symbol(ctx: &DocumentContext, node: Node) -> Option<DocumentSymbol> {
    let kind = symbol_kind(node.kind())?;
    let name_node = node.child_by_field_name("name").or_else(|| {
        // `variable_declarator` inside a `lexical_declaration` carries the name itself.
        node.named_child(0)
    })?;
    let name = ctx.node_text(name_node).to_string();
    let range = ctx.node_range(node);
    let selection_range = ctx.node_range(name_node);
    let children = collect_children(ctx, node);

    #[allow(deprecated)]
    Some(DocumentSymbol {
        name,
        detail: None,
        kind,
        tags: None,
        deprecated: None,
        range,
        selection_range,
        children: if children.is_empty() { None } else { Some(children) },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_lsp_position::LineIndex;
    use ghost_syntax::LanguageKind;

    #[test]
    fn outlines_top_level_function() {
        let text = "function greet(name) {\n  print(name);\n}\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        let symbols = document_symbols(&ctx);
        assert!(symbols.iter().any(|s| s.name == "greet" && s.kind == SymbolKind::FUNCTION));
    }
}
