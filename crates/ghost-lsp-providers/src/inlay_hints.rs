//! InlayHints (spec.md §4.7.14).

use crate::context::{walk, DocumentContext};
use lsp_types::{InlayHint, InlayHintKind, InlayHintLabel, Position, Range};

fn inferred_type(value_kind: &str) -> Option<&'static str> {
    match value_kind {
        "number" => Some("number"),
        "string" => Some("string"),
        "true" | "false" => Some("boolean"),
        "array" => Some("array"),
        "object" => Some("object"),
        "null" => Some("null"),
        _ => None,
    }
}

/// Type hints for variable declarations whose range intersects `range`.
pub fn inlay_hints(ctx: &DocumentContext, range: Range) -> Vec<InlayHint> {
    let Some(tree) = ctx.tree else {
        return Vec::new();
    };
    let mut hints = Vec::new();

    walk(tree.root_node(), |node| {
        if node.kind() != "variable_declarator" {
            return;
        }
        let node_range = ctx.node_range(node);
        if node_range.start.line > range.end.line || node_range.end.line < range.start.line {
            return;
        }
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let Some(value_node) = node.child_by_field_name("value") else {
            return;
        };
        let Some(ty) = inferred_type(value_node.kind()) else {
            return;
        };

        let name_range = ctx.node_range(name_node);
        hints.push(InlayHint {
            position: name_range.end,
            label: InlayHintLabel::String(format!(": {ty}")),
            kind: Some(InlayHintKind::TYPE),
            text_edits: None,
            tooltip: None,
            padding_left: None,
            padding_right: None,
            data: None,
        });
    });

    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_lsp_position::LineIndex;
    use ghost_syntax::LanguageKind;

    #[test]
    fn infers_number_type() {
        let text = "let x = 1;\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        let whole_file = Range { start: Position { line: 0, character: 0 }, end: Position { line: 10, character: 0 } };
        let hints = inlay_hints(&ctx, whole_file);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].label, InlayHintLabel::String(": number".to_string()));
    }
}
