//! SemanticTokens (spec.md §4.7.8).
//!
//! Produces a flat, `(line, start_char)`-sorted list of tokens, then
//! encodes it as the standard LSP delta-encoded `data` array against the
//! fixed legend in `ghost-lsp-protocol::capabilities::semantic_tokens_legend`.

use crate::context::{walk, DocumentContext};
use tree_sitter::Node;

/// One token before delta-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken {
    /// 0-based line.
    pub line: u32,
    /// UTF-16 start column.
    pub start_char: u32,
    /// UTF-16 length.
    pub length: u32,
    /// Index into the fixed token-type legend.
    pub token_type: u32,
    /// Bitmask over the fixed modifier legend.
    pub modifiers: u32,
}

const MOD_DECLARATION: u32 = 1 << 0;

fn token_type_for(kind: &str) -> Option<u32> {
    // Indices must track `ghost_lsp_protocol::capabilities::semantic_tokens_legend`'s
    // `token_types` order.
    match kind {
        "function_declaration" | "function_definition" => Some(11), // FUNCTION
        "method_definition" => Some(12),                            // METHOD
        "class_declaration" => Some(2),                             // CLASS
        "variable_declarator" => Some(8),                           // VARIABLE
        "property_identifier" | "shorthand_property_identifier" => Some(9), // PROPERTY
        "identifier" | "word" | "variable_name" => Some(8),         // VARIABLE
        "string" | "string_literal" | "raw_string" => Some(17),     // STRING
        "number" | "number_literal" => Some(18),                    // NUMBER
        "comment" => Some(16),                                      // COMMENT
        _ if is_keyword_kind(kind) => Some(14),                     // KEYWORD
        _ => None,
    }
}

fn is_keyword_kind(kind: &str) -> bool {
    matches!(
        kind,
        "let" | "const" | "function" | "if" | "else" | "while" | "for" | "return" | "class" | "import" | "export"
    )
}

/// Collect every token in `ctx`'s tree, sorted by `(line, start_char)`.
pub fn tokens(ctx: &DocumentContext) -> Vec<RawToken> {
    let Some(tree) = ctx.tree else {
        return Vec::new();
    };
    let mut out = Vec::new();
    walk(tree.root_node(), |node: Node| {
        if node.child_count() > 0 && node.kind() != "string" {
            // Keep only leaves (and whole string literals) to avoid overlapping tokens.
            return;
        }
        let Some(token_type) = token_type_for(node.kind()) else {
            return;
        };
        let range = ctx.node_range(node);
        if range.start.line != range.end.line {
            return;
        }
        let modifiers = if node.parent().map(|p| p.kind() == "variable_declarator").unwrap_or(false)
            && node.kind() != "variable_declarator"
        {
            MOD_DECLARATION
        } else {
            0
        };
        out.push(RawToken {
            line: range.start.line,
            start_char: range.start.character,
            length: range.end.character.saturating_sub(range.start.character),
            token_type,
            modifiers,
        });
    });
    out.sort_by_key(|t| (t.line, t.start_char));
    out
}

/// Delta-encode `sorted_tokens` into the standard LSP `SemanticTokens.data` array.
pub fn encode_delta(sorted_tokens: &[RawToken]) -> Vec<u32> {
    let mut data = Vec::with_capacity(sorted_tokens.len() * 5);
    let mut prev_line = 0u32;
    let mut prev_char = 0u32;
    for token in sorted_tokens {
        let delta_line = token.line - prev_line;
        let delta_char = if delta_line == 0 { token.start_char - prev_char } else { token.start_char };
        data.extend_from_slice(&[delta_line, delta_char, token.length, token.token_type, token.modifiers]);
        prev_line = token.line;
        prev_char = token.start_char;
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_lsp_position::LineIndex;
    use ghost_syntax::LanguageKind;

    #[test]
    fn tokens_are_sorted_and_encodable() {
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
        let toks = tokens(&ctx);
        assert!(!toks.is_empty());
        for pair in toks.windows(2) {
            assert!((pair[0].line, pair[0].start_char) <= (pair[1].line, pair[1].start_char));
        }
        let data = encode_delta(&toks);
        assert_eq!(data.len(), toks.len() * 5);
    }
}
