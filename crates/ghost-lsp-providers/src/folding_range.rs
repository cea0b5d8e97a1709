//! FoldingRange (spec.md §4.7.10).

use crate::context::{walk, DocumentContext};
use lsp_types::{FoldingRange, FoldingRangeKind};

const BLOCK_KINDS: &[&str] = &[
    "function_declaration",
    "function_definition",
    "statement_block",
    "class_body",
    "object",
    "array",
    "if_statement",
    "while_statement",
    "for_statement",
];

/// Fold ranges for block-like nodes and contiguous comment runs.
pub fn folding_ranges(ctx: &DocumentContext) -> Vec<FoldingRange> {
    let Some(tree) = ctx.tree else {
        return Vec::new();
    };
    let mut ranges = Vec::new();

    walk(tree.root_node(), |node| {
        if BLOCK_KINDS.contains(&node.kind()) {
            let range = ctx.node_range(node);
            if range.end.line > range.start.line {
                ranges.push(FoldingRange {
                    start_line: range.start.line,
                    start_character: Some(range.start.character),
                    end_line: range.end.line,
                    end_character: Some(range.end.character),
                    kind: None,
                    collapsed_text: None,
                });
            }
        }
    });

    ranges.extend(comment_runs(ctx, tree.root_node()));
    ranges.extend(import_runs(ctx, tree.root_node()));
    ranges
}

/// Group contiguous `import_statement` nodes at the top of a file into a
/// single collapsible range (spec.md §4.7.10's `imports` folding kind).
fn import_runs(ctx: &DocumentContext, root: tree_sitter::Node) -> Vec<FoldingRange> {
    let mut imports = Vec::new();
    walk(root, |node| {
        if node.kind() == "import_statement" {
            imports.push(node);
        }
    });

    let mut ranges = Vec::new();
    let mut i = 0;
    while i < imports.len() {
        let start = imports[i];
        let mut end = start;
        let mut j = i + 1;
        while j < imports.len() && imports[j].start_position().row <= end.end_position().row + 1 {
            end = imports[j];
            j += 1;
        }
        if end.end_position().row > start.start_position().row {
            let span = crate::context::byte_range_to_lsp(ctx.line_index, start.start_byte(), end.end_byte());
            ranges.push(FoldingRange {
                start_line: span.start.line,
                start_character: Some(span.start.character),
                end_line: span.end.line,
                end_character: Some(span.end.character),
                kind: Some(FoldingRangeKind::Imports),
                collapsed_text: None,
            });
        }
        i = j;
    }
    ranges
}

fn comment_runs(ctx: &DocumentContext, root: tree_sitter::Node) -> Vec<FoldingRange> {
    let mut comments = Vec::new();
    walk(root, |node| {
        if node.kind() == "comment" {
            comments.push(node);
        }
    });

    let mut ranges = Vec::new();
    let mut i = 0;
    while i < comments.len() {
        let start = comments[i];
        let mut end = start;
        let mut j = i + 1;
        while j < comments.len() && comments[j].start_position().row == end.end_position().row + 1 {
            end = comments[j];
            j += 1;
        }
        if end.end_position().row > start.start_position().row {
            let range = crate::context::byte_range_to_lsp(ctx.line_index, start.start_byte(), end.end_byte());
            ranges.push(FoldingRange {
                start_line: range.start.line,
                start_character: Some(range.start.character),
                end_line: range.end.line,
                end_character: Some(range.end.character),
                kind: Some(FoldingRangeKind::Comment),
                collapsed_text: None,
            });
        }
        i = j;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_lsp_position::LineIndex;
    use ghost_syntax::LanguageKind;

    #[test]
    fn folds_multiline_function_body() {
        let text = "function greet() {\n  print(1);\n  print(2);\n}\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        let ranges = folding_ranges(&ctx);
        assert!(ranges.iter().any(|r| r.start_line == 0 && r.end_line == 3));
    }

    #[test]
    fn folds_a_run_of_import_statements() {
        let text = "import a from 'a';\nimport b from 'b';\nimport c from 'c';\n\nprint(1);\n".to_string();
        let tree = ghost_syntax::parse_full(LanguageKind::Primary, &text).unwrap().unwrap();
        let line_index = LineIndex::new(text.clone());
        let ctx = DocumentContext {
            uri: "file:///a.ghost",
            text: &text,
            tree: Some(&tree),
            line_index: &line_index,
            language_kind: LanguageKind::Primary,
        };
        let ranges = folding_ranges(&ctx);
        assert!(ranges
            .iter()
            .any(|r| r.kind == Some(FoldingRangeKind::Imports) && r.start_line == 0 && r.end_line == 2));
    }
}
