//! Incremental parse adapter (spec.md §4.6, component C6).
//!
//! Converts one `TextDocumentContentChangeEvent` into a `tree_sitter::InputEdit`
//! computed against the document's *pre-edit* text, so the parser can reuse
//! unaffected subtrees instead of reparsing from scratch.

use ghost_lsp_position::LineIndex;
use lsp_types::TextDocumentContentChangeEvent;
use tree_sitter::{InputEdit, Point};

fn to_point((row, column): (u32, u32)) -> Point {
    Point { row: row as usize, column: column as usize }
}

/// The end point of `inserted_text` when it is inserted starting at `start`.
fn new_end_point(start: Point, inserted_text: &str) -> Point {
    let newline_count = inserted_text.matches('\n').count();
    if newline_count == 0 {
        Point { row: start.row, column: start.column + inserted_text.len() }
    } else {
        let last_line_len = inserted_text.rsplit('\n').next().unwrap_or("").len();
        Point { row: start.row + newline_count, column: last_line_len }
    }
}

/// Compute the `InputEdit` for `change` against `line_index`, which must be
/// built from the document's text *before* `change` is applied.
///
/// Returns `None` when `change.range` is absent, meaning the whole document
/// was replaced and the caller should do a full reparse (`parse(None, text)`)
/// rather than an incremental one.
pub fn compute_input_edit(
    line_index: &LineIndex,
    change: &TextDocumentContentChangeEvent,
) -> Option<InputEdit> {
    let range = change.range?;

    let start_byte = line_index.position_to_offset(range.start.line, range.start.character)?;
    let old_end_byte = line_index.position_to_offset(range.end.line, range.end.character)?;
    let new_end_byte = start_byte + change.text.len();

    let start_position = to_point(line_index.offset_to_byte_point(start_byte));
    let old_end_position = to_point(line_index.offset_to_byte_point(old_end_byte));
    let new_end_position = new_end_point(start_position, &change.text);

    Some(InputEdit {
        start_byte,
        old_end_byte,
        new_end_byte,
        start_position,
        old_end_position,
        new_end_position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsp_types::{Position, Range};

    fn change(start: (u32, u32), end: (u32, u32), text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range: Some(Range {
                start: Position { line: start.0, character: start.1 },
                end: Position { line: end.0, character: end.1 },
            }),
            range_length: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn single_line_insertion_advances_column_only() {
        let index = LineIndex::new("let x = 1;\n".to_string());
        let change = change((0, 8), (0, 9), "42");
        let edit = compute_input_edit(&index, &change).expect("range present");
        assert_eq!(edit.start_byte, 8);
        assert_eq!(edit.old_end_byte, 9);
        assert_eq!(edit.new_end_byte, 10);
        assert_eq!(edit.start_position, Point { row: 0, column: 8 });
        assert_eq!(edit.new_end_position, Point { row: 0, column: 10 });
    }

    #[test]
    fn multiline_insertion_advances_row_and_resets_column() {
        let index = LineIndex::new("a()\n".to_string());
        let change = change((0, 1), (0, 1), "\nb\nc");
        let edit = compute_input_edit(&index, &change).expect("range present");
        assert_eq!(edit.start_position, Point { row: 0, column: 1 });
        assert_eq!(edit.new_end_position, Point { row: 2, column: 1 });
    }

    #[test]
    fn full_document_replacement_yields_no_edit() {
        let index = LineIndex::new("old text".to_string());
        let change = TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "new text".to_string(),
        };
        assert!(compute_input_edit(&index, &change).is_none());
    }
}
