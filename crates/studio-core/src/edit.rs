//! Positions, ranges and pure-data text edits.
//!
//! A completion candidate does not carry a closure that mutates the editor; it carries a
//! [`TextEdit`] the host applies however it likes. [`apply_text_edit`] is the reference
//! implementation over a [`LineIndex`].

use crate::buffer::LineIndex;
use serde::{Deserialize, Serialize};

/// A `(line, column)` position; `column` counts chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based line.
    pub line: usize,
    /// Zero-based char column.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open `[start, end)` range of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl Range {
    /// Create a range; endpoints are swapped if given in reverse order.
    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// A range covering `start_col..end_col` on a single line.
    pub fn on_line(line: usize, start_col: usize, end_col: usize) -> Self {
        Self::new(Position::new(line, start_col), Position::new(line, end_col))
    }

    /// Returns `true` if the range is empty (pure insertion point).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Replace `range` with `new_text` (which may contain newlines).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextEdit {
    /// The range to replace, in the coordinates of the request document.
    pub range: Range,
    /// Replacement text.
    pub new_text: String,
}

impl TextEdit {
    /// Create a new edit.
    pub fn new(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    /// Returns the char offsets `(start, end)` of this edit in `line_index`.
    pub fn char_offsets(&self, line_index: &LineIndex) -> (usize, usize) {
        let start = line_index.position_to_char_offset(self.range.start.line, self.range.start.column);
        let end = line_index.position_to_char_offset(self.range.end.line, self.range.end.column);
        (start.min(end), start.max(end))
    }

    /// Apply this edit to `line_index`. See [`apply_text_edit`].
    pub fn apply(&self, line_index: &mut LineIndex) {
        apply_text_edit(line_index, self);
    }

    /// Position of the caret right after the inserted text.
    pub fn end_position(&self) -> Position {
        let start = self.range.start;
        match self.new_text.rsplit_once('\n') {
            Some((head, tail)) => Position::new(
                start.line + head.matches('\n').count() + 1,
                tail.chars().count(),
            ),
            None => Position::new(start.line, start.column + self.new_text.chars().count()),
        }
    }
}

/// Apply `edit` to `line_index`.
///
/// Out-of-range positions clamp to the nearest valid offset, so applying a stale edit never
/// panics.
pub fn apply_text_edit(line_index: &mut LineIndex, edit: &TextEdit) {
    let (start, end) = edit.char_offsets(line_index);
    line_index.replace(start, end, &edit.new_text);
}

/// Byte offset of char column `column` in `line` (clamped to the line length).
pub fn char_to_byte(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_range_new_orders_endpoints() {
        let r = Range::new(Position::new(2, 4), Position::new(1, 0));
        assert_eq!(r.start, Position::new(1, 0));
        assert_eq!(r.end, Position::new(2, 4));
    }

    #[test]
    fn test_apply_text_edit_replaces_span() {
        let mut index = LineIndex::from_text("entity_id: light.kit\n");
        let edit = TextEdit::new(Range::on_line(0, 11, 20), "light.kitchen");
        apply_text_edit(&mut index, &edit);
        assert_eq!(index.get_text(), "entity_id: light.kitchen\n");
    }

    #[test]
    fn test_apply_text_edit_multiline_insert() {
        let mut index = LineIndex::from_text("  snip:auto\n");
        let edit = TextEdit::new(Range::on_line(0, 2, 11), "a:\n  b: 1");
        apply_text_edit(&mut index, &edit);
        assert_eq!(index.get_text(), "  a:\n  b: 1\n");
        assert_eq!(edit.end_position(), Position::new(1, 6));
    }

    #[test]
    fn test_char_to_byte_handles_multibyte() {
        assert_eq!(char_to_byte("é: x", 1), 2);
        assert_eq!(char_to_byte("ab", 10), 2);
    }
}
