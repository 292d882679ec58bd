//! Read-only text buffer access.
//!
//! The editing core only ever needs "give me line `i`" and "how many lines are there". Hosts
//! can hand in plain slices of lines, or a rope-backed [`LineIndex`] when they already keep
//! the document in one piece.

use ropey::Rope;
use std::borrow::Cow;

/// Line-oriented view of a document.
///
/// Lines never include their trailing newline.
pub trait TextBuffer {
    /// Number of lines in the document (an empty document has one empty line).
    fn line_count(&self) -> usize;

    /// Text of line `index`, or `None` when out of range.
    fn line(&self, index: usize) -> Option<Cow<'_, str>>;
}

impl<S: AsRef<str>> TextBuffer for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.get(index).map(|s| Cow::Borrowed(s.as_ref()))
    }
}

impl<S: AsRef<str>> TextBuffer for Vec<S> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.as_slice().line(index)
    }
}

impl<S: AsRef<str>, const N: usize> TextBuffer for [S; N] {
    fn line_count(&self) -> usize {
        N
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.as_slice().line(index)
    }
}

impl<T: TextBuffer + ?Sized> TextBuffer for &T {
    fn line_count(&self) -> usize {
        (**self).line_count()
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        (**self).line(index)
    }
}

/// Rope-backed line index.
///
/// Provides O(log N) line access and char-offset conversion for whole documents.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a line index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total line count.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get text of the specified line (excluding newline).
    pub fn get_line_text(&self, line_number: usize) -> Option<String> {
        if line_number >= self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(line_number).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    /// Get character offset from line number and column number.
    ///
    /// Columns past the end of the line clamp to the line end; lines past the end of the
    /// document clamp to the document end.
    pub fn position_to_char_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }

        let line_start_char = self.rope.line_to_char(line);
        let line_len = self.get_line_text(line).map_or(0, |t| t.chars().count());
        line_start_char + column.min(line_len)
    }

    /// Replace the char range `start..end` with `text`.
    pub fn replace(&mut self, start: usize, end: usize, text: &str) {
        let len = self.rope.len_chars();
        let start = start.min(len);
        let end = end.clamp(start, len);
        if start < end {
            self.rope.remove(start..end);
        }
        self.rope.insert(start, text);
    }

    /// Get the complete text.
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }
}

impl TextBuffer for LineIndex {
    fn line_count(&self) -> usize {
        LineIndex::line_count(self)
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.get_line_text(index).map(Cow::Owned)
    }
}

/// The leading whitespace prefix of `line`.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(line.len(), |(i, _)| i);
    &line[..end]
}

/// Indentation of `line` as a raw char count (tabs count as one).
pub fn line_indent(line: &str) -> usize {
    leading_whitespace(line).chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_buffer_access() {
        let lines = ["automation:", "  - alias: test"];
        assert_eq!(lines.line_count(), 2);
        assert_eq!(lines.line(1).as_deref(), Some("  - alias: test"));
        assert!(lines.line(2).is_none());
    }

    #[test]
    fn test_line_index_strips_crlf() {
        let index = LineIndex::from_text("a: 1\r\nb: 2\r\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.get_line_text(0).as_deref(), Some("a: 1"));
        assert_eq!(index.get_line_text(2).as_deref(), Some(""));
    }

    #[test]
    fn test_position_to_char_offset_clamps_column() {
        let index = LineIndex::from_text("ab\ncdé\n");
        assert_eq!(index.position_to_char_offset(1, 0), 3);
        assert_eq!(index.position_to_char_offset(1, 99), 6);
        assert_eq!(index.position_to_char_offset(9, 0), index.char_count());
    }

    #[test]
    fn test_indent_counts_raw_chars() {
        assert_eq!(line_indent("    - x"), 4);
        assert_eq!(line_indent("\t  - x"), 3);
        assert_eq!(line_indent(""), 0);
        assert_eq!(leading_whitespace("   "), "   ");
    }
}
