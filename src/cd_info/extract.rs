//! Labelled line extraction shared by the CDDB and CD-TEXT parsers

use std::ops::Range;

/// A labelled value found in a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Text after the label, trimmed and unquoted
    pub value: String,
    /// Byte offset of the label
    pub label_start: usize,
    /// Byte offset of the newline ending the value (or the window end)
    pub line_end: usize,
}

/// Find the first `label` inside `window` and return the rest of its line
///
/// The label must lie wholly inside the window and the value never runs past
/// the window end. Returns `None` when the label is absent.
pub fn find_field(text: &str, label: &str, window: Range<usize>) -> Option<Field> {
    let end = window.end.min(text.len());
    let start = window.start;
    if start > end {
        return None;
    }

    let label_start = start + text.get(start..end)?.find(label)?;
    let value_start = label_start + label.len();
    let line_end = text[value_start..end]
        .find('\n')
        .map(|i| value_start + i)
        .unwrap_or(end);

    Some(Field {
        value: clean_value(&text[value_start..line_end]),
        label_start,
        line_end,
    })
}

/// Trim whitespace and one layer of matching quotes
fn clean_value(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = ['\'', '"']
        .iter()
        .find_map(|q| trimmed.strip_prefix(*q)?.strip_suffix(*q))
        .unwrap_or(trimmed);
    unquoted.trim().to_string()
}

/// Position threaded through successive label searches
#[derive(Debug, Clone)]
pub struct TextCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TextCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Search from the cursor to the end of the text without moving
    pub fn peek_field(&self, label: &str) -> Option<Field> {
        find_field(self.text, label, self.pos..self.text.len())
    }

    /// Search from the cursor and move past the found line
    pub fn take_field(&mut self, label: &str) -> Option<Field> {
        let field = self.peek_field(label)?;
        self.pos = field.line_end;
        Some(field)
    }

    /// Move the cursor; it never moves backwards or past the end
    pub fn advance_to(&mut self, offset: usize) {
        self.pos = self.pos.max(offset.min(self.text.len()));
    }
}
