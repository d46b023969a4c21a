//! Rope-backed scratch buffer used to derive one [`EditRecord`] from another.
//!
//! A `Draft` never fails: selection bounds from the surface are clamped into
//! the text and ordered on entry. All offsets are char indices.

use std::ops::Range;

use ropey::Rope;

use crate::EditRecord;

#[derive(Debug, Clone)]
pub struct Draft {
    rope: Rope,
    start: usize,
    end: usize,
}

impl Draft {
    pub fn from_record(record: &EditRecord) -> Self {
        let rope = Rope::from_str(&record.text);
        let len = rope.len_chars();
        let mut start = record.selection_start.min(len);
        let mut end = record.selection_end.min(len);
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }
        Self { rope, start, end }
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn selection(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn has_selection(&self) -> bool {
        self.start != self.end
    }

    pub fn selected_text(&self) -> String {
        self.rope.slice(self.start..self.end).to_string()
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        if idx < self.rope.len_chars() {
            Some(self.rope.char(idx))
        } else {
            None
        }
    }

    /// Character immediately before the selection start.
    pub fn char_before_caret(&self) -> Option<char> {
        self.start.checked_sub(1).and_then(|i| self.char_at(i))
    }

    /// Character at the selection end.
    pub fn char_after_caret(&self) -> Option<char> {
        self.char_at(self.end)
    }

    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.rope.len_chars();
        self.start = start.min(len);
        self.end = end.min(len).max(self.start);
    }

    pub fn collapse_to(&mut self, idx: usize) {
        self.select(idx, idx);
    }

    pub fn insert(&mut self, idx: usize, text: &str) {
        self.rope.insert(idx.min(self.rope.len_chars()), text);
    }

    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.rope.len_chars();
        let r = range.start.min(len)..range.end.min(len);
        if r.start < r.end {
            self.rope.remove(r);
        }
    }

    /// Replace the selection with `text`, leaving a collapsed caret after it.
    pub fn replace_selection(&mut self, text: &str) {
        let (start, end) = self.selection();
        self.remove(start..end);
        self.insert(start, text);
        self.collapse_to(start + text.chars().count());
    }

    pub fn line_of(&self, idx: usize) -> usize {
        self.rope.char_to_line(idx.min(self.rope.len_chars()))
    }

    pub fn line_start(&self, line: usize) -> usize {
        self.rope.line_to_char(line.min(self.rope.len_lines().saturating_sub(1)))
    }

    /// Lines touched by the selection. A selection that ends exactly at the
    /// start of a line does not touch that line.
    pub fn touched_lines(&self) -> Range<usize> {
        let first = self.line_of(self.start);
        let mut last = self.line_of(self.end);
        if self.has_selection() && last > first && self.line_start(last) == self.end {
            last -= 1;
        }
        first..last + 1
    }

    /// Leading spaces and tabs of `line`.
    pub fn leading_whitespace(&self, line: usize) -> String {
        if line >= self.rope.len_lines() {
            return String::new();
        }
        self.rope
            .line(line)
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect()
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn into_record(self) -> EditRecord {
        EditRecord {
            text: self.rope.to_string(),
            selection_start: self.start,
            selection_end: self.end,
        }
    }
}
