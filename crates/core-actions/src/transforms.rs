//! Text transforms bound in tier 2 of the keymap.
//!
//! Every transform is a pure function of the raw event, the record the input
//! surface proposed, and the edit options. None of them touch history; the
//! dispatcher validates the returned record and pushes it.
//!
//! Offsets are char indices throughout. Surface selections are clamped and
//! ordered by [`Draft`] before any transform sees them, so the built-in
//! transforms always produce valid snapshots.

use core_config::Config;
use core_events::RawKeyEvent;
use core_text::{Draft, EditRecord};
use smallvec::SmallVec;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOptions {
    pub indent_with_tabs: bool,
    pub indent_width: usize,
    pub auto_close: bool,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            indent_with_tabs: true,
            indent_width: 4,
            auto_close: true,
        }
    }
}

impl EditOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            indent_with_tabs: cfg.file.editor.indent_with_tabs,
            indent_width: cfg.indent_width(),
            auto_close: cfg.file.editor.auto_close,
        }
    }

    /// Text inserted by one level of indentation.
    pub fn indent_unit(&self) -> String {
        if self.indent_with_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_width.max(1))
        }
    }
}

const PAIRS: [(char, char); 6] = [
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('"', '"'),
    ('\'', '\''),
    ('`', '`'),
];

fn closer_for(open: char) -> Option<char> {
    PAIRS.iter().find(|(o, _)| *o == open).map(|(_, c)| *c)
}

fn is_closer(ch: char) -> bool {
    PAIRS.iter().any(|(_, c)| *c == ch)
}

fn is_bracket(ch: char) -> bool {
    matches!(ch, '(' | '[' | '{')
}

/// Type the printable character for `event`, replacing any selection.
///
/// With auto-close enabled: an opener inserts its pair (or wraps the
/// selection), and typing a closer that already follows the caret steps over
/// it. Quotes directly after a word character are typed plainly.
pub fn insert_char(event: &RawKeyEvent, record: &EditRecord, opts: &EditOptions) -> EditRecord {
    let Some(ch) = event.printable() else {
        return record.clone();
    };
    let mut d = Draft::from_record(record);
    if opts.auto_close {
        let (start, _) = d.selection();
        if !d.has_selection() && is_closer(ch) && d.char_after_caret() == Some(ch) {
            d.collapse_to(start + 1);
            trace!(target: "actions.transform", ch = %ch, "step_over_closer");
            return d.into_record();
        }
        if let Some(close) = closer_for(ch) {
            let after_word = d.char_before_caret().is_some_and(char::is_alphanumeric);
            if is_bracket(ch) || d.has_selection() || !after_word {
                return wrap_or_pair(d, ch, close);
            }
        }
    }
    let mut buf = [0u8; 4];
    d.replace_selection(ch.encode_utf8(&mut buf));
    d.into_record()
}

fn wrap_or_pair(mut d: Draft, open: char, close: char) -> EditRecord {
    let (start, end) = d.selection();
    if start != end {
        let inner = d.selected_text();
        let mut wrapped = String::with_capacity(inner.len() + 2);
        wrapped.push(open);
        wrapped.push_str(&inner);
        wrapped.push(close);
        d.replace_selection(&wrapped);
        d.select(start + 1, end + 1);
        trace!(target: "actions.transform", open = %open, len = end - start, "wrap_selection");
    } else {
        d.replace_selection(&format!("{open}{close}"));
        d.collapse_to(start + 1);
        trace!(target: "actions.transform", open = %open, "auto_close_pair");
    }
    d.into_record()
}

/// Insert one indent unit at the caret.
pub fn insert_indent(_event: &RawKeyEvent, record: &EditRecord, opts: &EditOptions) -> EditRecord {
    let mut d = Draft::from_record(record);
    d.replace_selection(&opts.indent_unit());
    d.into_record()
}

/// Indent every line the selection touches by one unit; the selection grows
/// to cover the same text.
pub fn indent_lines(_event: &RawKeyEvent, record: &EditRecord, opts: &EditOptions) -> EditRecord {
    let mut d = Draft::from_record(record);
    let unit = opts.indent_unit();
    let unit_len = unit.chars().count();
    let (start, end) = d.selection();
    let starts: SmallVec<[usize; 8]> = d.touched_lines().map(|l| d.line_start(l)).collect();
    for &ls in starts.iter().rev() {
        d.insert(ls, &unit);
    }
    d.select(start + unit_len, end + unit_len * starts.len());
    trace!(target: "actions.transform", lines = starts.len(), "indent_lines");
    d.into_record()
}

/// Remove one level of indentation (a tab, or up to `indent_width` spaces)
/// from every line the selection touches.
pub fn dedent_lines(_event: &RawKeyEvent, record: &EditRecord, opts: &EditOptions) -> EditRecord {
    let mut d = Draft::from_record(record);
    let (start, end) = d.selection();
    // (line start, chars removed)
    let mut cuts: SmallVec<[(usize, usize); 8]> = SmallVec::new();
    for line in d.touched_lines() {
        let ws = d.leading_whitespace(line);
        let removed = if ws.starts_with('\t') {
            1
        } else {
            ws.chars()
                .take_while(|c| *c == ' ')
                .take(opts.indent_width.max(1))
                .count()
        };
        if removed > 0 {
            cuts.push((d.line_start(line), removed));
        }
    }
    if cuts.is_empty() {
        return d.into_record();
    }
    let shift = |pos: usize| -> usize {
        cuts.iter()
            .map(|&(ls, n)| {
                if pos >= ls + n {
                    n
                } else if pos > ls {
                    pos - ls
                } else {
                    0
                }
            })
            .sum()
    };
    let (new_start, new_end) = (start - shift(start), end - shift(end));
    for &(ls, n) in cuts.iter().rev() {
        d.remove(ls..ls + n);
    }
    d.select(new_start, new_end);
    trace!(target: "actions.transform", lines = cuts.len(), "dedent_lines");
    d.into_record()
}

/// Break the line at the caret, carrying the current line's indentation.
/// Between an empty bracket pair the closer moves to its own line and the
/// caret lands one level deeper.
pub fn newline(_event: &RawKeyEvent, record: &EditRecord, opts: &EditOptions) -> EditRecord {
    let mut d = Draft::from_record(record);
    let (start, _) = d.selection();
    let line = d.line_of(start);
    let ls = d.line_start(line);
    let indent: String = d.leading_whitespace(line).chars().take(start - ls).collect();
    if opts.auto_close
        && !d.has_selection()
        && let (Some(before), Some(after)) = (d.char_before_caret(), d.char_after_caret())
        && is_bracket(before)
        && closer_for(before) == Some(after)
    {
        let opened = format!("\n{indent}{}", opts.indent_unit());
        let caret = start + opened.chars().count();
        d.replace_selection(&format!("{opened}\n{indent}"));
        d.collapse_to(caret);
        trace!(target: "actions.transform", "newline_expand_pair");
        return d.into_record();
    }
    d.replace_selection(&format!("\n{indent}"));
    d.into_record()
}

/// Delete the selection, or the character before the caret. An empty
/// auto-close pair around the caret is deleted as a unit.
pub fn backspace(_event: &RawKeyEvent, record: &EditRecord, opts: &EditOptions) -> EditRecord {
    let mut d = Draft::from_record(record);
    if d.has_selection() {
        d.replace_selection("");
        return d.into_record();
    }
    let (start, _) = d.selection();
    if start == 0 {
        return d.into_record();
    }
    let pair = opts.auto_close
        && matches!(
            (d.char_before_caret(), d.char_after_caret()),
            (Some(b), Some(a)) if closer_for(b) == Some(a)
        );
    let to = if pair { start + 1 } else { start };
    d.remove(start - 1..to);
    d.collapse_to(start - 1);
    d.into_record()
}

/// Delete the selection, or the character after the caret.
pub fn delete_forward(_event: &RawKeyEvent, record: &EditRecord, _opts: &EditOptions) -> EditRecord {
    let mut d = Draft::from_record(record);
    if d.has_selection() {
        d.replace_selection("");
        return d.into_record();
    }
    let (start, _) = d.selection();
    if start < d.len_chars() {
        d.remove(start..start + 1);
        d.collapse_to(start);
    }
    d.into_record()
}
