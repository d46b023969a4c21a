//! Snapshot values and text editing primitives.
//!
//! A [`Snapshot`] is one committed editing state: buffer text plus selection
//! bounds. It can only be obtained through validation, so every snapshot that
//! reaches the history satisfies `selection_start <= selection_end <= len(text)`.
//! Offsets count `char`s, never bytes.
//!
//! An [`EditRecord`] is the unvalidated counterpart: what the input surface
//! reports at key-press time, and what a transform proposes as the next state.
//! [`Draft`] is the rope-backed scratch space transforms use to compute one
//! record from another.

use thiserror::Error;

pub mod draft;
pub use draft::Draft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("selection start {start} is after selection end {end}")]
    SelectionReversed { start: usize, end: usize },
    #[error("selection end {end} exceeds text length {len}")]
    SelectionOutOfBounds { end: usize, len: usize },
}

/// Text plus selection as reported by the input surface or proposed by a transform.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditRecord {
    pub text: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

impl EditRecord {
    pub fn new(text: impl Into<String>, selection_start: usize, selection_end: usize) -> Self {
        Self {
            text: text.into(),
            selection_start,
            selection_end,
        }
    }
}

/// Immutable committed editing state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot {
    text: String,
    selection_start: usize,
    selection_end: usize,
}

impl Snapshot {
    /// Validating constructor.
    pub fn new(
        text: impl Into<String>,
        selection_start: usize,
        selection_end: usize,
    ) -> Result<Self, SnapshotError> {
        let text = text.into();
        if selection_start > selection_end {
            return Err(SnapshotError::SelectionReversed {
                start: selection_start,
                end: selection_end,
            });
        }
        let len = text.chars().count();
        if selection_end > len {
            return Err(SnapshotError::SelectionOutOfBounds {
                end: selection_end,
                len,
            });
        }
        Ok(Self {
            text,
            selection_start,
            selection_end,
        })
    }

    /// The canonical empty snapshot shown when the undo stack is empty.
    pub const fn empty() -> Self {
        Self {
            text: String::new(),
            selection_start: 0,
            selection_end: 0,
        }
    }

    /// Snapshot of `text` with a collapsed caret after the last character.
    pub fn caret_at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            selection_start: len,
            selection_end: len,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn selection_start(&self) -> usize {
        self.selection_start
    }
    pub fn selection_end(&self) -> usize {
        self.selection_end
    }
    pub fn selection(&self) -> (usize, usize) {
        (self.selection_start, self.selection_end)
    }
    pub fn has_selection(&self) -> bool {
        self.selection_start != self.selection_end
    }

    pub fn to_record(&self) -> EditRecord {
        EditRecord::new(self.text.clone(), self.selection_start, self.selection_end)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<EditRecord> for Snapshot {
    type Error = SnapshotError;

    fn try_from(record: EditRecord) -> Result<Self, Self::Error> {
        Snapshot::new(record.text, record.selection_start, record.selection_end)
    }
}

impl From<Snapshot> for EditRecord {
    fn from(s: Snapshot) -> Self {
        EditRecord {
            text: s.text,
            selection_start: s.selection_start,
            selection_end: s.selection_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn valid_snapshot_accepts_full_selection() {
        let s = Snapshot::new("abc", 0, 3).unwrap();
        assert_eq!(s.text(), "abc");
        assert_eq!(s.selection(), (0, 3));
        assert!(s.has_selection());
    }

    #[test]
    fn reversed_selection_rejected() {
        assert_eq!(
            Snapshot::new("abc", 2, 1),
            Err(SnapshotError::SelectionReversed { start: 2, end: 1 })
        );
    }

    #[test]
    fn out_of_bounds_selection_rejected() {
        assert_eq!(
            Snapshot::new("abc", 0, 4),
            Err(SnapshotError::SelectionOutOfBounds { end: 4, len: 3 })
        );
    }

    #[test]
    fn bounds_count_chars_not_bytes() {
        // "é" is two bytes but one char.
        assert!(Snapshot::new("é", 1, 1).is_ok());
        assert!(Snapshot::new("é", 2, 2).is_err());
    }

    #[test]
    fn empty_and_caret_at_end() {
        assert_eq!(Snapshot::empty(), Snapshot::new("", 0, 0).unwrap());
        let s = Snapshot::caret_at_end("x=1");
        assert_eq!(s.selection(), (3, 3));
    }

    #[test]
    fn record_conversion_validates() {
        let ok = EditRecord::new("ab", 1, 2);
        assert_eq!(Snapshot::try_from(ok.clone()).unwrap().to_record(), ok);
        assert!(Snapshot::try_from(EditRecord::new("ab", 0, 9)).is_err());
    }
}
