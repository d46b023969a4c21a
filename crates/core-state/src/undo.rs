use core_text::Snapshot;
use tracing::trace;

static EMPTY_SNAPSHOT: Snapshot = Snapshot::empty();

/// Linear undo/redo history over committed snapshots.
///
/// The visible snapshot is always the top of the undo stack (or the canonical
/// empty snapshot). Pushing clears the redo stack; undo and redo only move
/// single entries between the two stacks.
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// 0 = unbounded.
    max_depth: usize,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// History that retains at most `max_depth` undo entries (0 = unbounded).
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Undo entries, oldest first.
    pub fn undo_stack(&self) -> &[Snapshot] {
        &self.undo_stack
    }
    /// Redo entries, the next redo last.
    pub fn redo_stack(&self) -> &[Snapshot] {
        &self.redo_stack
    }

    pub fn current(&self) -> &Snapshot {
        self.undo_stack.last().unwrap_or(&EMPTY_SNAPSHOT)
    }

    /// Record `snapshot` as the newest state. Identical successive snapshots
    /// are recorded too; deciding whether to push is the caller's business.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "push_snapshot");
        if self.max_depth > 0 && self.undo_stack.len() > self.max_depth {
            let excess = self.undo_stack.len() - self.max_depth;
            self.undo_stack.drain(..excess);
            trace!(target: "state.undo", max_depth = self.max_depth, excess, "undo_stack_trimmed");
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Move the newest snapshot onto the redo stack. Returns false (and changes
    /// nothing) when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(last) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(last);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        true
    }

    /// Move the most recently undone snapshot back onto the undo stack.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(next);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "redo_pop");
        true
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn snap(text: &str, s: usize, e: usize) -> Snapshot {
        Snapshot::new(text, s, e).unwrap()
    }

    #[test]
    fn empty_history_shows_canonical_empty() {
        let h = HistoryState::new();
        assert_eq!(h.current(), &Snapshot::empty());
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn undo_then_redo_single_entry() {
        let mut h = HistoryState::new();
        h.push(snap("a", 0, 1));
        assert!(h.undo());
        assert_eq!(h.current(), &Snapshot::empty());
        assert!(h.redo());
        assert_eq!(h.current(), &snap("a", 0, 1));
    }

    #[test]
    fn undo_and_redo_on_empty_stacks_are_noops() {
        let mut h = HistoryState::new();
        assert!(!h.undo());
        assert!(!h.redo());
        h.push(snap("a", 1, 1));
        assert!(!h.redo());
        assert_eq!(h.undo_depth(), 1);
        assert_eq!(h.redo_depth(), 0);
    }

    #[test]
    fn push_after_undo_discards_redo_branch() {
        let mut h = HistoryState::new();
        h.push(snap("ab", 2, 2));
        h.push(snap("abc", 3, 3));
        h.undo();
        assert_eq!(h.redo_depth(), 1);
        h.push(snap("abz", 3, 3));
        assert_eq!(h.redo_depth(), 0);
        assert_eq!(h.current(), &snap("abz", 3, 3));
        assert_eq!(h.undo_stack(), &[snap("ab", 2, 2), snap("abz", 3, 3)]);
    }

    #[test]
    fn redo_keeps_remaining_redo_entries() {
        let mut h = HistoryState::new();
        h.push(snap("a", 1, 1));
        h.push(snap("ab", 2, 2));
        h.push(snap("abc", 3, 3));
        h.undo();
        h.undo();
        assert!(h.redo());
        assert_eq!(h.redo_depth(), 1);
        assert_eq!(h.redo_stack(), &[snap("abc", 3, 3)]);
    }

    #[test]
    fn identical_pushes_are_recorded() {
        let mut h = HistoryState::new();
        h.push(snap("a", 1, 1));
        h.push(snap("a", 1, 1));
        assert_eq!(h.undo_depth(), 2);
    }

    #[test]
    fn max_depth_trims_oldest() {
        let mut h = HistoryState::with_max_depth(2);
        h.push(snap("a", 1, 1));
        h.push(snap("ab", 2, 2));
        h.push(snap("abc", 3, 3));
        assert_eq!(h.undo_stack(), &[snap("ab", 2, 2), snap("abc", 3, 3)]);
    }

    proptest! {
        #[test]
        fn undo_redo_inverse_law(texts in proptest::collection::vec("[a-z]{0,6}", 1..24)) {
            let mut h = HistoryState::new();
            for t in &texts {
                h.push(Snapshot::caret_at_end(t.as_str()));
            }
            let last = h.current().clone();
            for _ in 0..texts.len() {
                prop_assert!(h.undo());
            }
            prop_assert_eq!(h.current(), &Snapshot::empty());
            for _ in 0..texts.len() {
                prop_assert!(h.redo());
            }
            prop_assert_eq!(h.current(), &last);
            prop_assert_eq!(h.redo_depth(), 0);
        }

        #[test]
        fn push_always_empties_redo(undos in 0usize..6, extra in "[a-z]{0,4}") {
            let mut h = HistoryState::new();
            for t in ["a", "ab", "abc", "abcd", "abcde"] {
                h.push(Snapshot::caret_at_end(t));
            }
            for _ in 0..undos {
                h.undo();
            }
            h.push(Snapshot::caret_at_end(extra));
            prop_assert_eq!(h.redo_depth(), 0);
        }
    }
}
