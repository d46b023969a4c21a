//! Editing session state: snapshot history, content fingerprints, and the
//! republish step that keeps the visible buffer derived from the history.
//!
//! Ownership:
//! - One `EditorSession` per buffer. It exclusively owns its `HistoryState`
//!   and `ContentState`; nothing is shared between sessions and no locking is
//!   involved.
//!
//! Republish:
//! - Every mutating history operation (`push`, a successful `undo`, a
//!   successful `redo`) ends with `republish`, which re-derives the visible
//!   text from the top of the undo stack, recomputes its fingerprint, and hands
//!   a `RenderFrame` to the render sink. Undo/redo on an empty stack change
//!   nothing and publish nothing.
//!
//! Saving:
//! - `save` compares fingerprints only. A real transition hands the text to
//!   the persistence sink and then publishes a frame so the renderer drops
//!   its unsaved marker. When the visible content already matches the saved
//!   fingerprint it returns without touching either sink.
//!
//! Telemetry:
//! - Stack movement traces under `state.undo`, republish under
//!   `state.session`, real save transitions under `state.save`.

pub mod content;
pub mod fingerprint;
pub mod sink;
pub mod undo;

pub use content::ContentState;
pub use core_text::Snapshot;
pub use fingerprint::{Digest, empty_fingerprint, fingerprint};
pub use sink::{NoopPersistence, NoopRenderSink, PersistenceSink, RenderFrame, RenderSink};
pub use undo::HistoryState;

use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Maximum retained undo entries; 0 keeps everything.
    pub max_history: usize,
}

pub struct EditorSession {
    history: HistoryState,
    content: ContentState,
    render: Box<dyn RenderSink>,
    persistence: Box<dyn PersistenceSink>,
}

impl EditorSession {
    /// Start a session with default options. See [`EditorSession::with_options`].
    pub fn new(
        initial: Option<&str>,
        render: impl RenderSink + 'static,
        persistence: impl PersistenceSink + 'static,
    ) -> Self {
        Self::with_options(initial, SessionOptions::default(), render, persistence)
    }

    /// Start a session. Non-empty initial content becomes the first snapshot
    /// (caret at the end), is recorded as saved so the session starts clean,
    /// and is handed to the persistence sink once.
    pub fn with_options(
        initial: Option<&str>,
        options: SessionOptions,
        render: impl RenderSink + 'static,
        persistence: impl PersistenceSink + 'static,
    ) -> Self {
        let mut session = Self {
            history: HistoryState::with_max_depth(options.max_history),
            content: ContentState::new(),
            render: Box::new(render),
            persistence: Box::new(persistence),
        };
        if let Some(text) = initial.filter(|t| !t.is_empty()) {
            session.content.set_saved(fingerprint(text));
            session.push(Snapshot::caret_at_end(text));
            session.persistence.on_save(text);
            debug!(target: "state.session", len = text.len(), saved = %session.content.saved_fingerprint().short(), "initial_content_loaded");
        }
        session
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
    }
    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn current_snapshot(&self) -> &Snapshot {
        self.history.current()
    }
    pub fn visible_text(&self) -> &str {
        self.content.visible_text()
    }
    pub fn fingerprint(&self) -> Digest {
        self.content.content_fingerprint()
    }
    pub fn saved_fingerprint(&self) -> Digest {
        self.content.saved_fingerprint()
    }
    pub fn is_dirty(&self) -> bool {
        self.content.is_dirty()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.history.push(snapshot);
        self.republish();
    }

    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            trace!(target: "state.session", "undo_noop_empty_stack");
            return false;
        }
        self.republish();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            trace!(target: "state.session", "redo_noop_empty_stack");
            return false;
        }
        self.republish();
        true
    }

    /// Persist the visible text if it differs from the last save, then publish
    /// a clean frame. Returns whether the persistence sink was notified; a
    /// clean save touches neither sink.
    pub fn save(&mut self) -> bool {
        if !self.content.mark_saved() {
            trace!(target: "state.save", "save_noop_clean");
            return false;
        }
        debug!(target: "state.save", saved = %self.content.saved_fingerprint().short(), len = self.content.visible_text().len(), "save_transition");
        self.persistence.on_save(self.content.visible_text());
        let frame = self.frame();
        self.render.publish(&frame);
        true
    }

    /// The render-boundary tuple for the current state.
    pub fn frame(&self) -> RenderFrame {
        let snap = self.history.current();
        RenderFrame {
            text: self.content.visible_text().to_string(),
            selection_start: snap.selection_start(),
            selection_end: snap.selection_end(),
            dirty: self.content.is_dirty(),
        }
    }

    fn republish(&mut self) {
        let text = self.history.current().text().to_owned();
        self.content.refresh(&text);
        let frame = self.frame();
        trace!(
            target: "state.session",
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            sel_start = frame.selection_start,
            sel_end = frame.selection_end,
            dirty = frame.dirty,
            fingerprint = %self.content.content_fingerprint().short(),
            "republish"
        );
        self.render.publish(&frame);
    }
}
