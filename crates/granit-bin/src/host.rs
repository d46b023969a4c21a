//! Host-side collaborators: the text surface the session paints into and the
//! file the session saves to.

use core_events::{KeyModifiers, RawKeyEvent};
use core_state::{PersistenceSink, RenderFrame, RenderSink};
use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, error, info};

/// What the user sees: the last published frame plus any selection moves
/// made since.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    pub text: String,
    pub selection_start: usize,
    pub selection_end: usize,
    pub dirty: bool,
    pub frames: usize,
}

impl Surface {
    /// The raw event a key press on this surface reports.
    pub fn key_event(&self, key_code: u16, modifiers: KeyModifiers) -> RawKeyEvent {
        RawKeyEvent::new(
            key_code,
            modifiers,
            self.text.as_str(),
            self.selection_start,
            self.selection_end,
        )
    }

    pub fn select(&mut self, start: usize, end: usize) {
        self.selection_start = start;
        self.selection_end = end;
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.dirty { "*" } else { " " };
        writeln!(
            f,
            "--- {marker} sel={}..{} frames={}",
            self.selection_start, self.selection_end, self.frames
        )?;
        f.write_str(&self.text)?;
        if !self.text.ends_with('\n') {
            writeln!(f)?;
        }
        Ok(())
    }
}

pub type SharedSurface = Rc<RefCell<Surface>>;

pub struct SurfaceSink {
    surface: SharedSurface,
}

impl SurfaceSink {
    pub fn new(surface: SharedSurface) -> Self {
        Self { surface }
    }
}

impl RenderSink for SurfaceSink {
    fn publish(&mut self, frame: &RenderFrame) {
        let mut s = self.surface.borrow_mut();
        s.text.clone_from(&frame.text);
        s.select(frame.selection_start, frame.selection_end);
        s.dirty = frame.dirty;
        s.frames += 1;
        debug!(
            target: "runtime.render",
            len = frame.text.len(),
            sel_start = frame.selection_start,
            sel_end = frame.selection_end,
            dirty = frame.dirty,
            "frame_published"
        );
    }
}

/// Writes saved text to `path`. Text identical to what is already on disk
/// (including the startup content) is not rewritten.
pub struct FileSink {
    path: Option<PathBuf>,
    on_disk: Option<String>,
    writes: Rc<RefCell<usize>>,
}

impl FileSink {
    pub fn new(path: Option<PathBuf>, on_disk: Option<String>) -> Self {
        Self {
            path,
            on_disk,
            writes: Rc::default(),
        }
    }

    /// Handle for reading the write count after the sink moves into a session.
    pub fn write_counter(&self) -> Rc<RefCell<usize>> {
        Rc::clone(&self.writes)
    }
}

impl PersistenceSink for FileSink {
    fn on_save(&mut self, text: &str) {
        if self.on_disk.as_deref() == Some(text) {
            debug!(target: "runtime.save", "save_matches_disk");
            return;
        }
        let Some(path) = self.path.as_ref() else {
            info!(target: "runtime.save", len = text.len(), "save_without_path");
            self.on_disk = Some(text.to_string());
            return;
        };
        match std::fs::write(path, text) {
            Ok(()) => {
                info!(target: "runtime.save", file = %path.display(), len = text.len(), "file_written");
                self.on_disk = Some(text.to_string());
                *self.writes.borrow_mut() += 1;
            }
            Err(e) => {
                error!(target: "runtime.save", file = %path.display(), ?e, "file_write_error");
            }
        }
    }
}
