#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchError, DispatchResult, EditOptions, Editor, default_table};
use core_events::{KeyModifiers, Platform, RawKeyEvent, key_for_char, keycode};
use core_state::{EditorSession, RenderFrame};
use core_text::EditRecord;
use std::{cell::RefCell, rc::Rc};

/// Drives an `Editor` the way a host input surface would: the surface shows
/// whatever the session last published, and every key press reports that
/// state back as the raw event.
pub struct Harness {
    pub editor: Editor,
    pub frames: Rc<RefCell<Vec<RenderFrame>>>,
    pub saves: Rc<RefCell<Vec<String>>>,
    pub surface: EditRecord,
}

impl Harness {
    pub fn new(platform: Platform, initial: Option<&str>) -> Self {
        Self::with_options(platform, initial, EditOptions::default())
    }

    pub fn with_options(platform: Platform, initial: Option<&str>, opts: EditOptions) -> Self {
        let frames: Rc<RefCell<Vec<RenderFrame>>> = Rc::default();
        let saves: Rc<RefCell<Vec<String>>> = Rc::default();
        let f = frames.clone();
        let s = saves.clone();
        let session = EditorSession::new(
            initial,
            move |frame: &RenderFrame| f.borrow_mut().push(frame.clone()),
            move |text: &str| s.borrow_mut().push(text.to_string()),
        );
        let surface = session.current_snapshot().to_record();
        let editor = Editor::new(session, default_table(opts), platform);
        Self {
            editor,
            frames,
            saves,
            surface,
        }
    }

    pub fn press(
        &mut self,
        key_code: u16,
        mods: KeyModifiers,
    ) -> Result<DispatchResult, DispatchError> {
        let event = RawKeyEvent::new(
            key_code,
            mods,
            self.surface.text.clone(),
            self.surface.selection_start,
            self.surface.selection_end,
        );
        let published_before = self.frames.borrow().len();
        let result = self.editor.handle_key(&event);
        if let Some(frame) = self.frames.borrow().get(published_before..).and_then(|f| f.last()) {
            self.surface = EditRecord::new(
                frame.text.clone(),
                frame.selection_start,
                frame.selection_end,
            );
        }
        result
    }

    pub fn press_ok(&mut self, key_code: u16, mods: KeyModifiers) -> DispatchResult {
        self.press(key_code, mods).expect("dispatch should succeed")
    }

    pub fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            let (code, shift) = key_for_char(ch).expect("typeable char");
            let mods = if shift {
                KeyModifiers::SHIFT
            } else {
                KeyModifiers::empty()
            };
            self.press_ok(code, mods);
        }
    }

    /// Move the surface selection without going through the session (mouse, arrows).
    pub fn select(&mut self, start: usize, end: usize) {
        self.surface.selection_start = start;
        self.surface.selection_end = end;
    }

    fn command(&self) -> KeyModifiers {
        match self.editor.platform() {
            Platform::Mac => KeyModifiers::META,
            _ => KeyModifiers::CTRL,
        }
    }

    pub fn undo(&mut self) -> DispatchResult {
        let m = self.command();
        self.press_ok(keycode::KEY_Z, m)
    }

    pub fn redo(&mut self) -> DispatchResult {
        let m = self.command() | KeyModifiers::SHIFT;
        self.press_ok(keycode::KEY_Z, m)
    }

    pub fn save(&mut self) -> DispatchResult {
        let m = self.command();
        self.press_ok(keycode::KEY_S, m)
    }

    pub fn text(&self) -> &str {
        self.editor.session().visible_text()
    }

    pub fn selection(&self) -> (usize, usize) {
        self.editor.session().current_snapshot().selection()
    }

    pub fn is_dirty(&self) -> bool {
        self.editor.session().is_dirty()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }
}

mod log_capture {
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    /// Run `f` with a fmt subscriber at `level` and return everything it logged.
    pub fn capture<F: FnOnce()>(level: Level, f: F) -> String {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = BufferWriter {
            inner: buffer.clone(),
        };
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();
        with_default(subscriber, f);
        let bytes = buffer.lock().expect("log buffer poisoned").clone();
        String::from_utf8(bytes).expect("utf8 log output")
    }
}

pub use log_capture::capture;
