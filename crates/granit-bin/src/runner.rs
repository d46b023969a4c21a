//! Feeds script steps through the editor as key events from the surface.

use crate::host::SharedSurface;
use crate::script::{Step, lifecycle_chord};
use anyhow::{Context, Result};
use core_actions::{DispatchOutcome, Editor};
use core_events::{KeyModifiers, key_for_char};
use std::io::Write;
use tracing::{trace, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub keys: usize,
    pub edits: usize,
    pub unbound: usize,
    pub rejected: usize,
}

pub struct Runner {
    editor: Editor,
    surface: SharedSurface,
    summary: RunSummary,
}

impl Runner {
    pub fn new(editor: Editor, surface: SharedSurface) -> Self {
        Self {
            editor,
            surface,
            summary: RunSummary::default(),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn run(&mut self, steps: &[Step], out: &mut impl Write) -> Result<RunSummary> {
        for step in steps {
            self.step(step, out)?;
        }
        Ok(self.summary)
    }

    fn step(&mut self, step: &Step, out: &mut impl Write) -> Result<()> {
        match step {
            Step::Chord {
                key_code,
                modifiers,
            } => self.press(*key_code, *modifiers),
            Step::Type(text) => {
                for ch in text.chars() {
                    let (code, shift) =
                        key_for_char(ch).with_context(|| format!("no key types `{ch}`"))?;
                    let mods = if shift {
                        KeyModifiers::SHIFT
                    } else {
                        KeyModifiers::empty()
                    };
                    self.press(code, mods);
                }
            }
            Step::Select { start, end } => {
                trace!(target: "runtime", start, end, "surface_select");
                self.surface.borrow_mut().select(*start, *end);
            }
            Step::Lifecycle(action) => {
                let (code, mods) = lifecycle_chord(self.editor.platform(), *action);
                self.press(code, mods);
            }
            Step::Show => write!(out, "{}", self.surface.borrow())?,
        }
        Ok(())
    }

    fn press(&mut self, key_code: u16, modifiers: KeyModifiers) {
        let event = self.surface.borrow().key_event(key_code, modifiers);
        self.summary.keys += 1;
        match self.editor.handle_key(&event) {
            Ok(result) => match result.outcome {
                DispatchOutcome::Edited { .. } => self.summary.edits += 1,
                DispatchOutcome::Unbound => self.summary.unbound += 1,
                DispatchOutcome::Lifecycle { .. } => {}
            },
            Err(e) => {
                warn!(target: "runtime", key = %event, error = %e, "key_rejected");
                self.summary.rejected += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Surface, SurfaceSink};
    use crate::script::parse_script;
    use core_actions::{EditOptions, default_table};
    use core_events::Platform;
    use core_keymap::{BindingSpec, KeyPattern, Transform};
    use core_state::{EditorSession, NoopPersistence};
    use core_text::EditRecord;
    use pretty_assertions::assert_eq;

    fn runner(platform: Platform, initial: Option<&str>) -> Runner {
        let surface = SharedSurface::default();
        let session = EditorSession::new(initial, SurfaceSink::new(surface.clone()), NoopPersistence);
        let editor = Editor::new(session, default_table(EditOptions::default()), platform);
        Runner::new(editor, surface)
    }

    #[test]
    fn script_edits_and_undoes() {
        let mut r = runner(Platform::Win, None);
        let steps = parse_script("type ab\nenter\ntype c\nundo\nundo\nredo\nescape\n").unwrap();
        let mut out = Vec::new();
        let summary = r.run(&steps, &mut out).unwrap();
        assert_eq!(r.editor().session().visible_text(), "ab\n");
        assert_eq!(
            summary,
            RunSummary {
                keys: 8,
                edits: 4,
                unbound: 1,
                rejected: 0
            }
        );
        assert!(out.is_empty());
    }

    #[test]
    fn save_clears_dirty_marker_on_surface() {
        let mut r = runner(Platform::Win, None);
        let steps = parse_script("type ab\nsave\nshow\n").unwrap();
        let mut out = Vec::new();
        r.run(&steps, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "---   sel=2..2 frames=3\nab\n");
        assert!(!r.editor().session().is_dirty());
    }

    #[test]
    fn select_then_type_replaces_selection() {
        let mut r = runner(Platform::Mac, Some("hello world"));
        let steps = parse_script("select 0 5\ntype bye\nshow\n").unwrap();
        let mut out = Vec::new();
        r.run(&steps, &mut out).unwrap();
        let expected = Surface {
            text: "bye world".into(),
            selection_start: 3,
            selection_end: 3,
            dirty: true,
            frames: 4,
        };
        assert_eq!(String::from_utf8(out).unwrap(), expected.to_string());
    }

    #[test]
    fn rejected_transform_is_counted_not_fatal() {
        let mut r = runner(Platform::Other, Some("x"));
        r.editor.table_mut().add(BindingSpec::transform(
            KeyPattern::key(core_events::keycode::ESCAPE),
            Transform::new("bad", |_, _| EditRecord::new("", 2, 1)),
        ));
        let steps = parse_script("esc\ntype y\n").unwrap();
        let summary = r.run(&steps, &mut Vec::new()).unwrap();
        assert_eq!(summary.rejected, 1);
        assert_eq!(r.editor().session().visible_text(), "xy");
    }
}
