//! Core event types for granit: the raw key-event record delivered by the host
//! input surface, modifier flags, and the platform tag that participates in
//! keybinding lookup.
//!
//! The core never reads keys itself. A host (browser bridge, terminal shim,
//! scripted driver) produces well-formed `RawKeyEvent`s and the dispatcher in
//! `core-actions` consumes them one at a time.

use std::fmt;

pub mod layout;
pub mod platform;

pub use layout::{char_for_key, key_for_char};
pub use platform::Platform;

/// Well-known key codes (DOM `keyCode` numbering).
pub mod keycode {
    pub const BACKSPACE: u16 = 8;
    pub const TAB: u16 = 9;
    pub const ENTER: u16 = 13;
    pub const ESCAPE: u16 = 27;
    pub const SPACE: u16 = 32;
    pub const DELETE: u16 = 46;
    pub const KEY_S: u16 = 83;
    pub const KEY_Y: u16 = 89;
    pub const KEY_Z: u16 = 90;
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const META = 0b0000_0001;
        const CTRL = 0b0000_0010;
        const SHIFT= 0b0000_0100;
        const ALT  = 0b0000_1000;
    }
}

impl KeyModifiers {
    pub fn meta(self) -> bool {
        self.contains(Self::META)
    }
    pub fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }
    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }
    pub fn alt(self) -> bool {
        self.contains(Self::ALT)
    }
}

/// A key press as observed on the input surface, before any default action runs.
///
/// `current_text` and the selection bounds describe what the surface holds at
/// the moment of the press; transforms treat them as the proposed record they
/// rewrite into the next snapshot. Offsets count `char`s of `current_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub key_code: u16,
    pub modifiers: KeyModifiers,
    pub selection_start: usize,
    pub selection_end: usize,
    pub current_text: String,
}

impl RawKeyEvent {
    pub fn new(
        key_code: u16,
        modifiers: KeyModifiers,
        current_text: impl Into<String>,
        selection_start: usize,
        selection_end: usize,
    ) -> Self {
        Self {
            key_code,
            modifiers,
            selection_start,
            selection_end,
            current_text: current_text.into(),
        }
    }

    /// True when the surface held a non-collapsed selection at press time.
    pub fn has_selection(&self) -> bool {
        self.selection_start != self.selection_end
    }

    /// Character this press would type on a US layout, ignoring command modifiers.
    pub fn printable(&self) -> Option<char> {
        char_for_key(self.key_code, self.modifiers.shift())
    }
}

impl fmt::Display for RawKeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key={} mods={:?} sel={}..{}",
            self.key_code, self.modifiers, self.selection_start, self.selection_end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_selection_tracks_bounds() {
        let collapsed = RawKeyEvent::new(keycode::TAB, KeyModifiers::empty(), "abc", 2, 2);
        assert!(!collapsed.has_selection());
        let ranged = RawKeyEvent::new(keycode::TAB, KeyModifiers::empty(), "abc", 0, 2);
        assert!(ranged.has_selection());
    }

    #[test]
    fn modifier_accessors() {
        let mods = KeyModifiers::CTRL | KeyModifiers::SHIFT;
        assert!(mods.ctrl());
        assert!(mods.shift());
        assert!(!mods.meta());
        assert!(!mods.alt());
    }

    #[test]
    fn printable_respects_shift() {
        let lower = RawKeyEvent::new(65, KeyModifiers::empty(), "", 0, 0);
        let upper = RawKeyEvent::new(65, KeyModifiers::SHIFT, "", 0, 0);
        assert_eq!(lower.printable(), Some('a'));
        assert_eq!(upper.printable(), Some('A'));
        let tab = RawKeyEvent::new(keycode::TAB, KeyModifiers::empty(), "", 0, 0);
        assert_eq!(tab.printable(), None);
    }

    #[test]
    fn display_mentions_key_and_selection() {
        let e = RawKeyEvent::new(keycode::KEY_Z, KeyModifiers::META, "x", 0, 1);
        let s = e.to_string();
        assert!(s.contains("key=90"));
        assert!(s.contains("sel=0..1"));
    }
}
