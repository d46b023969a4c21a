//! Key script parsing.
//!
//! One step per line; blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! type fn main() {      # one key press per character
//! enter                 # named key
//! ctrl+shift+z          # chord: modifiers joined with `+`, key last
//! select 0 4            # move the surface selection (no key press)
//! undo | redo | save    # the platform's command chord for the action
//! show                  # print the surface
//! ```

use anyhow::{Context, Result, bail};
use core_events::{KeyModifiers, Platform, key_for_char, keycode};
use core_keymap::LifecycleAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Chord {
        key_code: u16,
        modifiers: KeyModifiers,
    },
    Type(String),
    Select {
        start: usize,
        end: usize,
    },
    Lifecycle(LifecycleAction),
    Show,
}

pub fn parse_script(src: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (idx, line) in src.lines().enumerate() {
        if let Some(step) = parse_line(line).with_context(|| format!("script line {}", idx + 1))? {
            steps.push(step);
        }
    }
    Ok(steps)
}

pub fn parse_line(line: &str) -> Result<Option<Step>> {
    // `type` keeps its argument verbatim (including `#` and inner spaces).
    if let Some(rest) = line.trim_start().strip_prefix("type") {
        let mut chars = rest.chars();
        match chars.next() {
            None => bail!("`type` needs text to type"),
            Some(' ' | '\t') => return Ok(Some(Step::Type(chars.as_str().to_string()))),
            // Some other word that merely starts with `type`.
            Some(_) => {}
        }
    }
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default();
    let step = match head.to_ascii_lowercase().as_str() {
        "select" => {
            let start = parse_offset(words.next())?;
            let end = match words.next() {
                Some(w) => parse_offset(Some(w))?,
                None => start,
            };
            Step::Select { start, end }
        }
        "undo" => Step::Lifecycle(LifecycleAction::Undo),
        "redo" => Step::Lifecycle(LifecycleAction::Redo),
        "save" => Step::Lifecycle(LifecycleAction::Save),
        "show" => Step::Show,
        _ => {
            let (key_code, modifiers) = parse_chord(head)?;
            Step::Chord {
                key_code,
                modifiers,
            }
        }
    };
    if let Some(extra) = words.next() {
        bail!("unexpected `{extra}` after `{head}`");
    }
    Ok(Some(step))
}

fn parse_offset(word: Option<&str>) -> Result<usize> {
    let word = word.context("missing offset")?;
    word.parse()
        .with_context(|| format!("offset `{word}` is not a number"))
}

/// Parse `mod+mod+key`. A bare printable character that needs Shift on a US
/// layout (e.g. `{`) gets Shift implied.
pub fn parse_chord(chord: &str) -> Result<(u16, KeyModifiers)> {
    let mut parts: Vec<&str> = chord.split('+').collect();
    // `ctrl++` means Ctrl and the plus key.
    if chord.ends_with("++") {
        parts.truncate(parts.len() - 2);
        parts.push("+");
    }
    let Some((key, mods)) = parts.split_last() else {
        bail!("empty chord");
    };
    let mut modifiers = KeyModifiers::empty();
    for m in mods {
        modifiers |= match m.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CTRL,
            "meta" | "cmd" | "command" => KeyModifiers::META,
            "shift" => KeyModifiers::SHIFT,
            "alt" | "option" => KeyModifiers::ALT,
            other => bail!("unknown modifier `{other}`"),
        };
    }
    let key_code = match key.to_ascii_lowercase().as_str() {
        "tab" => keycode::TAB,
        "enter" | "return" => keycode::ENTER,
        "backspace" => keycode::BACKSPACE,
        "delete" | "del" => keycode::DELETE,
        "escape" | "esc" => keycode::ESCAPE,
        "space" => keycode::SPACE,
        _ => {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                bail!("unknown key `{key}`");
            };
            // Letters name the key, not the case.
            let (code, shift) = key_for_char(ch.to_ascii_lowercase())
                .with_context(|| format!("no key types `{ch}`"))?;
            if shift {
                modifiers |= KeyModifiers::SHIFT;
            }
            code
        }
    };
    Ok((key_code, modifiers))
}

/// The chord a user on `platform` presses for a lifecycle action.
pub fn lifecycle_chord(platform: Platform, action: LifecycleAction) -> (u16, KeyModifiers) {
    let command = match platform {
        Platform::Mac => KeyModifiers::META,
        Platform::Win | Platform::Other => KeyModifiers::CTRL,
    };
    match action {
        LifecycleAction::Undo => (keycode::KEY_Z, command),
        LifecycleAction::Redo => (keycode::KEY_Z, command | KeyModifiers::SHIFT),
        LifecycleAction::Save => (keycode::KEY_S, command),
    }
}
