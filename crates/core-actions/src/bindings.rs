//! Default binding set.
//!
//! Tier 1 (lifecycle):
//! - undo: Cmd+Z on mac, Ctrl+Z elsewhere
//! - redo: Cmd+Shift+Z on mac, Ctrl+Y or Ctrl+Shift+Z elsewhere
//! - save: Cmd+S on mac, Ctrl+S elsewhere
//!
//! Tier 2 (transforms): printable keys with and without Shift, Tab,
//! Shift+Tab, Enter, Backspace, Delete. Anything carrying Cmd, Ctrl or Alt that
//! is not listed above stays unbound.

use std::rc::Rc;

use core_events::layout::printable_key_codes;
use core_events::{KeyModifiers, Platform, RawKeyEvent, keycode};
use core_keymap::{
    BindingSpec, BindingTable, KeyPattern, LifecycleAction, SelectionMatch, Transform,
};
use core_text::EditRecord;

use crate::transforms::{self, EditOptions};

const MAC: &[Platform] = &[Platform::Mac];
const NON_MAC: &[Platform] = &[Platform::Win, Platform::Other];

type TransformImpl = fn(&RawKeyEvent, &EditRecord, &EditOptions) -> EditRecord;

fn bound(name: &'static str, f: TransformImpl, opts: &Rc<EditOptions>) -> Transform {
    let opts = Rc::clone(opts);
    Transform::new(name, move |event, record| f(event, record, &opts))
}

pub fn lifecycle_specs() -> Vec<BindingSpec> {
    use LifecycleAction::*;
    let cmd = KeyModifiers::META;
    let ctrl = KeyModifiers::CTRL;
    let shift = KeyModifiers::SHIFT;
    vec![
        BindingSpec::lifecycle(KeyPattern::key(keycode::KEY_Z).on(MAC).mods(cmd), Undo),
        BindingSpec::lifecycle(
            KeyPattern::key(keycode::KEY_Z).on(MAC).mods(cmd | shift),
            Redo,
        ),
        BindingSpec::lifecycle(KeyPattern::key(keycode::KEY_S).on(MAC).mods(cmd), Save),
        BindingSpec::lifecycle(
            KeyPattern::key(keycode::KEY_Z).on(NON_MAC).mods(ctrl),
            Undo,
        ),
        BindingSpec::lifecycle(
            KeyPattern::key(keycode::KEY_Y).on(NON_MAC).mods(ctrl),
            Redo,
        ),
        BindingSpec::lifecycle(
            KeyPattern::key(keycode::KEY_Z).on(NON_MAC).mods(ctrl | shift),
            Redo,
        ),
        BindingSpec::lifecycle(
            KeyPattern::key(keycode::KEY_S).on(NON_MAC).mods(ctrl),
            Save,
        ),
    ]
}

pub fn transform_specs(opts: EditOptions) -> Vec<BindingSpec> {
    let opts = Rc::new(opts);
    let shift = KeyModifiers::SHIFT;
    let typing = bound("insert_char", transforms::insert_char, &opts);
    let mut v = Vec::new();
    for code in printable_key_codes() {
        v.push(BindingSpec::transform(KeyPattern::key(code), typing.clone()));
        v.push(BindingSpec::transform(
            KeyPattern::key(code).mods(shift),
            typing.clone(),
        ));
    }
    let newline = bound("newline", transforms::newline, &opts);
    v.extend([
        BindingSpec::transform(
            KeyPattern::key(keycode::TAB).selection(SelectionMatch::Collapsed),
            bound("insert_indent", transforms::insert_indent, &opts),
        ),
        BindingSpec::transform(
            KeyPattern::key(keycode::TAB).selection(SelectionMatch::Ranged),
            bound("indent_lines", transforms::indent_lines, &opts),
        ),
        BindingSpec::transform(
            KeyPattern::key(keycode::TAB).mods(shift),
            bound("dedent_lines", transforms::dedent_lines, &opts),
        ),
        BindingSpec::transform(KeyPattern::key(keycode::ENTER), newline.clone()),
        BindingSpec::transform(KeyPattern::key(keycode::ENTER).mods(shift), newline),
        BindingSpec::transform(
            KeyPattern::key(keycode::BACKSPACE),
            bound("backspace", transforms::backspace, &opts),
        ),
        BindingSpec::transform(
            KeyPattern::key(keycode::DELETE),
            bound("delete_forward", transforms::delete_forward, &opts),
        ),
    ]);
    v
}

/// Lifecycle and transform bindings for every platform.
pub fn default_table(opts: EditOptions) -> BindingTable {
    BindingTable::build(lifecycle_specs().into_iter().chain(transform_specs(opts)))
}
