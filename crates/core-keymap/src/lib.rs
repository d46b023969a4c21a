//! core-keymap: two-tier keybinding resolution.
//!
//! Design principles:
//! - Pure and deterministic: resolution depends only on the normalized
//!   [`KeyTuple`], never on history or buffer contents.
//! - Two tiers share one key type. Tier 1 holds lifecycle actions
//!   (undo/redo/save); tier 2 holds text transforms. Tier 1 is consulted first,
//!   so a tuple bound in both tiers resolves to its lifecycle action.
//! - Fail closed: a tuple bound in neither tier resolves to
//!   [`Resolution::Unbound`], which callers treat as a no-op.
//! - Binding specs are written as [`KeyPattern`]s (platform set, modifiers,
//!   key code, selection requirement) and expanded into concrete tuples at
//!   build time. Later specs override earlier ones for the same tuple.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use core_events::{KeyModifiers, Platform, RawKeyEvent};
use core_text::EditRecord;
use smallvec::SmallVec;
use tracing::{debug, trace};

// -------------------------------------------------------------------------------------------------
// Normalized key tuple
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyTuple {
    pub platform: Platform,
    pub meta: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub key_code: u16,
    pub has_selection: bool,
}

impl KeyTuple {
    pub fn new(
        platform: Platform,
        mods: KeyModifiers,
        key_code: u16,
        has_selection: bool,
    ) -> Self {
        Self {
            platform,
            meta: mods.meta(),
            ctrl: mods.ctrl(),
            shift: mods.shift(),
            alt: mods.alt(),
            key_code,
            has_selection,
        }
    }

    /// Build the lookup key for `event` on `platform`.
    pub fn normalize(platform: Platform, event: &RawKeyEvent) -> Self {
        Self::new(
            platform,
            event.modifiers,
            event.key_code,
            event.has_selection(),
        )
    }

    pub fn modifiers(&self) -> KeyModifiers {
        let mut m = KeyModifiers::empty();
        m.set(KeyModifiers::META, self.meta);
        m.set(KeyModifiers::CTRL, self.ctrl);
        m.set(KeyModifiers::SHIFT, self.shift);
        m.set(KeyModifiers::ALT, self.alt);
        m
    }
}

impl fmt::Display for KeyTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{}",
            self.platform,
            self.meta,
            self.ctrl,
            self.shift,
            self.alt,
            self.key_code,
            self.has_selection
        )
    }
}

// -------------------------------------------------------------------------------------------------
// Outputs
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleAction {
    Undo,
    Redo,
    Save,
}

impl LifecycleAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            LifecycleAction::Undo => "undo",
            LifecycleAction::Redo => "redo",
            LifecycleAction::Save => "save",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type TransformFn = dyn Fn(&RawKeyEvent, &EditRecord) -> EditRecord;

/// A named text transform: `(raw event, proposed record) -> next record`.
#[derive(Clone)]
pub struct Transform {
    name: &'static str,
    apply: Rc<TransformFn>,
}

impl Transform {
    pub fn new<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&RawKeyEvent, &EditRecord) -> EditRecord + 'static,
    {
        Self {
            name,
            apply: Rc::new(f),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, event: &RawKeyEvent, proposed: &EditRecord) -> EditRecord {
        (self.apply)(event, proposed)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.name).finish()
    }
}

#[derive(Debug, Clone)]
pub enum BindingOutput {
    Lifecycle(LifecycleAction),
    Transform(Transform),
}

#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    Lifecycle(LifecycleAction),
    Transform(&'a Transform),
    Unbound,
}

impl Resolution<'_> {
    pub fn is_unbound(&self) -> bool {
        matches!(self, Resolution::Unbound)
    }
}

// -------------------------------------------------------------------------------------------------
// Binding specification
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMatch {
    Any,
    Collapsed,
    Ranged,
}

impl SelectionMatch {
    fn states(self) -> &'static [bool] {
        match self {
            SelectionMatch::Any => &[false, true],
            SelectionMatch::Collapsed => &[false],
            SelectionMatch::Ranged => &[true],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeyPattern {
    pub platforms: &'static [Platform],
    pub mods: KeyModifiers,
    pub key_code: u16,
    pub selection: SelectionMatch,
}

impl KeyPattern {
    /// Pattern matching `key_code` with no modifiers on every platform, any selection state.
    pub const fn key(key_code: u16) -> Self {
        Self {
            platforms: &Platform::ALL,
            mods: KeyModifiers::empty(),
            key_code,
            selection: SelectionMatch::Any,
        }
    }

    pub const fn on(mut self, platforms: &'static [Platform]) -> Self {
        self.platforms = platforms;
        self
    }

    pub const fn mods(mut self, mods: KeyModifiers) -> Self {
        self.mods = mods;
        self
    }

    pub const fn selection(mut self, selection: SelectionMatch) -> Self {
        self.selection = selection;
        self
    }

    pub fn expand(&self) -> SmallVec<[KeyTuple; 6]> {
        let mut out = SmallVec::new();
        for &platform in self.platforms {
            for &has_selection in self.selection.states() {
                out.push(KeyTuple::new(platform, self.mods, self.key_code, has_selection));
            }
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct BindingSpec {
    pub pattern: KeyPattern,
    pub output: BindingOutput,
}

impl BindingSpec {
    pub fn lifecycle(pattern: KeyPattern, action: LifecycleAction) -> Self {
        Self {
            pattern,
            output: BindingOutput::Lifecycle(action),
        }
    }

    pub fn transform(pattern: KeyPattern, transform: Transform) -> Self {
        Self {
            pattern,
            output: BindingOutput::Transform(transform),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Table
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Default, Clone)]
pub struct BindingTable {
    lifecycle: HashMap<KeyTuple, LifecycleAction>,
    transforms: HashMap<KeyTuple, Transform>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(specs: impl IntoIterator<Item = BindingSpec>) -> Self {
        let mut table = Self::new();
        for spec in specs {
            table.add(spec);
        }
        let overlaps = table.overlapping().count();
        debug!(
            target: "keymap.build",
            lifecycle = table.lifecycle.len(),
            transforms = table.transforms.len(),
            overlaps,
            "binding_table_built"
        );
        table
    }

    pub fn add(&mut self, spec: BindingSpec) {
        for tuple in spec.pattern.expand() {
            match &spec.output {
                BindingOutput::Lifecycle(action) => self.bind_lifecycle(tuple, *action),
                BindingOutput::Transform(t) => self.bind_transform(tuple, t.clone()),
            }
        }
    }

    pub fn bind_lifecycle(&mut self, tuple: KeyTuple, action: LifecycleAction) {
        if let Some(prev) = self.lifecycle.insert(tuple, action) {
            trace!(target: "keymap.build", key = %tuple, %prev, next = %action, "binding_override");
        }
    }

    pub fn bind_transform(&mut self, tuple: KeyTuple, transform: Transform) {
        let next = transform.name();
        if let Some(prev) = self.transforms.insert(tuple, transform) {
            trace!(target: "keymap.build", key = %tuple, prev = prev.name(), next, "binding_override");
        }
    }

    pub fn unbind(&mut self, tuple: &KeyTuple) {
        self.lifecycle.remove(tuple);
        self.transforms.remove(tuple);
    }

    pub fn len(&self) -> usize {
        self.lifecycle.len() + self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lifecycle.is_empty() && self.transforms.is_empty()
    }

    /// Tuples bound in both tiers. They resolve to their lifecycle action.
    pub fn overlapping(&self) -> impl Iterator<Item = &KeyTuple> {
        self.lifecycle
            .keys()
            .filter(|k| self.transforms.contains_key(*k))
    }

    pub fn resolve(&self, tuple: &KeyTuple) -> Resolution<'_> {
        if let Some(action) = self.lifecycle.get(tuple) {
            trace!(target: "keymap.resolve", key = %tuple, tier = 1, %action, "resolved");
            return Resolution::Lifecycle(*action);
        }
        if let Some(t) = self.transforms.get(tuple) {
            trace!(target: "keymap.resolve", key = %tuple, tier = 2, transform = t.name(), "resolved");
            return Resolution::Transform(t);
        }
        trace!(target: "keymap.resolve", key = %tuple, "unbound");
        Resolution::Unbound
    }
}
