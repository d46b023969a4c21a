//! Key-event dispatch.
//!
//! One call handles one raw key event to completion:
//! 1. normalize `(platform, modifiers, key code, has_selection)` into a `KeyTuple`;
//! 2. resolve it against the binding table (tier 1 before tier 2);
//! 3. lifecycle actions go to the session (`lifecycle`), transforms compute and
//!    push the next snapshot (`edit`), unbound tuples do nothing.
//!
//! The default action of the raw event is suppressed in every case, including
//! unbound tuples and rejected transforms. The session is the only source of
//! truth for buffer contents, so the host surface must never apply the key
//! itself. A rejected transform leaves the session untouched.

mod edit;
mod lifecycle;

use core_events::{Platform, RawKeyEvent};
use core_keymap::{BindingTable, KeyTuple, LifecycleAction, Resolution};
use core_state::EditorSession;
use core_text::SnapshotError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Tier 1 matched. `applied` is false when the action was a no-op
    /// (empty stack, clean save).
    Lifecycle {
        action: LifecycleAction,
        applied: bool,
    },
    /// Tier 2 matched and the resulting snapshot was pushed.
    Edited { transform: &'static str },
    /// Neither tier matched.
    Unbound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Always true; surfaced so hosts can forward it to their event source.
    pub default_prevented: bool,
    pub outcome: DispatchOutcome,
}

impl DispatchResult {
    pub(crate) fn suppressed(outcome: DispatchOutcome) -> Self {
        Self {
            default_prevented: true,
            outcome,
        }
    }

    /// True when the visible snapshot may have changed.
    pub fn changed_buffer(&self) -> bool {
        match self.outcome {
            DispatchOutcome::Lifecycle {
                action: LifecycleAction::Undo | LifecycleAction::Redo,
                applied,
            } => applied,
            DispatchOutcome::Edited { .. } => true,
            _ => false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// A transform produced a record whose selection violates the snapshot
    /// invariant. Nothing was pushed; the key's default action is still suppressed.
    #[error("transform `{transform}` produced an invalid snapshot: {source}")]
    InvalidTransform {
        transform: &'static str,
        #[source]
        source: SnapshotError,
    },
}

pub fn dispatch(
    session: &mut EditorSession,
    table: &BindingTable,
    platform: Platform,
    event: &RawKeyEvent,
) -> Result<DispatchResult, DispatchError> {
    let tuple = KeyTuple::normalize(platform, event);
    let _span = tracing::trace_span!(target: "actions.dispatch", "dispatch", key = %tuple).entered();
    match table.resolve(&tuple) {
        Resolution::Lifecycle(action) => Ok(lifecycle::handle_lifecycle(action, session)),
        Resolution::Transform(t) => edit::handle_transform(t, event, session),
        Resolution::Unbound => {
            tracing::trace!(target: "actions.dispatch", key = %tuple, "unbound_noop");
            Ok(DispatchResult::suppressed(DispatchOutcome::Unbound))
        }
    }
}
