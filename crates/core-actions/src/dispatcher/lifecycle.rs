//! Tier 1 handling: lifecycle actions delegate straight to the session.

use super::{DispatchOutcome, DispatchResult};
use core_keymap::LifecycleAction;
use core_state::EditorSession;

pub(crate) fn handle_lifecycle(
    action: LifecycleAction,
    session: &mut EditorSession,
) -> DispatchResult {
    let depth_before = (session.history().undo_depth(), session.history().redo_depth());
    let applied = match action {
        LifecycleAction::Undo => session.undo(),
        LifecycleAction::Redo => session.redo(),
        LifecycleAction::Save => session.save(),
    };
    tracing::trace!(
        target: "actions.dispatch",
        op = action.as_str(),
        applied,
        undo_before = depth_before.0,
        redo_before = depth_before.1,
        dirty = session.is_dirty(),
        "lifecycle"
    );
    DispatchResult::suppressed(DispatchOutcome::Lifecycle { action, applied })
}
