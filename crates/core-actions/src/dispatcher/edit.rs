//! Tier 2 handling: run the transform, validate its record, push it.

use super::{DispatchError, DispatchOutcome, DispatchResult};
use core_events::RawKeyEvent;
use core_keymap::Transform;
use core_state::EditorSession;
use core_text::{EditRecord, Snapshot};

pub(crate) fn handle_transform(
    transform: &Transform,
    event: &RawKeyEvent,
    session: &mut EditorSession,
) -> Result<DispatchResult, DispatchError> {
    let proposed = EditRecord::new(
        event.current_text.as_str(),
        event.selection_start,
        event.selection_end,
    );
    let next = transform.apply(event, &proposed);
    let snapshot = Snapshot::try_from(next).map_err(|source| {
        tracing::warn!(target: "actions.dispatch", transform = transform.name(), error = %source, "transform_rejected");
        DispatchError::InvalidTransform {
            transform: transform.name(),
            source,
        }
    })?;
    tracing::trace!(
        target: "actions.dispatch",
        transform = transform.name(),
        sel_start = snapshot.selection_start(),
        sel_end = snapshot.selection_end(),
        "edit"
    );
    session.push(snapshot);
    Ok(DispatchResult::suppressed(DispatchOutcome::Edited {
        transform: transform.name(),
    }))
}
