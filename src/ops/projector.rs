//! Translation between positions in the rendered (filtered) list and the
//! tasks they show.
//!
//! Every lookup goes through the pairing built by [`visible`](super::filter::visible);
//! nothing here compares task contents.

use crate::model::task::TaskId;

use super::filter::VisibleTask;

/// Store index of the task shown at `visual_position`.
pub fn store_index_of(visual_position: usize, visible: &[VisibleTask<'_>]) -> Option<usize> {
    visible.get(visual_position).map(|vt| vt.store_index)
}

/// Id of the task shown at `visual_position`.
pub fn id_at(visual_position: usize, visible: &[VisibleTask<'_>]) -> Option<TaskId> {
    visible.get(visual_position).map(|vt| vt.id())
}

/// Where a task appears in the rendered list, if it is visible at all.
pub fn visual_position_of(id: TaskId, visible: &[VisibleTask<'_>]) -> Option<usize> {
    visible.iter().position(|vt| vt.id() == id)
}
