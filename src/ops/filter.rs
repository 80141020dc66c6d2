use crate::model::filter::FilterMode;
use crate::model::task::{Task, TaskId};

/// A task that passes the active filter, paired with its position in the
/// full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleTask<'a> {
    pub task: &'a Task,
    pub store_index: usize,
}

impl VisibleTask<'_> {
    pub fn id(&self) -> TaskId {
        self.task.id
    }
}

/// Select the tasks visible under `mode`, in store order.
///
/// Each entry carries the store index it came from, so callers never have to
/// search the full list to find where a visible task lives.
pub fn visible(tasks: &[Task], mode: FilterMode) -> Vec<VisibleTask<'_>> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| mode.admits(task))
        .map(|(store_index, task)| VisibleTask { task, store_index })
        .collect()
}
