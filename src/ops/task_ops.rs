use crate::model::list::TaskList;
use crate::model::task::{Task, TaskId};

/// Trim task text, rejecting text that is blank after trimming.
pub fn normalize_text(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Append a task to the end of the list. Blank text is rejected (returns None).
pub fn add_task(list: &mut TaskList, text: &str) -> Option<TaskId> {
    let text = normalize_text(text)?;
    Some(list.push(text.to_string()))
}

/// Flip a task's completed flag. Returns false if the id is unknown.
pub fn toggle_task(list: &mut TaskList, id: TaskId) -> bool {
    match list.get_mut(id) {
        Some(task) => {
            task.completed = !task.completed;
            true
        }
        None => false,
    }
}

/// Replace a task's text.
///
/// Uses the same rule as [`add_task`]: text is trimmed and blank text is
/// rejected, leaving the old text in place. Returns whether anything changed.
pub fn edit_task(list: &mut TaskList, id: TaskId, new_text: &str) -> bool {
    let Some(text) = normalize_text(new_text) else {
        return false;
    };
    match list.get_mut(id) {
        Some(task) if task.text != text => {
            task.text = text.to_string();
            true
        }
        _ => false,
    }
}

/// Remove a task, shifting later tasks down by one.
pub fn remove_task(list: &mut TaskList, id: TaskId) -> Option<Task> {
    let index = list.index_of(id)?;
    Some(list.remove_at(index))
}

/// Remove every completed task, keeping the relative order of the rest.
/// Returns how many were removed.
pub fn clear_completed(list: &mut TaskList) -> usize {
    let before = list.len();
    list.retain(|t| !t.completed);
    before - list.len()
}
