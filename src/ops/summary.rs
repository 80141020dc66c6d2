use serde::Serialize;

use crate::model::task::Task;

/// Counts derived from the full task list (independent of the filter)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    /// Tasks not yet completed
    pub remaining: usize,
    pub completed: usize,
}

impl Summary {
    /// Whether "clear completed" has anything to do
    pub fn has_completed(&self) -> bool {
        self.completed > 0
    }

    /// e.g. "1 item left", "3 items left"
    pub fn remaining_label(&self) -> String {
        if self.remaining == 1 {
            "1 item left".to_string()
        } else {
            format!("{} items left", self.remaining)
        }
    }
}

pub fn summarize(tasks: &[Task]) -> Summary {
    let remaining = tasks.iter().filter(|t| !t.completed).count();
    Summary {
        total: tasks.len(),
        remaining,
        completed: tasks.len() - remaining,
    }
}
