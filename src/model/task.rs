use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable in-memory identity of a task.
///
/// Ids are handed out by [`TaskList`](super::TaskList) from a monotonically
/// increasing counter and are never written to disk: two tasks with the same
/// text and state still have different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn new(raw: u64) -> Self {
        TaskId(raw)
    }

    /// The raw counter value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single task in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    /// Task text, trimmed and non-empty
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// The persisted form of this task (drops the id)
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            text: self.text.clone(),
            completed: self.completed,
        }
    }
}

/// Persisted shape of a task: `{"text": "...", "completed": false}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl TaskRecord {
    pub fn new(text: impl Into<String>, completed: bool) -> Self {
        TaskRecord {
            text: text.into(),
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_to_stable_schema() {
        let rec = TaskRecord::new("buy milk", true);
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"text":"buy milk","completed":true}"#);
    }

    #[test]
    fn record_missing_completed_defaults_to_false() {
        let rec: TaskRecord = serde_json::from_str(r#"{"text":"x"}"#).unwrap();
        assert_eq!(rec, TaskRecord::new("x", false));
    }

    #[test]
    fn task_id_display() {
        assert_eq!(TaskId::new(7).to_string(), "#7");
    }
}
