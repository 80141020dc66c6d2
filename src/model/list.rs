use super::filter::FilterMode;
use super::task::{Task, TaskId, TaskRecord};

/// The ordered task collection together with the active filter.
///
/// Order is insertion order. Nothing here resorts the list: tasks are only
/// appended or removed.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
    /// Active filter mode (session-only, never persisted)
    pub filter: FilterMode,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList::default()
    }

    /// Build a list from persisted records, assigning fresh ids in order
    pub fn from_records(records: Vec<TaskRecord>) -> Self {
        let mut list = TaskList::new();
        for rec in records {
            let id = list.alloc_id();
            list.tasks.push(Task {
                id,
                text: rec.text,
                completed: rec.completed,
            });
        }
        list
    }

    /// The persisted form of the whole list, in store order
    pub fn to_records(&self) -> Vec<TaskRecord> {
        self.tasks.iter().map(Task::to_record).collect()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Store index of the task with this id
    pub fn index_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Id of the task at a store index
    pub fn id_at(&self, index: usize) -> Option<TaskId> {
        self.tasks.get(index).map(|t| t.id)
    }

    pub(crate) fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Append a new, not-yet-completed task. Text must already be validated.
    pub(crate) fn push(&mut self, text: String) -> TaskId {
        let id = self.alloc_id();
        self.tasks.push(Task {
            id,
            text,
            completed: false,
        });
        id
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Task {
        self.tasks.remove(index)
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&Task) -> bool) {
        self.tasks.retain(f);
    }

    /// Replace the contents with reloaded records.
    ///
    /// Tasks whose text still appears, in the same relative order, keep their
    /// ids; everything else gets a fresh id. Ids keep counting up so an id
    /// from before the reload never aliases a different task.
    pub(crate) fn merge_records(&mut self, records: Vec<TaskRecord>) {
        let old = std::mem::take(&mut self.tasks);
        let mut next_old = 0;
        for rec in records {
            let matched = old[next_old..]
                .iter()
                .position(|t| t.text == rec.text)
                .map(|offset| next_old + offset);
            let id = match matched {
                Some(i) => {
                    next_old = i + 1;
                    old[i].id
                }
                None => self.alloc_id(),
            };
            self.tasks.push(Task {
                id,
                text: rec.text,
                completed: rec.completed,
            });
        }
    }

    fn alloc_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        id
    }
}
