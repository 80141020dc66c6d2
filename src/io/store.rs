use std::io;

use crate::model::filter::FilterMode;
use crate::model::list::TaskList;
use crate::model::task::{Task, TaskId, TaskRecord};
use crate::ops::filter::{self, VisibleTask};
use crate::ops::summary::{self, Summary};
use crate::ops::task_ops;

use super::lock::FileLock;
use super::recovery::{RecoveryCategory, RecoveryEntry, log_recovery};
use super::slot::Slot;

/// Error type for snapshot persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write task snapshot \"{key}\": {source}")]
    Write { key: String, source: io::Error },
    #[error("could not lock task snapshot \"{key}\": {source}")]
    Lock { key: String, source: io::Error },
    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Serialize records as the snapshot stored in the slot.
pub fn encode(records: &[TaskRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Parse a snapshot.
pub fn decode(content: &str) -> Result<Vec<TaskRecord>, serde_json::Error> {
    serde_json::from_str(content)
}

/// Read the snapshot under `key`. Never fails: a missing, unreadable or
/// unparseable snapshot yields an empty list. Unparseable content is copied
/// to the recovery log first.
pub fn load(slot: &dyn Slot, key: &str) -> Vec<TaskRecord> {
    load_raw(slot, key).1
}

/// Like [`load`], also returning the raw content that was read.
fn load_raw(slot: &dyn Slot, key: &str) -> (Option<String>, Vec<TaskRecord>) {
    let content = match slot.get(key) {
        Ok(Some(content)) => content,
        Ok(None) => return (None, Vec::new()),
        Err(e) => {
            if let Some(dir) = slot.recovery_dir() {
                log_recovery(
                    dir,
                    RecoveryEntry::now(RecoveryCategory::Parser, "unreadable snapshot")
                        .field("Key", key)
                        .field("Error", e.to_string()),
                );
            }
            return (None, Vec::new());
        }
    };
    match decode(&content) {
        Ok(records) => (Some(content), records),
        Err(e) => {
            if let Some(dir) = slot.recovery_dir() {
                log_recovery(
                    dir,
                    RecoveryEntry::now(RecoveryCategory::Parser, "unparseable snapshot")
                        .field("Key", key)
                        .field("Error", e.to_string())
                        .body(content.clone()),
                );
            }
            (Some(content), Vec::new())
        }
    }
}

/// The task list bound to its durable slot.
///
/// Every mutation runs under the slot's lock: it first absorbs whatever
/// another process wrote since the last sync, then applies the change by id
/// and writes the whole list back before returning. Mutations that change
/// nothing (blank text, unknown id) do not write.
pub struct TaskStore {
    list: TaskList,
    slot: Box<dyn Slot>,
    key: String,
    /// Content most recently read from or written to the slot
    last_synced: Option<String>,
    /// An external change was absorbed by a mutation and not yet reported
    /// through [`TaskStore::reload`]
    absorbed: bool,
}

impl TaskStore {
    /// Load the snapshot under `key`, starting empty if there is none.
    pub fn open(slot: Box<dyn Slot>, key: impl Into<String>) -> Self {
        let key = key.into();
        let (raw, records) = load_raw(slot.as_ref(), &key);
        TaskStore {
            list: TaskList::from_records(records),
            slot,
            key,
            last_synced: raw,
            absorbed: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    pub fn filter(&self) -> FilterMode {
        self.list.filter
    }

    /// Change the active filter. Not persisted.
    pub fn set_filter(&mut self, mode: FilterMode) {
        self.list.filter = mode;
    }

    /// Tasks visible under the active filter
    pub fn visible(&self) -> Vec<VisibleTask<'_>> {
        filter::visible(self.list.tasks(), self.list.filter)
    }

    pub fn summary(&self) -> Summary {
        summary::summarize(self.list.tasks())
    }

    pub fn add(&mut self, text: &str) -> Result<Option<TaskId>, StoreError> {
        self.apply(|list| task_ops::add_task(list, text), Option::is_some)
    }

    pub fn toggle(&mut self, id: TaskId) -> Result<bool, StoreError> {
        self.apply(|list| task_ops::toggle_task(list, id), |&changed| changed)
    }

    pub fn edit(&mut self, id: TaskId, new_text: &str) -> Result<bool, StoreError> {
        self.apply(
            |list| task_ops::edit_task(list, id, new_text),
            |&changed| changed,
        )
    }

    pub fn remove(&mut self, id: TaskId) -> Result<bool, StoreError> {
        self.apply(
            |list| task_ops::remove_task(list, id).is_some(),
            |&removed| removed,
        )
    }

    pub fn clear_completed(&mut self) -> Result<usize, StoreError> {
        self.apply(task_ops::clear_completed, |&n| n > 0)
    }

    /// Write the whole list to the slot, replacing what was there.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        self.write()
    }

    /// Re-read the slot after it changed underneath us.
    ///
    /// Returns true if the in-memory list changed since the last call, either
    /// here or while a mutation synced before writing. Content equal to what
    /// this store last read or wrote is ignored, and so is content that does
    /// not parse (the current list is kept). Tasks that survive keep their ids.
    pub fn reload(&mut self) -> bool {
        let changed = self.sync();
        changed | std::mem::take(&mut self.absorbed)
    }

    /// Lock, absorb external changes, mutate, and write if `changed` says so.
    fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut TaskList) -> T,
        changed: impl FnOnce(&T) -> bool,
    ) -> Result<T, StoreError> {
        let _guard = self.lock()?;
        if self.sync() {
            self.absorbed = true;
        }
        let out = op(&mut self.list);
        if changed(&out) {
            self.write()?;
        }
        Ok(out)
    }

    fn lock(&self) -> Result<Option<FileLock>, StoreError> {
        self.slot.lock().map_err(|source| StoreError::Lock {
            key: self.key.clone(),
            source,
        })
    }

    /// Merge the slot's content into the list if another process changed it.
    fn sync(&mut self) -> bool {
        let content = match self.slot.get(&self.key) {
            Ok(Some(content)) => content,
            Ok(None) | Err(_) => return false,
        };
        if self.last_synced.as_deref() == Some(content.as_str()) {
            return false;
        }
        let Ok(records) = decode(&content) else {
            return false;
        };
        self.last_synced = Some(content);
        if records == self.list.to_records() {
            return false;
        }
        self.list.merge_records(records);
        true
    }

    fn write(&mut self) -> Result<(), StoreError> {
        let content = encode(&self.list.to_records())?;
        if let Err(e) = self.slot.set(&self.key, &content) {
            if let Some(dir) = self.slot.recovery_dir() {
                log_recovery(
                    dir,
                    RecoveryEntry::now(RecoveryCategory::Write, "snapshot write failed")
                        .field("Key", self.key.as_str())
                        .field("Error", e.to_string())
                        .body(content),
                );
            }
            return Err(StoreError::Write {
                key: self.key.clone(),
                source: e,
            });
        }
        self.last_synced = Some(content);
        Ok(())
    }
}
