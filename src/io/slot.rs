use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::lock::FileLock;
use super::recovery::atomic_write;

/// A durable key-value slot holding serialized snapshots.
pub trait Slot {
    /// Read the value stored under `key`. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;

    /// Take the cross-process lock guarding read-modify-write cycles on this
    /// slot. Slots shared with no other process return `None`.
    fn lock(&self) -> io::Result<Option<FileLock>> {
        Ok(None)
    }

    /// Directory that recovery entries for this slot are logged to.
    fn recovery_dir(&self) -> Option<&Path> {
        None
    }
}

/// Slot backed by one JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct DirSlot {
    dir: PathBuf,
    locking: bool,
}

impl DirSlot {
    /// Slot that writes without taking the directory lock (the caller holds it)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirSlot {
            dir: dir.into(),
            locking: false,
        }
    }

    /// Slot whose `lock` takes the directory lock
    pub fn locking(dir: impl Into<PathBuf>) -> Self {
        DirSlot {
            dir: dir.into(),
            locking: true,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the value for `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Slot for DirSlot {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        atomic_write(&self.path_for(key), value.as_bytes())
    }

    fn lock(&self) -> io::Result<Option<FileLock>> {
        if !self.locking {
            return Ok(None);
        }
        FileLock::acquire_default(&self.dir)
            .map(Some)
            .map_err(io::Error::other)
    }

    fn recovery_dir(&self) -> Option<&Path> {
        Some(&self.dir)
    }
}

/// In-process slot. Values live only as long as the slot.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    values: HashMap<String, String>,
    fail_writes: bool,
}

impl MemorySlot {
    pub fn new() -> Self {
        MemorySlot::default()
    }

    /// Slot pre-filled with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut slot = MemorySlot::new();
        slot.values.insert(key.to_string(), value.to_string());
        slot
    }

    /// Slot whose writes always fail
    pub fn failing() -> Self {
        MemorySlot {
            fail_writes: true,
            ..MemorySlot::default()
        }
    }
}

impl Slot for MemorySlot {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::other("slot is read-only"));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
