use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug)]
pub enum FileEvent {
    /// The snapshot file was created, rewritten or removed.
    SnapshotChanged(PathBuf),
}

/// Watches the data directory for changes to one snapshot file.
pub struct SnapshotWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl SnapshotWatcher {
    /// Start watching `snapshot` (a file inside `data_dir`).
    /// Call [`poll`](Self::poll) each tick to drain events.
    pub fn start(data_dir: &Path, snapshot: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let target_name = snapshot.file_name().map(|n| n.to_os_string());

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                // Atomic writes land as a rename of a temp file onto the
                // snapshot name, so match on the final file name only.
                for path in event.paths {
                    if path.file_name().map(|n| n.to_os_string()) == target_name {
                        let _ = tx.send(FileEvent::SnapshotChanged(path));
                        break;
                    }
                }
            },
            Config::default(),
        )?;

        watcher.watch(data_dir, RecursiveMode::NonRecursive)?;
        Ok(SnapshotWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending events. Returns all queued events
    /// (may be empty).
    pub fn poll(&self) -> Vec<FileEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}
