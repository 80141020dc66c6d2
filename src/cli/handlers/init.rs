use std::path::PathBuf;

use crate::cli::commands::InitArgs;
use crate::io::store::{TaskStore, encode};
use crate::io::slot::{DirSlot, Slot};
use crate::io::workspace_io::{self, DATA_DIR_NAME};

/// Create `.ticklist/` in the working directory (or `-C` directory).
pub fn cmd_init(args: InitArgs, dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };

    // Warn about an enclosing workspace that will now be shadowed
    if let Some(parent) = root.parent()
        && let Ok(parent_root) = workspace_io::discover_workspace(parent)
    {
        eprintln!(
            "note: enclosing workspace found at {}/",
            parent_root.join(DATA_DIR_NAME).display()
        );
    }

    let workspace = workspace_io::create_workspace(&root, args.force)?;

    // Seed an empty snapshot so the data directory is complete from the start
    let key = &workspace.config.storage.key;
    let mut slot = DirSlot::new(&workspace.data_dir);
    if slot.get(key)?.is_none() {
        slot.set(key, &encode(&[])?)?;
    }
    let store = TaskStore::open(Box::new(slot), key.clone());

    println!(
        "initialized {}/ ({} tasks)",
        workspace.data_dir.display(),
        store.list().len()
    );
    Ok(())
}
