use std::fs;
use std::path::{Path, PathBuf};

use crate::model::workspace::Workspace;

use super::config_io;

/// Name of the data directory looked for in the working directory and its
/// ancestors
pub const DATA_DIR_NAME: &str = ".ticklist";

/// Error type for workspace I/O operations
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("no .ticklist/ directory found (run `tk init` to create one)")]
    NotFound,
    #[error("{0} already exists (use --force to reinitialize)")]
    AlreadyExists(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("invalid config.toml: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Find the workspace root by walking up from `start`, looking for a
/// `.ticklist/` subdirectory.
pub fn discover_workspace(start: &Path) -> Result<PathBuf, WorkspaceError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(DATA_DIR_NAME).is_dir() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(WorkspaceError::NotFound);
        }
    }
}

/// Load the workspace rooted at `root` (the directory containing `.ticklist/`).
pub fn load_workspace(root: &Path) -> Result<Workspace, WorkspaceError> {
    let data_dir = root.join(DATA_DIR_NAME);
    if !data_dir.is_dir() {
        return Err(WorkspaceError::NotFound);
    }
    let config = config_io::read_config(&data_dir)?;
    Ok(Workspace {
        root: root.to_path_buf(),
        data_dir,
        config,
    })
}

/// Discover and load the workspace enclosing `start`.
pub fn open_workspace(start: &Path) -> Result<Workspace, WorkspaceError> {
    let root = discover_workspace(start)?;
    load_workspace(&root)
}

/// Create `.ticklist/` under `root` with a default config file. With
/// `force`, an existing directory is reused and its config is left alone.
pub fn create_workspace(root: &Path, force: bool) -> Result<Workspace, WorkspaceError> {
    let data_dir = root.join(DATA_DIR_NAME);
    if data_dir.exists() && !force {
        return Err(WorkspaceError::AlreadyExists(data_dir));
    }
    fs::create_dir_all(&data_dir)?;
    if !config_io::config_path(&data_dir).exists() {
        config_io::write_default_config(&data_dir)?;
    }
    load_workspace(root)
}
