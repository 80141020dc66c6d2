use std::path::PathBuf;

use super::config::Config;

/// A discovered ticklist data directory and its configuration
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Directory containing `.ticklist/`
    pub root: PathBuf,
    /// Path to the `.ticklist/` directory
    pub data_dir: PathBuf,
    /// Parsed config.toml (defaults if absent)
    pub config: Config,
}
