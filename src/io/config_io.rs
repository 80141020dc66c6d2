use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

use super::workspace_io::WorkspaceError;

const CONFIG_TEMPLATE: &str = r##"# ticklist configuration

[storage]
# Slot key; tasks are stored in .ticklist/<key>.json
key = "tasks"

[ui]
# How long a deleted task stays on screen (in milliseconds) before removal
delete_delay_ms = 300
# show_key_hints = false
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
# green = "#44FF88"
# red = "#FF4444"
"##;

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Read `config.toml`, falling back to defaults if the file does not exist.
pub fn read_config(data_dir: &Path) -> Result<Config, WorkspaceError> {
    let path = config_path(data_dir);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(WorkspaceError::ReadError { path, source: e }),
    };
    let config: Config = toml::from_str(&text)?;
    config.validate().map_err(WorkspaceError::InvalidConfig)?;
    Ok(config)
}

/// Write the commented default config
pub fn write_default_config(data_dir: &Path) -> Result<(), WorkspaceError> {
    fs::write(config_path(data_dir), CONFIG_TEMPLATE)?;
    Ok(())
}
