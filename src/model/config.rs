use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from `.ticklist/config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Slot key the task snapshot is stored under
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig { key: default_key() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a deleted row stays on screen before it is removed
    #[serde(default = "default_delete_delay_ms")]
    pub delete_delay_ms: u64,
    #[serde(default)]
    pub show_key_hints: bool,
    /// Hex color overrides, keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            delete_delay_ms: default_delete_delay_ms(),
            show_key_hints: false,
            colors: HashMap::new(),
        }
    }
}

impl Config {
    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), String> {
        self.storage.validate()
    }
}

impl StorageConfig {
    /// The key names a file inside `.ticklist/`, so it must be a plain,
    /// non-hidden file name.
    pub fn validate(&self) -> Result<(), String> {
        let key = self.key.as_str();
        if key.trim().is_empty() {
            return Err("storage.key must not be empty".to_string());
        }
        if key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(format!(
                "storage.key \"{}\" must be a plain name (no path separators or leading dot)",
                key
            ));
        }
        Ok(())
    }
}

/// Default: see the `init` template
fn default_key() -> String {
    "tasks".to_string()
}

/// Default: see the `init` template
fn default_delete_delay_ms() -> u64 {
    300
}
