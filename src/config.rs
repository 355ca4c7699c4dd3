use crate::constants;
use crate::error::{Result, SyncError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Directory scanned for pending account files
    pub drop_dir: String,
    /// Path to the external account-management binary
    pub manager_bin: String,
    /// Pause between provisioning commands, in milliseconds
    pub pause_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            drop_dir: constants::DEFAULT_DROP_DIR.to_string(),
            manager_bin: constants::DEFAULT_MANAGER_BIN.to_string(),
            pause_ms: constants::DEFAULT_PAUSE_MS,
        }
    }
}

impl Config {
    /// Loads configuration from the given TOML file. A missing file is
    /// not an error; the built-in defaults apply.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_content = fs::read_to_string(path).map_err(|e| {
            SyncError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
