use crate::models::UserConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Configuration manager for loading and saving the YAML user config.
///
/// Manages a single file, `Quickcalc Config.yaml`, holding the theme
/// preference and display timing settings. The calculation history lives in
/// its own JSON file next to it (see [`crate::history::HistoryStore`]).
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    user_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing the data files (e.g., "Quickcalc Data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            user_config_path: config_dir.join("Quickcalc Config.yaml"),
            config_dir,
        })
    }

    /// Load the user configuration file.
    ///
    /// A missing, unreadable or unparsable file yields the defaults -
    /// malformed persisted preferences are treated as absent, never as a
    /// startup failure.
    pub fn load_user_config(&self) -> UserConfig {
        if !self.user_config_path.exists() {
            tracing::warn!(
                "User config file not found at {}, using defaults",
                self.user_config_path
            );
            return UserConfig::default();
        }

        let file_contents = match fs::read_to_string(&self.user_config_path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(
                    "Failed to read user config {}, using defaults: {}",
                    self.user_config_path,
                    e
                );
                return UserConfig::default();
            }
        };

        match serde_yaml_ng::from_str::<UserConfig>(&file_contents) {
            Ok(config) => {
                tracing::info!("Loaded user config from {}", self.user_config_path);
                config
            }
            Err(e) => {
                tracing::warn!(
                    "User config {} is unparsable, using defaults: {}",
                    self.user_config_path,
                    e
                );
                UserConfig::default()
            }
        }
    }

    /// Save the user configuration file.
    ///
    /// # Arguments
    /// * `config` - The UserConfig to save
    pub fn save_user_config(&self, config: &UserConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize user config to YAML")?;

        fs::write(&self.user_config_path, yaml_string)
            .with_context(|| format!("Failed to write user config: {}", self.user_config_path))?;

        tracing::info!("Saved user config to {}", self.user_config_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}
