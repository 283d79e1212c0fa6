//! Settings manager: owns the active config and knows where it lives on disk.

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "sketchkit";
const CONFIG_FILE: &str = "config.toml";

/// Holds the active configuration together with its backing file.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: Config,
    path: PathBuf,
}

impl SettingsManager {
    /// Manager for an explicit config file path, starting from defaults.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::default(),
            path: path.into(),
        }
    }

    /// Manager for the platform config location
    /// (`<config_dir>/sketchkit/config.toml`).
    pub fn new() -> SettingsResult<Self> {
        Ok(Self::with_path(Self::default_config_path()?))
    }

    /// Platform-specific config directory for SketchKit.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    pub fn default_config_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load the config file. A missing file keeps the defaults; an invalid
    /// file is an error.
    pub fn load(&mut self) -> SettingsResult<&Config> {
        if self.path.exists() {
            self.config = Config::load_from_file(&self.path)?;
        } else {
            tracing::info!(
                "No config at {}, using defaults",
                self.path.display()
            );
            self.config = Config::default();
        }
        Ok(&self.config)
    }

    /// Write the active config, creating the parent directory if needed.
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
                })?;
            }
        }
        self.config.save_to_file(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}
