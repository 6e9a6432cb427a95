//! Configuration management for EpiLab

pub mod schema;

pub use schema::Config;

use crate::error::{EpilabError, EpilabResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("epilab")
            .join("config.toml")
    }

    /// Get the state directory path
    ///
    /// `EPILAB_STATE_DIR` overrides the platform default so tests and
    /// scripts can run against an isolated directory.
    pub fn state_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("EPILAB_STATE_DIR") {
            return PathBuf::from(dir);
        }
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("epilab")
    }

    /// Path of the persisted sample collection
    pub fn samples_path() -> PathBuf {
        Self::state_dir().join("samples.json")
    }

    /// Root directory for offline cache stores (one subdirectory per version)
    pub fn cache_root() -> PathBuf {
        Self::state_dir().join("cache")
    }

    /// Load configuration, creating default if not exists
    pub async fn load(&self) -> EpilabResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> EpilabResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| EpilabError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| EpilabError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> EpilabResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            EpilabError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> EpilabResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| EpilabError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Ensure all state directories exist
    pub async fn ensure_state_dirs() -> EpilabResult<()> {
        let dirs = [Self::state_dir(), Self::cache_root()];

        for dir in &dirs {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| EpilabError::io(format!("creating directory {}", dir.display()), e))?;
        }

        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
