//! Persisted sample collection
//!
//! The whole collection is one JSON array under the state directory. It is
//! read once per invocation and rewritten in full on every mutation. A
//! missing or malformed file is treated as an empty collection.

use crate::config::ConfigManager;
use crate::error::{EpilabError, EpilabResult};
use crate::sample::record::Sample;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

/// Sample collection store backed by a single JSON file
pub struct SampleStore {
    path: PathBuf,
}

impl SampleStore {
    /// Open the default store under the state directory
    pub async fn open() -> EpilabResult<Self> {
        ConfigManager::ensure_state_dirs().await?;
        Ok(Self {
            path: ConfigManager::samples_path(),
        })
    }

    /// Open a store at a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the full collection, defaulting to empty on missing or bad data
    pub async fn load(&self) -> EpilabResult<Vec<Sample>> {
        if !self.path.exists() {
            debug!("Sample store not found at {}, starting empty", self.path.display());
            return Ok(vec![]);
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| EpilabError::io(format!("reading {}", self.path.display()), e))?;

        match serde_json::from_str(&content) {
            Ok(samples) => Ok(samples),
            Err(e) => {
                warn!("Malformed sample store at {}: {}", self.path.display(), e);
                Ok(vec![])
            }
        }
    }

    /// Rewrite the full collection
    pub async fn save(&self, samples: &[Sample]) -> EpilabResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| EpilabError::io("creating state directory", e))?;
        }

        let content = serde_json::to_string_pretty(samples)?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| EpilabError::StorePersist(format!("{}: {}", self.path.display(), e)))?;

        debug!("Persisted {} sample(s) to {}", samples.len(), self.path.display());
        Ok(())
    }

    /// Store file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
