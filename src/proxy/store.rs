//! Durable key-value store for cached responses
//!
//! Keys map to the most recently stored response; writes overwrite with
//! last-writer-wins semantics per key and there is no expiry. The disk
//! store names entry files by the SHA-256 of the key so arbitrary URLs
//! stay filesystem-safe.

use crate::error::{EpilabError, EpilabResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::fs;
use tracing::debug;

/// Reserved key holding the static offline document
pub const OFFLINE_KEY: &str = "offline";

/// A cached response body with the headers worth keeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// HTTP status code observed when the entry was stored
    pub status: u16,

    /// Content-Type header, if the origin sent one
    pub content_type: Option<String>,

    /// Response body bytes
    pub body: Vec<u8>,
}

impl CachedResponse {
    /// Build an HTML response with 200 semantics
    pub fn html(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: Some("text/html".to_string()),
            body: body.into(),
        }
    }

    /// Whether the stored status was a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Key-value persistence behind the cache proxy
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up an entry by key
    async fn get(&self, key: &str) -> EpilabResult<Option<CachedResponse>>;

    /// Store an entry, overwriting any previous value for the key
    async fn put(&self, key: &str, response: &CachedResponse) -> EpilabResult<()>;

    /// List stored keys
    async fn keys(&self) -> EpilabResult<Vec<String>>;

    /// Drop every entry
    async fn clear(&self) -> EpilabResult<()>;
}

/// Disk-backed store under a versioned cache directory
pub struct DiskCacheStore {
    dir: PathBuf,
}

impl DiskCacheStore {
    /// Open a store rooted at `root/<name>` (created on first write)
    pub fn open(root: PathBuf, name: &str) -> Self {
        Self {
            dir: root.join(name),
        }
    }

    /// The store directory
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    fn key_index_path(&self) -> PathBuf {
        self.dir.join("keys.json")
    }

    /// Record `key` in the key index so `keys()` can report it.
    ///
    /// Last-writer-wins is acceptable here: a lost index write only hides
    /// a key from listings, never from lookups.
    async fn index_key(&self, key: &str) -> EpilabResult<()> {
        let mut keys = self.read_index().await?;
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
            let content = serde_json::to_string_pretty(&keys)?;
            fs::write(self.key_index_path(), content)
                .await
                .map_err(|e| EpilabError::io("writing cache key index", e))?;
        }
        Ok(())
    }

    async fn read_index(&self) -> EpilabResult<Vec<String>> {
        let path = self.key_index_path();
        if !path.exists() {
            return Ok(vec![]);
        }
        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| EpilabError::io("reading cache key index", e))?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }
}

#[async_trait]
impl CacheStore for DiskCacheStore {
    async fn get(&self, key: &str) -> EpilabResult<Option<CachedResponse>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read(&path).await.map_err(|e| EpilabError::CacheRead {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        let entry = serde_json::from_slice(&content).map_err(|e| EpilabError::CacheRead {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Some(entry))
    }

    async fn put(&self, key: &str, response: &CachedResponse) -> EpilabResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| EpilabError::io(format!("creating cache dir {}", self.dir.display()), e))?;

        let content = serde_json::to_vec(response)?;
        fs::write(self.entry_path(key), content)
            .await
            .map_err(|e| EpilabError::CacheWrite {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        self.index_key(key).await?;
        debug!("Cached entry for key: {}", key);
        Ok(())
    }

    async fn keys(&self) -> EpilabResult<Vec<String>> {
        self.read_index().await
    }

    async fn clear(&self) -> EpilabResult<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)
                .await
                .map_err(|e| EpilabError::io(format!("clearing cache {}", self.dir.display()), e))?;
        }
        Ok(())
    }
}

/// In-memory store, used as a test double for the proxy policy
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, CachedResponse>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> EpilabResult<Option<CachedResponse>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, response: &CachedResponse) -> EpilabResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), response.clone());
        Ok(())
    }

    async fn keys(&self) -> EpilabResult<Vec<String>> {
        Ok(self.entries.lock().unwrap().keys().cloned().collect())
    }

    async fn clear(&self) -> EpilabResult<()> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}
