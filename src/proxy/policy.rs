//! Cache proxy policy
//!
//! Navigation requests resolve network-first with an offline-page
//! fallback and are never cached; other GET requests resolve
//! network-first with their last successful response as the fallback.
//! Each request is handled independently; the store's per-key
//! last-writer-wins is the only coordination between them.

use crate::error::{EpilabError, EpilabResult};
use crate::proxy::fetch::{Fetcher, ProxyRequest, RequestKind};
use crate::proxy::store::{CacheStore, CachedResponse, OFFLINE_KEY};
use tokio::fs;
use tracing::{debug, info, warn};

/// Static offline page, self-contained so it renders without any
/// subordinate resource. Served byte-identical whether seeded in the
/// cache or synthesized inline.
pub const OFFLINE_HTML: &str = concat!(
    "<!doctype html><meta charset=\"utf-8\">",
    "<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">",
    "<title>Offline - EpiLab</title>",
    "<style>body{font-family:system-ui,sans-serif;padding:2rem;background:#0b1220;color:#d1e5ff}",
    ".card{max-width:600px;margin:0 auto;background:#121a2b;border:1px solid #2b3a5a;",
    "border-radius:16px;padding:1rem}.muted{color:#9db4d1}</style>",
    "<div class=\"card\"><h1>You're offline</h1>",
    "<p class=\"muted\">Your incubations are saved locally and will sync when ",
    "you're back online. Calendar links need internet.</p></div>"
);

/// Offline-capable fetch proxy over a cache store and a transport
pub struct CacheProxy<S: CacheStore, F: Fetcher> {
    store: S,
    fetcher: F,
}

impl<S: CacheStore, F: Fetcher> CacheProxy<S, F> {
    pub fn new(store: S, fetcher: F) -> Self {
        Self { store, fetcher }
    }

    /// Seed the reserved offline entry. Must run before the proxy serves
    /// navigations so the fallback page is durably available.
    pub async fn install(&self) -> EpilabResult<()> {
        self.store
            .put(OFFLINE_KEY, &CachedResponse::html(OFFLINE_HTML))
            .await?;
        debug!("Seeded offline document");
        Ok(())
    }

    /// Handle one request according to its kind
    pub async fn handle(&self, request: &ProxyRequest) -> EpilabResult<CachedResponse> {
        match request.kind {
            RequestKind::Navigation => self.handle_navigation(request).await,
            RequestKind::Resource => self.handle_resource(request).await,
        }
    }

    /// Navigation: network first, offline page on failure. Never fails.
    async fn handle_navigation(&self, request: &ProxyRequest) -> EpilabResult<CachedResponse> {
        match self.fetcher.fetch(request).await {
            Ok(response) => Ok(response),
            Err(e) => {
                info!("Navigation fetch failed ({}), serving offline page", e);
                match self.store.get(OFFLINE_KEY).await {
                    Ok(Some(cached)) => Ok(cached),
                    // Seed missing or unreadable: synthesize the same document
                    _ => Ok(CachedResponse::html(OFFLINE_HTML)),
                }
            }
        }
    }

    /// Resource: network first; cache successful GETs; fall back to the
    /// cached entry, propagating the failure when there is none.
    async fn handle_resource(&self, request: &ProxyRequest) -> EpilabResult<CachedResponse> {
        let key = request.cache_key();

        match self.fetcher.fetch(request).await {
            Ok(response) => {
                if request.is_get() && response.is_success() {
                    if let Err(e) = self.store.put(&key, &response).await {
                        warn!("Failed to cache {}: {}", key, e);
                    }
                }
                Ok(response)
            }
            Err(e) => match self.store.get(&key).await? {
                Some(cached) => {
                    info!("Fetch failed ({}), serving cached entry for {}", e, key);
                    Ok(cached)
                }
                None => Err(e),
            },
        }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Remove sibling cache stores left behind by earlier version tokens.
///
/// Runs at install time; only `current` survives.
pub async fn prune_stale_stores(root: &std::path::Path, current: &str) -> EpilabResult<usize> {
    if !root.exists() {
        return Ok(0);
    }

    let mut pruned = 0;
    let mut entries = fs::read_dir(root)
        .await
        .map_err(|e| EpilabError::io(format!("reading cache root {}", root.display()), e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| EpilabError::io("reading cache root entry", e))?
    {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if path.file_name().is_some_and(|n| n != current) {
            fs::remove_dir_all(&path)
                .await
                .map_err(|e| EpilabError::io(format!("pruning stale cache {}", path.display()), e))?;
            info!("Pruned stale cache store: {}", path.display());
            pruned += 1;
        }
    }

    Ok(pruned)
}
