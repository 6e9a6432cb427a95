//! Offline cache proxy
//!
//! Serves requests from network or a durable key-value cache so the
//! tracker stays usable without connectivity. Navigations always resolve
//! to a page; other resources fall back to their last cached response.

pub mod fetch;
pub mod policy;
pub mod store;

pub use fetch::{Fetcher, HttpFetcher, ProxyRequest, RequestKind};
pub use policy::{prune_stale_stores, CacheProxy, OFFLINE_HTML};
pub use store::{CacheStore, CachedResponse, DiskCacheStore, MemoryCacheStore, OFFLINE_KEY};
