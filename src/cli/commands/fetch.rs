//! Fetch command - resolve a URL through the offline cache proxy

use crate::cli::args::FetchArgs;
use crate::config::{Config, ConfigManager};
use crate::error::{EpilabError, EpilabResult};
use crate::proxy::{prune_stale_stores, CacheProxy, DiskCacheStore, HttpFetcher, ProxyRequest, RequestKind};
use crate::ui::{TaskSpinner, UiContext};
use std::io::Write;
use std::time::Duration;
use tokio::fs;
use tracing::debug;

/// Execute the fetch command
pub async fn execute(args: FetchArgs, config: &Config) -> EpilabResult<()> {
    if !args.url.starts_with("http://") && !args.url.starts_with("https://") {
        return Err(EpilabError::UrlInvalid(args.url));
    }

    let ctx = UiContext::detect();

    let store = DiskCacheStore::open(ConfigManager::cache_root(), &config.cache.name);
    let fetcher = HttpFetcher::new(Duration::from_secs(config.cache.timeout_secs))?;
    let proxy = CacheProxy::new(store, fetcher);

    // Activation: abandon stores from earlier version tokens, then seed
    // the offline document before serving anything.
    if config.cache.prune_stale {
        let pruned = prune_stale_stores(&ConfigManager::cache_root(), &config.cache.name).await?;
        if pruned > 0 {
            debug!("Pruned {} stale cache store(s)", pruned);
        }
    }
    proxy.install().await?;

    let request = ProxyRequest {
        method: args.method.to_uppercase(),
        url: args.url.clone(),
        kind: if args.navigate {
            RequestKind::Navigation
        } else {
            RequestKind::Resource
        },
    };

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Fetching {}", request.url));

    let response = match proxy.handle(&request).await {
        Ok(response) => {
            spinner.stop(&format!("{} {}", response.status, request.url));
            response
        }
        Err(e) => {
            spinner.stop_error("Fetch failed and no cached copy exists");
            return Err(e);
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &response.body)
                .await
                .map_err(|e| EpilabError::io(format!("writing {}", path.display()), e))?;
        }
        None => {
            let mut stdout = std::io::stdout();
            stdout
                .write_all(&response.body)
                .and_then(|_| stdout.flush())
                .map_err(|e| EpilabError::io("writing response body", e))?;
        }
    }

    Ok(())
}
