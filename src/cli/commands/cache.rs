//! Cache command - inspect or clear the offline cache store

use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::{Config, ConfigManager};
use crate::error::EpilabResult;
use crate::proxy::{CacheStore, DiskCacheStore, OFFLINE_HTML, OFFLINE_KEY};
use crate::ui::{self, UiContext};

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> EpilabResult<()> {
    let store = DiskCacheStore::open(ConfigManager::cache_root(), &config.cache.name);

    match args.action {
        CacheAction::Info => info(&store).await,
        CacheAction::Clear { yes } => clear(&store, yes).await,
        CacheAction::Offline => {
            println!("{}", OFFLINE_HTML);
            Ok(())
        }
    }
}

async fn info(store: &DiskCacheStore) -> EpilabResult<()> {
    let ctx = UiContext::detect();
    let keys = store.keys().await?;
    let seeded = store.get(OFFLINE_KEY).await?.is_some();

    ui::key_value(&ctx, "Store", &store.dir().display().to_string());
    ui::key_value(&ctx, "Entries", &keys.len().to_string());
    ui::key_value(&ctx, "Offline page seeded", if seeded { "yes" } else { "no" });

    for key in keys {
        ui::remark(&ctx, &key);
    }

    Ok(())
}

async fn clear(store: &DiskCacheStore, yes: bool) -> EpilabResult<()> {
    let ctx = UiContext::detect().with_auto_yes(yes);

    let approved = ui::confirm(&ctx, "Clear every cached entry?", false).await?;
    if !approved {
        ui::step_info(&ctx, "Aborted, cache untouched");
        return Ok(());
    }

    store.clear().await?;
    ui::step_ok(&ctx, "Cache cleared");
    Ok(())
}
