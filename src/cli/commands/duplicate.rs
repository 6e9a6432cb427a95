//! Duplicate command - copy an incubation under a fresh id

use crate::cli::args::DuplicateArgs;
use crate::config::Config;
use crate::error::EpilabResult;
use crate::sample::{record, SampleStore};
use crate::ui::{self, UiContext};
use chrono::Utc;

/// Execute the duplicate command
pub async fn execute(args: DuplicateArgs, _config: &Config) -> EpilabResult<()> {
    let ctx = UiContext::detect();

    let store = SampleStore::open().await?;
    let samples = store.load().await?;

    let source = record::find(&samples, &args.sample)?;
    let copy = record::duplicate(source, Utc::now());

    let detail = copy.id.to_string()[..8].to_string();
    let name = copy.name.clone();
    let samples = record::upsert(samples, copy);
    store.save(&samples).await?;

    ui::step_ok_detail(&ctx, &format!("Duplicated as: {}", name), &detail);
    Ok(())
}
