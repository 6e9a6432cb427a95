//! Remove command - delete an incubation after confirmation

use crate::cli::args::RemoveArgs;
use crate::config::Config;
use crate::error::EpilabResult;
use crate::sample::{record, SampleStore};
use crate::ui::{self, UiContext};

/// Execute the remove command
pub async fn execute(args: RemoveArgs, _config: &Config) -> EpilabResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);

    let store = SampleStore::open().await?;
    let samples = store.load().await?;

    let sample = record::find(&samples, &args.sample)?.clone();

    // No undo, so default to abort unless explicitly approved
    let approved = ui::confirm(
        &ctx,
        &format!("Delete incubation '{}'? This cannot be undone.", sample.name),
        false,
    )
    .await?;

    if !approved {
        ui::step_info(&ctx, "Aborted, nothing deleted");
        return Ok(());
    }

    let samples = record::remove(samples, sample.id);
    store.save(&samples).await?;

    ui::step_ok(&ctx, &format!("Deleted incubation: {}", sample.name));
    Ok(())
}
