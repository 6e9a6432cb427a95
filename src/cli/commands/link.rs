//! Link command - print an external calendar deep link

use crate::cli::args::LinkArgs;
use crate::config::Config;
use crate::error::EpilabResult;
use crate::export::google_calendar_url;
use crate::sample::{record, SampleStore};

/// Execute the link command
pub async fn execute(args: LinkArgs, _config: &Config) -> EpilabResult<()> {
    let store = SampleStore::open().await?;
    let samples = store.load().await?;

    let sample = record::find(&samples, &args.sample)?;
    println!("{}", google_calendar_url(sample));

    Ok(())
}
