//! Add command - record a new incubation

use crate::cli::args::AddArgs;
use crate::config::Config;
use crate::error::{EpilabError, EpilabResult};
use crate::sample::{record, Sample, SampleStore};
use crate::ui::{self, UiContext};
use chrono::{Duration, Utc};

/// Execute the add command
pub async fn execute(args: AddArgs, _config: &Config) -> EpilabResult<()> {
    let ctx = UiContext::detect();

    let name = args.name.trim().to_string();
    if name.is_empty() {
        return Err(EpilabError::User("Sample name must not be empty".to_string()));
    }

    let start = args.start.unwrap_or_else(Utc::now);
    let end = match args.end {
        Some(end) => end,
        None => {
            start
                + Duration::hours(i64::from(args.hours))
                + Duration::minutes(i64::from(args.minutes))
        }
    };

    let mut sample = Sample::new(name, start, end);
    sample.temperature = normalize(args.temperature);
    sample.location = normalize(args.location);
    sample.notes = normalize(args.notes);

    let store = SampleStore::open().await?;
    let samples = store.load().await?;
    let samples = record::upsert(samples, sample.clone());
    store.save(&samples).await?;

    ui::step_ok_detail(
        &ctx,
        &format!("Added incubation: {}", sample.name),
        &sample.id.to_string()[..8],
    );
    ui::key_value(&ctx, "Ends", &sample.end.format("%Y-%m-%d %H:%M UTC").to_string());

    Ok(())
}

/// Trim an optional field; empty becomes None
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_drops_empty() {
        assert_eq!(normalize(Some("  30C ".to_string())), Some("30C".to_string()));
        assert_eq!(normalize(Some("   ".to_string())), None);
        assert_eq!(normalize(None), None);
    }
}
