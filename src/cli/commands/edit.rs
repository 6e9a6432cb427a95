//! Edit command - mutate an incubation in place
//!
//! Every field but `id` and `created_at` is replaceable. Passing an empty
//! string to an optional field clears it.

use crate::cli::args::EditArgs;
use crate::config::Config;
use crate::error::{EpilabError, EpilabResult};
use crate::sample::{record, SampleStore};
use crate::ui::{self, UiContext};
use chrono::Duration;

/// Execute the edit command
pub async fn execute(args: EditArgs, _config: &Config) -> EpilabResult<()> {
    let ctx = UiContext::detect();

    let store = SampleStore::open().await?;
    let samples = store.load().await?;

    let mut sample = record::find(&samples, &args.sample)?.clone();

    if let Some(name) = &args.name {
        let name = name.trim();
        if name.is_empty() {
            return Err(EpilabError::User("Sample name must not be empty".to_string()));
        }
        sample.name = name.to_string();
    }

    if let Some(start) = args.start {
        sample.start = start;
    }

    if let Some(end) = args.end {
        sample.end = end;
    } else if args.hours.is_some() || args.minutes.is_some() {
        sample.end = sample.start
            + Duration::hours(i64::from(args.hours.unwrap_or(0)))
            + Duration::minutes(i64::from(args.minutes.unwrap_or(0)));
    }

    apply_optional(&mut sample.temperature, args.temperature);
    apply_optional(&mut sample.location, args.location);
    apply_optional(&mut sample.notes, args.notes);

    let id = sample.id;
    let samples = record::upsert(samples, sample.clone());
    store.save(&samples).await?;

    ui::step_ok_detail(
        &ctx,
        &format!("Updated incubation: {}", sample.name),
        &id.to_string()[..8],
    );

    Ok(())
}

/// Replace an optional field when a new value was given; empty clears it
fn apply_optional(field: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value {
        let v = v.trim().to_string();
        *field = if v.is_empty() { None } else { Some(v) };
    }
}
