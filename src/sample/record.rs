//! Sample record and pure collection operations
//!
//! The collection is an explicit `Vec<Sample>` passed through pure update
//! functions; persistence lives in [`crate::sample::store`].

use crate::error::{EpilabError, EpilabResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single tracked incubation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Unique id, generated at creation, immutable
    pub id: Uuid,

    /// Display label, non-empty
    pub name: String,

    /// Scheduled start of the incubation
    pub start: DateTime<Utc>,

    /// Scheduled end of the incubation
    pub end: DateTime<Utc>,

    /// Target temperature, free text (e.g. "30C", "RT")
    pub temperature: Option<String>,

    /// Where the sample sits (e.g. "Incubator B2")
    pub location: Option<String>,

    /// Free-text notes
    pub notes: Option<String>,

    /// Fixed at first creation, preserved across edits
    pub created_at: DateTime<Utc>,
}

impl Sample {
    /// Create a new sample with a fresh id
    pub fn new(name: String, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            start,
            end,
            temperature: None,
            location: None,
            notes: None,
            created_at: Utc::now(),
        }
    }
}

/// Insert or replace a sample by id, returning the updated collection
pub fn upsert(mut samples: Vec<Sample>, sample: Sample) -> Vec<Sample> {
    match samples.iter_mut().find(|s| s.id == sample.id) {
        Some(existing) => *existing = sample,
        None => samples.push(sample),
    }
    samples
}

/// Remove a sample by id, returning the updated collection
pub fn remove(samples: Vec<Sample>, id: Uuid) -> Vec<Sample> {
    samples.into_iter().filter(|s| s.id != id).collect()
}

/// Copy a sample: fresh id, `created_at` reset to `now`, name marked as a copy
pub fn duplicate(source: &Sample, now: DateTime<Utc>) -> Sample {
    Sample {
        id: Uuid::new_v4(),
        name: format!("{} (copy)", source.name),
        created_at: now,
        ..source.clone()
    }
}

/// Sort for display: soonest end first
pub fn sorted_by_end(mut samples: Vec<Sample>) -> Vec<Sample> {
    samples.sort_by_key(|s| s.end);
    samples
}

/// Resolve a sample by id prefix or exact name.
///
/// Exact name matches win; otherwise the needle must prefix exactly one id.
pub fn find<'a>(samples: &'a [Sample], needle: &str) -> EpilabResult<&'a Sample> {
    if let Some(s) = samples.iter().find(|s| s.name == needle) {
        return Ok(s);
    }

    let matches: Vec<&Sample> = samples
        .iter()
        .filter(|s| s.id.to_string().starts_with(needle))
        .collect();

    match matches.len() {
        0 => Err(EpilabError::SampleNotFound(needle.to_string())),
        1 => Ok(matches[0]),
        n => Err(EpilabError::SampleAmbiguous {
            needle: needle.to_string(),
            count: n,
        }),
    }
}

/// Case-insensitive free-text match over name, temperature, location, notes
pub fn matches_query(sample: &Sample, query: &str) -> bool {
    let query = query.to_lowercase();
    let haystack = [
        Some(sample.name.as_str()),
        sample.temperature.as_deref(),
        sample.location.as_deref(),
        sample.notes.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase();

    haystack.contains(&query)
}
