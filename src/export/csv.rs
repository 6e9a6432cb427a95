//! Tabular (.csv) export
//!
//! The header row is plain; every data field is double-quote-wrapped
//! with internal quotes doubled, and embedded newlines in notes are
//! collapsed to spaces.

use crate::error::{EpilabError, EpilabResult};
use crate::sample::Sample;
use chrono::SecondsFormat;
use csv::{QuoteStyle, WriterBuilder};

/// Collapse embedded line breaks to single spaces
fn flatten_newlines(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Fixed header row, written unquoted
const HEADER: &str = "Name,Start,End,Temperature,Location,Notes";

/// Serialize the collection as CSV with a fixed header row.
///
/// Rejects an empty collection so no empty file is ever produced.
pub fn csv_for_samples(samples: &[Sample]) -> EpilabResult<String> {
    if samples.is_empty() {
        return Err(EpilabError::ExportEmpty);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    for sample in samples {
        writer.write_record([
            sample.name.clone(),
            sample.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            sample.end.to_rfc3339_opts(SecondsFormat::Secs, true),
            sample.temperature.clone().unwrap_or_default(),
            sample.location.clone().unwrap_or_default(),
            flatten_newlines(&sample.notes.clone().unwrap_or_default()),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EpilabError::Internal(format!("flushing csv writer: {}", e)))?;

    let rows = String::from_utf8(bytes)
        .map_err(|e| EpilabError::Internal(format!("csv not utf-8: {}", e)))?;

    Ok(format!("{}\n{}", HEADER, rows))
}
