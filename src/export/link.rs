//! External calendar deep link
//!
//! Builds a Google Calendar render-template URL for one sample, with the
//! window in ICS UTC format and text fields percent-encoded.

use crate::export::ics::ics_timestamp;
use crate::sample::Sample;

/// Literal escaped-newline token used inside the details field
const NL: &str = "\\n";

/// Build a Google Calendar event-creation URL for a sample
pub fn google_calendar_url(sample: &Sample) -> String {
    let start = ics_timestamp(sample.start);
    let end = ics_timestamp(sample.end);
    let text = urlencoding::encode(&format!("Incubation: {}", sample.name)).into_owned();

    let details_raw = [
        sample
            .temperature
            .as_ref()
            .map(|t| format!("Temperature: {}", t)),
        sample.location.as_ref().map(|l| format!("Location: {}", l)),
        sample.notes.as_ref().map(|n| format!("Notes: {}", n)),
    ]
    .into_iter()
    .flatten()
    .map(|part| part.replace("\r\n", NL).replace(['\r', '\n'], NL))
    .collect::<Vec<_>>()
    .join(NL);
    let details = urlencoding::encode(&details_raw).into_owned();

    format!(
        "https://calendar.google.com/calendar/render?action=TEMPLATE&text={}&dates={}%2F{}&details={}",
        text, start, end, details
    )
}
