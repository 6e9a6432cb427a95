//! Calendar (.ics) export
//!
//! One `VEVENT` per sample, wrapped in a single `VCALENDAR`. Lines are
//! CRLF-terminated per RFC 5545; embedded newlines in text fields are
//! escaped as the literal `\n` token.

use crate::config::schema::ExportConfig;
use crate::error::{EpilabError, EpilabResult};
use crate::sample::Sample;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Fixed product identifier for generated calendars
pub const PRODID: &str = "-//EpiLab//Incubation Tracker//EN";

/// Literal escaped-newline token used inside ICS text values
const NL: &str = "\\n";

/// Format a timestamp as `YYYYMMDDTHHMMSSZ` UTC
pub fn ics_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parse a `YYYYMMDDTHHMMSSZ` timestamp back to UTC
pub fn parse_ics_timestamp(s: &str) -> EpilabResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%SZ")
        .map(|naive| naive.and_utc())
        .map_err(|e| EpilabError::TimestampInvalid {
            value: s.to_string(),
            reason: e.to_string(),
        })
}

/// Escape embedded newlines in a text value
fn escape_text(value: &str) -> String {
    value.replace("\r\n", NL).replace(['\r', '\n'], NL)
}

/// Event summary line: name plus optional temperature
fn summary(sample: &Sample) -> String {
    match &sample.temperature {
        Some(temp) => format!("Incubation: {} @ {}", sample.name, temp),
        None => format!("Incubation: {}", sample.name),
    }
}

/// Description from notes and location, joined by the escaped-newline token
fn description(sample: &Sample) -> Option<String> {
    let parts: Vec<String> = [
        sample.notes.as_ref().map(|n| format!("Notes: {}", n)),
        sample.location.as_ref().map(|l| format!("Location: {}", l)),
    ]
    .into_iter()
    .flatten()
    .map(|p| escape_text(&p))
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(NL))
    }
}

/// Build the `VEVENT` lines for one sample
pub fn event_for_sample(
    sample: &Sample,
    dtstamp: DateTime<Utc>,
    options: &ExportConfig,
) -> Vec<String> {
    let mut lines = vec![
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}@{}", sample.id, options.uid_domain),
        format!("DTSTAMP:{}", ics_timestamp(dtstamp)),
        format!("DTSTART:{}", ics_timestamp(sample.start)),
        format!("DTEND:{}", ics_timestamp(sample.end)),
        format!("SUMMARY:{}", escape_text(&summary(sample))),
    ];

    if let Some(desc) = description(sample) {
        lines.push(format!("DESCRIPTION:{}", desc));
    }

    lines.extend([
        "BEGIN:VALARM".to_string(),
        format!("TRIGGER:-PT{}M", options.alarm_minutes),
        "ACTION:DISPLAY".to_string(),
        "DESCRIPTION:Incubation ending soon".to_string(),
        "END:VALARM".to_string(),
        "END:VEVENT".to_string(),
    ]);

    lines
}

/// Build a full calendar document for the given samples.
///
/// Rejects an empty collection so no empty file is ever produced.
pub fn calendar(
    samples: &[Sample],
    now: DateTime<Utc>,
    options: &ExportConfig,
) -> EpilabResult<String> {
    if samples.is_empty() {
        return Err(EpilabError::ExportEmpty);
    }

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        format!("PRODID:{}", PRODID),
        "METHOD:PUBLISH".to_string(),
    ];

    for sample in samples {
        lines.extend(event_for_sample(sample, now, options));
    }

    lines.push("END:VCALENDAR".to_string());
    lines.push(String::new()); // trailing CRLF

    Ok(lines.join("\r\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn options() -> ExportConfig {
        ExportConfig::default()
    }

    fn sample() -> Sample {
        let start = Utc.with_ymd_and_hms(2026, 8, 24, 9, 30, 15).unwrap();
        let mut s = Sample::new("Yeast H2O2 stress".to_string(), start, start + Duration::minutes(90));
        s.temperature = Some("30C".to_string());
        s.location = Some("Incubator B2".to_string());
        s.notes = Some("Add IPTG at 2h\ncheck OD600".to_string());
        s
    }

    #[test]
    fn timestamp_format() {
        let dt = Utc.with_ymd_and_hms(2026, 8, 24, 9, 30, 15).unwrap();
        assert_eq!(ics_timestamp(dt), "20260824T093015Z");
    }

    #[test]
    fn timestamp_roundtrip_to_the_second() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 2, 23, 59, 59).unwrap();
        let parsed = parse_ics_timestamp(&ics_timestamp(dt)).unwrap();
        assert_eq!(parsed, dt);
    }

    #[test]
    fn timestamp_parse_rejects_garbage() {
        assert!(parse_ics_timestamp("not-a-date").is_err());
    }

    #[test]
    fn event_contains_required_fields() {
        let s = sample();
        let lines = event_for_sample(&s, Utc::now(), &options());
        let body = lines.join("\r\n");

        assert!(body.starts_with("BEGIN:VEVENT"));
        assert!(body.ends_with("END:VEVENT"));
        assert!(body.contains(&format!("UID:{}@epilab.local", s.id)));
        assert!(body.contains("DTSTART:20260824T093015Z"));
        assert!(body.contains("DTEND:20260824T110015Z"));
        assert!(body.contains("SUMMARY:Incubation: Yeast H2O2 stress @ 30C"));
        assert!(body.contains("TRIGGER:-PT5M"));
    }

    #[test]
    fn description_escapes_newlines() {
        let s = sample();
        let lines = event_for_sample(&s, Utc::now(), &options());
        let desc = lines
            .iter()
            .find(|l| l.starts_with("DESCRIPTION:Notes"))
            .unwrap();

        assert!(desc.contains("Add IPTG at 2h\\ncheck OD600"));
        assert!(desc.contains("\\nLocation: Incubator B2"));
        assert!(!desc.contains('\n'));
    }

    #[test]
    fn event_roundtrips_window() {
        let s = sample();
        let lines = event_for_sample(&s, Utc::now(), &options());

        let dtstart = lines
            .iter()
            .find_map(|l| l.strip_prefix("DTSTART:"))
            .unwrap();
        let dtend = lines.iter().find_map(|l| l.strip_prefix("DTEND:")).unwrap();

        assert_eq!(parse_ics_timestamp(dtstart).unwrap(), s.start);
        assert_eq!(parse_ics_timestamp(dtend).unwrap(), s.end);
    }

    #[test]
    fn calendar_wraps_events() {
        let cal = calendar(&[sample()], Utc::now(), &options()).unwrap();
        assert!(cal.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(cal.contains("VERSION:2.0"));
        assert!(cal.contains("CALSCALE:GREGORIAN"));
        assert!(cal.contains(PRODID));
        assert!(cal.trim_end().ends_with("END:VCALENDAR"));
    }

    #[test]
    fn calendar_rejects_empty_collection() {
        assert!(matches!(
            calendar(&[], Utc::now(), &options()),
            Err(EpilabError::ExportEmpty)
        ));
    }

    #[test]
    fn event_without_optional_fields_has_no_description() {
        let start = Utc::now();
        let s = Sample::new("bare".to_string(), start, start + Duration::hours(1));
        let lines = event_for_sample(&s, Utc::now(), &options());
        assert!(!lines.iter().any(|l| l.starts_with("DESCRIPTION:Notes")));
    }
}
