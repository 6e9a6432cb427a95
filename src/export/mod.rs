//! Export formats: calendar (.ics), tabular (.csv), and deep links

pub mod csv;
pub mod ics;
pub mod link;

pub use csv::csv_for_samples;
pub use ics::{calendar, event_for_sample, ics_timestamp, parse_ics_timestamp};
pub use link::google_calendar_url;
