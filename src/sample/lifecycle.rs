//! Sample lifecycle engine
//!
//! Classifies a sample into one of four states from its scheduled window
//! and the current time, and derives progress/countdown views. Everything
//! here is a pure function of `(start, end, now)` so it can be re-evaluated
//! on a live clock without retained state.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grace window before a finished incubation is reported as overdue.
///
/// Smooths the instant an incubation ends so long-lived displays do not
/// flip straight into an alarming state. Overridable via
/// `[lifecycle] grace_secs` in the config.
pub const DEFAULT_GRACE_SECS: u64 = 60;

/// Lifecycle state of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleStatus {
    Scheduled,
    Running,
    Completed,
    Overdue,
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Scheduled => "scheduled",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        };
        write!(f, "{}", s)
    }
}

/// Classify a sample window against `now`.
///
/// - `now < start` is scheduled
/// - `start <= now <= end` is running
/// - past `end`, completed within the grace window, overdue after it
pub fn classify(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
    grace: Duration,
) -> SampleStatus {
    if now < start {
        SampleStatus::Scheduled
    } else if now <= end {
        SampleStatus::Running
    } else if now - end < grace {
        SampleStatus::Completed
    } else {
        SampleStatus::Overdue
    }
}

/// Progress through the window as a percentage, clamped to `[0, 100]`.
///
/// A zero-length window has no meaningful fraction: report 0% before the
/// instant and 100% from it onward instead of dividing by zero.
pub fn progress_percent(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    if end <= start {
        return if now >= end { 100.0 } else { 0.0 };
    }
    let total = (end - start).num_milliseconds() as f64;
    let elapsed = (now - start).num_milliseconds() as f64;
    (elapsed / total * 100.0).clamp(0.0, 100.0)
}

/// Time remaining until `end`; zero once past it. Valid while running.
pub fn remaining(end: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (end - now).max(Duration::zero())
}

/// Time until `start`; zero once reached. Valid while scheduled.
pub fn starts_in(start: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (start - now).max(Duration::zero())
}

/// Time elapsed since `end`; zero before it. Valid while overdue.
pub fn elapsed_since_end(end: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - end).max(Duration::zero())
}

/// Format a duration as zero-padded `HH:MM:SS`.
///
/// Negative durations clamp to `00:00:00`.
pub fn format_hms(d: Duration) -> String {
    let total = d.num_seconds().max(0);
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grace() -> Duration {
        Duration::seconds(DEFAULT_GRACE_SECS as i64)
    }

    fn at(offset_secs: i64) -> (DateTime<Utc>, DateTime<Utc>, DateTime<Utc>) {
        let start = Utc::now();
        let end = start + Duration::minutes(5);
        (start, end, start + Duration::seconds(offset_secs))
    }

    #[test]
    fn scheduled_before_start() {
        let (start, end, _) = at(0);
        let now = start - Duration::seconds(1);
        assert_eq!(classify(start, end, now, grace()), SampleStatus::Scheduled);
    }

    #[test]
    fn running_within_window() {
        let (start, end, _) = at(0);
        assert_eq!(classify(start, end, start, grace()), SampleStatus::Running);
        assert_eq!(classify(start, end, end, grace()), SampleStatus::Running);
        let mid = start + Duration::seconds(150);
        assert_eq!(classify(start, end, mid, grace()), SampleStatus::Running);
    }

    #[test]
    fn completed_within_grace_window() {
        let (start, end, _) = at(0);
        let now = end + Duration::seconds(30);
        assert_eq!(classify(start, end, now, grace()), SampleStatus::Completed);
        let edge = end + Duration::seconds(59);
        assert_eq!(classify(start, end, edge, grace()), SampleStatus::Completed);
    }

    #[test]
    fn overdue_past_grace_window() {
        let (start, end, _) = at(0);
        let boundary = end + grace();
        assert_eq!(classify(start, end, boundary, grace()), SampleStatus::Overdue);
        let later = end + Duration::seconds(90);
        assert_eq!(classify(start, end, later, grace()), SampleStatus::Overdue);
    }

    #[test]
    fn classify_is_deterministic() {
        let (start, end, now) = at(10);
        let a = classify(start, end, now, grace());
        let b = classify(start, end, now, grace());
        assert_eq!(a, b);
    }

    #[test]
    fn custom_grace_window() {
        let (start, end, _) = at(0);
        let now = end + Duration::seconds(90);
        let wide = Duration::seconds(120);
        assert_eq!(classify(start, end, now, wide), SampleStatus::Completed);
    }

    #[test]
    fn progress_midpoint() {
        let (start, end, now) = at(150);
        let pct = progress_percent(start, end, now);
        assert!((pct - 50.0).abs() < 0.1, "got {}", pct);
    }

    #[test]
    fn progress_clamps() {
        let (start, end, _) = at(0);
        assert_eq!(progress_percent(start, end, start - Duration::hours(1)), 0.0);
        assert_eq!(progress_percent(start, end, end + Duration::hours(1)), 100.0);
    }

    #[test]
    fn progress_zero_length_window() {
        let start = Utc::now();
        assert_eq!(progress_percent(start, start, start - Duration::seconds(1)), 0.0);
        assert_eq!(progress_percent(start, start, start), 100.0);
        assert_eq!(progress_percent(start, start, start + Duration::seconds(1)), 100.0);
    }

    #[test]
    fn remaining_and_elapsed() {
        let (start, end, now) = at(150);
        assert_eq!(remaining(end, now).num_seconds(), 150);
        assert_eq!(remaining(end, end + Duration::seconds(5)), Duration::zero());
        assert_eq!(elapsed_since_end(end, end + Duration::seconds(30)).num_seconds(), 30);
        assert_eq!(elapsed_since_end(end, now), Duration::zero());
        assert_eq!(starts_in(start, start - Duration::seconds(45)).num_seconds(), 45);
    }

    #[test]
    fn format_hms_pads() {
        assert_eq!(format_hms(Duration::seconds(0)), "00:00:00");
        assert_eq!(format_hms(Duration::seconds(5)), "00:00:05");
        assert_eq!(format_hms(Duration::seconds(3661)), "01:01:01");
        assert_eq!(format_hms(Duration::seconds(-10)), "00:00:00");
        assert_eq!(format_hms(Duration::hours(100)), "100:00:00");
    }
}
