//! List command - show incubations with live status

use crate::cli::args::{ListArgs, OutputFormat, StatusFilter};
use crate::config::Config;
use crate::error::EpilabResult;
use crate::sample::lifecycle::{self, SampleStatus};
use crate::sample::{record, Sample, SampleStore};
use crate::ui::{self, UiContext};
use chrono::{DateTime, Duration, Utc};
use console::style;
use serde::Serialize;
use uuid::Uuid;

/// A sample enriched with its derived views for display
#[derive(Debug, Serialize)]
pub struct ListedSample {
    pub id: Uuid,
    pub name: String,
    pub status: SampleStatus,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub progress_percent: f64,
    pub countdown: String,
    pub temperature: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config) -> EpilabResult<()> {
    let store = SampleStore::open().await?;
    let samples = store.load().await?;

    let grace = Duration::seconds(config.lifecycle.grace_secs as i64);
    let rows = enrich(samples, args.query.as_deref(), args.status, Utc::now(), grace);

    if rows.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, "No incubations recorded");
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&rows),
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Plain => print_plain(&rows),
    }

    Ok(())
}

/// Filter, sort by end time, and derive display views
pub(crate) fn enrich(
    samples: Vec<Sample>,
    query: Option<&str>,
    filter: StatusFilter,
    now: DateTime<Utc>,
    grace: Duration,
) -> Vec<ListedSample> {
    record::sorted_by_end(samples)
        .into_iter()
        .filter(|s| query.is_none_or(|q| record::matches_query(s, q)))
        .map(|s| {
            let status = lifecycle::classify(s.start, s.end, now, grace);
            ListedSample {
                countdown: countdown(&s, status, now),
                progress_percent: lifecycle::progress_percent(s.start, s.end, now),
                status,
                id: s.id,
                name: s.name,
                start: s.start,
                end: s.end,
                temperature: s.temperature,
                location: s.location,
                notes: s.notes,
            }
        })
        .filter(|row| wanted(filter, row.status))
        .collect()
}

fn wanted(filter: StatusFilter, status: SampleStatus) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Scheduled => status == SampleStatus::Scheduled,
        StatusFilter::Running => status == SampleStatus::Running,
        StatusFilter::Completed => status == SampleStatus::Completed,
        StatusFilter::Overdue => status == SampleStatus::Overdue,
    }
}

/// Per-status countdown text shown next to each row
fn countdown(sample: &Sample, status: SampleStatus, now: DateTime<Utc>) -> String {
    match status {
        SampleStatus::Scheduled => format!(
            "starts in {}",
            lifecycle::format_hms(lifecycle::starts_in(sample.start, now))
        ),
        SampleStatus::Running => format!(
            "{} remaining",
            lifecycle::format_hms(lifecycle::remaining(sample.end, now))
        ),
        SampleStatus::Completed => "just finished".to_string(),
        SampleStatus::Overdue => format!(
            "finished {} ago",
            lifecycle::format_hms(lifecycle::elapsed_since_end(sample.end, now))
        ),
    }
}

pub(crate) fn print_table(rows: &[ListedSample]) {
    println!(
        "{:<10} {:<24} {:<10} {:<18} {:>5}  {}",
        style("ID").bold(),
        style("NAME").bold(),
        style("STATUS").bold(),
        style("ENDS").bold(),
        style("PROG").bold(),
        style("COUNTDOWN").bold()
    );
    println!("{}", "-".repeat(88));

    for row in rows {
        let status_styled = match row.status {
            SampleStatus::Scheduled => style("scheduled").cyan(),
            SampleStatus::Running => style("running").green(),
            SampleStatus::Completed => style("completed").dim(),
            SampleStatus::Overdue => style("overdue").red(),
        };

        println!(
            "{:<10} {:<24} {:<10} {:<18} {:>4.0}%  {}",
            &row.id.to_string()[..8],
            truncate(&row.name, 24),
            status_styled,
            row.end.format("%Y-%m-%d %H:%M"),
            row.progress_percent,
            row.countdown
        );
    }

    println!();
    println!("{} incubation(s)", rows.len());
}

fn print_json(rows: &[ListedSample]) -> EpilabResult<()> {
    let json = serde_json::to_string_pretty(rows)?;
    println!("{}", json);
    Ok(())
}

fn print_plain(rows: &[ListedSample]) {
    for row in rows {
        println!("{}\t{}\t{}", &row.id.to_string()[..8], row.name, row.status);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, start_offset: i64, end_offset: i64, now: DateTime<Utc>) -> Sample {
        Sample::new(
            name.to_string(),
            now + Duration::seconds(start_offset),
            now + Duration::seconds(end_offset),
        )
    }

    #[test]
    fn enrich_sorts_by_end_and_classifies() {
        let now = Utc::now();
        let grace = Duration::seconds(60);
        let samples = vec![
            sample("later", -10, 600, now),
            sample("sooner", -10, 60, now),
            sample("future", 300, 900, now),
        ];

        let rows = enrich(samples, None, StatusFilter::All, now, grace);
        assert_eq!(rows[0].name, "sooner");
        assert_eq!(rows[0].status, SampleStatus::Running);
        assert_eq!(rows[2].name, "future");
        assert_eq!(rows[2].status, SampleStatus::Scheduled);
    }

    #[test]
    fn enrich_applies_status_filter() {
        let now = Utc::now();
        let grace = Duration::seconds(60);
        let samples = vec![sample("run", -10, 600, now), sample("old", -600, -300, now)];

        let rows = enrich(samples, None, StatusFilter::Overdue, now, grace);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "old");
    }

    #[test]
    fn enrich_applies_query() {
        let now = Utc::now();
        let grace = Duration::seconds(60);
        let samples = vec![sample("yeast", -10, 600, now), sample("coli", -10, 600, now)];

        let rows = enrich(samples, Some("yeas"), StatusFilter::All, now, grace);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "yeast");
    }

    #[test]
    fn countdown_texts() {
        let now = Utc::now();
        let running = sample("r", -150, 150, now);
        assert_eq!(
            countdown(&running, SampleStatus::Running, now),
            "00:02:30 remaining"
        );

        let overdue = sample("o", -600, -90, now);
        assert_eq!(
            countdown(&overdue, SampleStatus::Overdue, now),
            "finished 00:01:30 ago"
        );
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("short", 24), "short");
        let long = "a".repeat(40);
        assert_eq!(truncate(&long, 24).chars().count(), 24);
    }
}
