//! Export command - write the collection as a calendar or CSV document

use crate::cli::args::{ExportArgs, ExportFormat};
use crate::config::Config;
use crate::error::{EpilabError, EpilabResult};
use crate::export::{calendar, csv_for_samples};
use crate::sample::{record, SampleStore};
use crate::ui::{self, UiContext};
use chrono::Utc;
use tokio::fs;

/// Execute the export command
pub async fn execute(args: ExportArgs, config: &Config) -> EpilabResult<()> {
    let store = SampleStore::open().await?;
    let samples = store.load().await?;

    // Single-sample export keeps the same document shape
    let selected = match &args.sample {
        Some(needle) => vec![record::find(&samples, needle)?.clone()],
        None => record::sorted_by_end(samples),
    };

    let (content, what) = match args.format {
        ExportFormat::Ics => (calendar(&selected, Utc::now(), &config.export)?, "calendar"),
        ExportFormat::Csv => (csv_for_samples(&selected)?, "CSV"),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &content)
                .await
                .map_err(|e| EpilabError::io(format!("writing {}", path.display()), e))?;

            let ctx = UiContext::detect();
            ui::step_ok_detail(
                &ctx,
                &format!("Exported {} sample(s) as {}", selected.len(), what),
                &path.display().to_string(),
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}
