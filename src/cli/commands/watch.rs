//! Watch command - re-render statuses on a live clock
//!
//! Re-derives every status once per tick so long-running displays
//! transition between states without a restart.

use crate::cli::args::{StatusFilter, WatchArgs};
use crate::config::Config;
use crate::error::{EpilabError, EpilabResult};
use crate::sample::SampleStore;
use crate::ui::{self, UiContext};
use chrono::{Duration, Utc};
use console::Term;

use super::list;

/// Execute the watch command
pub async fn execute(args: WatchArgs, config: &Config) -> EpilabResult<()> {
    let store = SampleStore::open().await?;
    let grace = Duration::seconds(config.lifecycle.grace_secs as i64);
    let term = Term::stdout();

    let mut interval =
        tokio::time::interval(std::time::Duration::from_millis(config.lifecycle.tick_ms.max(100)));
    let mut ticks = 0u64;

    loop {
        interval.tick().await;

        // Reload each tick so edits from another terminal show up live
        let samples = store.load().await?;
        let rows = list::enrich(samples, args.query.as_deref(), StatusFilter::All, Utc::now(), grace);

        term.clear_screen()
            .map_err(|e| EpilabError::io("clearing terminal", e))?;
        println!("EpiLab watch - {}  (ctrl-c to exit)", Utc::now().format("%H:%M:%S UTC"));
        println!();

        if rows.is_empty() {
            let ctx = UiContext::non_interactive();
            ui::step_info(&ctx, "No incubations recorded");
        } else {
            list::print_table(&rows);
        }

        ticks += 1;
        if args.ticks > 0 && ticks >= args.ticks {
            return Ok(());
        }
    }
}
