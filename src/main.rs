//! EpiLab - Offline-capable incubation tracker
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use epilab::cli::{Cli, Commands};
use epilab::config::ConfigManager;
use epilab::error::EpilabResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> EpilabResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let verbose = if config.general.verbose {
        cli.verbose.max(1)
    } else {
        cli.verbose
    };
    let filter = match verbose {
        0 => EnvFilter::new("epilab=warn"),
        1 => EnvFilter::new("epilab=info"),
        _ => EnvFilter::new("epilab=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }

    // Ensure state directories exist
    ConfigManager::ensure_state_dirs().await?;

    // Dispatch to command
    match cli.command {
        Commands::Add(args) => epilab::cli::commands::add(args, &config).await,
        Commands::Edit(args) => epilab::cli::commands::edit(args, &config).await,
        Commands::Remove(args) => epilab::cli::commands::remove(args, &config).await,
        Commands::Duplicate(args) => epilab::cli::commands::duplicate(args, &config).await,
        Commands::List(args) => epilab::cli::commands::list(args, &config).await,
        Commands::Watch(args) => epilab::cli::commands::watch(args, &config).await,
        Commands::Export(args) => epilab::cli::commands::export(args, &config).await,
        Commands::Link(args) => epilab::cli::commands::link(args, &config).await,
        Commands::Fetch(args) => epilab::cli::commands::fetch(args, &config).await,
        Commands::Cache(args) => epilab::cli::commands::cache(args, &config).await,
        Commands::Config(args) => epilab::cli::commands::config(args, &config).await,
    }
}
