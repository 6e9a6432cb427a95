//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{EpilabError, EpilabResult};
use crate::ui::{self, UiContext};

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config) -> EpilabResult<()> {
    let manager = ConfigManager::new();

    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => show_path(&manager),
        Some(ConfigAction::Init { force }) => init_config(&manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(&manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml =
        toml::to_string_pretty(config).unwrap_or_else(|_| "Error serializing config".to_string());
    println!("{}", toml);
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> EpilabResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    let config = Config::default();
    manager.save(&config).await?;

    ui::step_ok_detail(
        &ctx,
        "Configuration initialized",
        &path.display().to_string(),
    );

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> EpilabResult<()> {
    let ctx = UiContext::detect();
    let mut config = config.clone();

    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "verbose"] => config.general.verbose = parse_bool(value)?,
        ["general", "log_format"] => config.general.log_format = value.to_string(),

        ["lifecycle", "grace_secs"] => config.lifecycle.grace_secs = parse_u64(value)?,
        ["lifecycle", "tick_ms"] => config.lifecycle.tick_ms = parse_u64(value)?,

        ["cache", "name"] => config.cache.name = value.to_string(),
        ["cache", "timeout_secs"] => config.cache.timeout_secs = parse_u64(value)?,
        ["cache", "prune_stale"] => config.cache.prune_stale = parse_bool(value)?,

        ["export", "uid_domain"] => config.export.uid_domain = value.to_string(),
        ["export", "alarm_minutes"] => config.export.alarm_minutes = parse_u32(value)?,

        _ => {
            ui::step_error_detail(&ctx, "Unknown config key", key);
            ui::remark(&ctx, "Valid keys:");
            print_valid_keys(&ctx);
            return Ok(());
        }
    }

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

fn print_valid_keys(ctx: &UiContext) {
    for key in [
        "general.verbose",
        "general.log_format",
        "lifecycle.grace_secs",
        "lifecycle.tick_ms",
        "cache.name",
        "cache.timeout_secs",
        "cache.prune_stale",
        "export.uid_domain",
        "export.alarm_minutes",
    ] {
        ui::remark(ctx, key);
    }
}

fn parse_bool(value: &str) -> EpilabResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(EpilabError::User(format!("Expected true/false, got: {}", value))),
    }
}

fn parse_u64(value: &str) -> EpilabResult<u64> {
    value
        .parse()
        .map_err(|_| EpilabError::User(format!("Expected a number, got: {}", value)))
}

fn parse_u32(value: &str) -> EpilabResult<u32> {
    value
        .parse()
        .map_err(|_| EpilabError::User(format!("Expected a number, got: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_variants() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("YES").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn parse_u64_rejects_garbage() {
        assert_eq!(parse_u64("120").unwrap(), 120);
        assert!(parse_u64("soon").is_err());
    }

    #[test]
    fn parse_u32_rejects_out_of_range() {
        assert_eq!(parse_u32("5").unwrap(), 5);
        // u32::MAX + 1 must error instead of wrapping or truncating
        assert!(parse_u32("4294967296").is_err());
        assert!(parse_u32("-1").is_err());
    }
}
