//! Configuration schema for EpiLab
//!
//! Configuration is stored at `~/.config/epilab/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Lifecycle engine settings
    pub lifecycle: LifecycleConfig,

    /// Offline cache settings
    pub cache: CacheConfig,

    /// Calendar export settings
    pub export: ExportConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Lifecycle engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Grace window in seconds before a finished incubation turns overdue
    pub grace_secs: u64,

    /// Watch mode refresh interval in milliseconds
    pub tick_ms: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            grace_secs: 60,
            tick_ms: 1000,
        }
    }
}

/// Offline cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Versioned cache store name; bumping it abandons the old store
    pub name: String,

    /// Network fetch timeout in seconds
    pub timeout_secs: u64,

    /// Remove stale stores from earlier versions at install time
    pub prune_stale: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: "epilab-v1".to_string(),
            timeout_secs: 30,
            prune_stale: true,
        }
    }
}

/// Calendar export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Domain suffix used for event UIDs
    pub uid_domain: String,

    /// Display alarm lead time in minutes
    pub alarm_minutes: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            uid_domain: "epilab.local".to_string(),
            alarm_minutes: 5,
        }
    }
}
