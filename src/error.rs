//! Error types for EpiLab
//!
//! All modules use `EpilabResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for EpiLab operations
pub type EpilabResult<T> = Result<T, EpilabError>;

/// All errors that can occur in EpiLab
#[derive(Error, Debug)]
pub enum EpilabError {
    // Sample errors
    #[error("Sample not found: {0}")]
    SampleNotFound(String),

    #[error("Ambiguous sample reference: {needle} matches {count} samples")]
    SampleAmbiguous { needle: String, count: usize },

    #[error("Failed to persist sample collection: {0}")]
    StorePersist(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Cache proxy errors
    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Cache entry read failed for key {key}: {reason}")]
    CacheRead { key: String, reason: String },

    #[error("Cache entry write failed for key {key}: {reason}")]
    CacheWrite { key: String, reason: String },

    #[error("Invalid URL: {0}")]
    UrlInvalid(String),

    // Export errors
    #[error("Nothing to export: no samples recorded")]
    ExportEmpty,

    #[error("Invalid timestamp: {value}: {reason}")]
    TimestampInvalid { value: String, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl EpilabError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::SampleNotFound(_) => Some("Run: epilab list to see recorded samples"),
            Self::SampleAmbiguous { .. } => Some("Use a longer id prefix or the full sample name"),
            Self::ExportEmpty => Some("Add a sample first: epilab add <name>"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EpilabError::SampleNotFound("yeast".to_string());
        assert!(err.to_string().contains("Sample not found: yeast"));
    }

    #[test]
    fn error_hint() {
        let err = EpilabError::ExportEmpty;
        assert_eq!(err.hint(), Some("Add a sample first: epilab add <name>"));
        assert!(EpilabError::Internal("x".into()).hint().is_none());
    }

    #[test]
    fn fetch_error_carries_url() {
        let err = EpilabError::fetch("https://example.test/app.js", "timeout");
        assert!(err.to_string().contains("https://example.test/app.js"));
    }
}
