use std::env;
use std::path::PathBuf;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Path to the JSON schema describing the filterable fields.
    pub schema_path: PathBuf,
    /// Statement the WHERE / ORDER BY clauses are appended to.
    pub select: String,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            schema_path: lookup("FILTERQL_SCHEMA")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .ok_or(ConfigError::Missing("FILTERQL_SCHEMA"))?,
            select: lookup("FILTERQL_SELECT").unwrap_or_else(|| "SELECT * FROM items".to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}
