//! Error types for configuration resolution and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Resolution errors (caller input, never retried)
    #[error("invalid port {port}: expected a value between 1 and 65535")]
    InvalidPort { port: i64 },

    #[error("invalid ignore pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("strict port binding cannot be combined with fallback ports {fallback_ports:?}")]
    ConflictingStrictness { fallback_ports: Vec<u16> },

    #[error(
        "companion build '{name}' writes into {} but no ignore pattern excludes it",
        dir.display()
    )]
    UnexcludedCompanion { name: String, dir: PathBuf },

    #[error("companion build '{name}' has an invalid directory {}: {reason}", dir.display())]
    InvalidCompanion {
        name: String,
        dir: PathBuf,
        reason: String,
    },

    #[error("invalid host {host:?}: host cannot be empty")]
    InvalidHost { host: String },

    // Loading errors
    #[error("config not found")]
    NotFound,

    #[error("invalid config value for '{field}'{}", hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("unknown integration plugin '{name}'")]
    UnknownPlugin { name: String },

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
