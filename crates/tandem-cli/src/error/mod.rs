//! Error handling for the Tandem CLI.
//!
//! `CliError` wraps the domain errors of the resolver, the socket binder and
//! the file watcher. Commands return it and `main` converts it to a miette
//! report; startup aborts with the error verbatim.

mod report;

use std::path::PathBuf;
use thiserror::Error;

use crate::dev::BindError;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(#[from] tandem_config::ConfigError),

    /// The dev server could not bind its listener
    #[error("Bind error: {0}")]
    Bind(#[from] BindError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Development server errors
    #[error("Server error: {0}")]
    Server(String),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_config::ConfigError;

    #[test]
    fn config_errors_convert_and_keep_message() {
        let err: CliError = ConfigError::InvalidPort { port: 0 }.into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("invalid port 0"));
    }

    #[test]
    fn bind_errors_convert() {
        let err: CliError = BindError::NoAvailablePort {
            host: "127.0.0.1".to_string(),
            tried: vec![1420, 1421],
        }
        .into();
        assert!(matches!(err, CliError::Bind(_)));
    }

    #[test]
    fn server_errors_keep_their_message() {
        let err = CliError::Server("Server error: connection reset".to_string());
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn file_not_found_displays_path() {
        let err = CliError::FileNotFound(PathBuf::from("tandem.toml"));
        assert!(err.to_string().contains("tandem.toml"));
    }
}
