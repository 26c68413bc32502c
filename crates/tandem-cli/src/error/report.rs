//! Miette diagnostic conversion for CLI errors.

use miette::Report;
use tandem_config::ConfigError;

use crate::dev::BindError;
use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Bind(e) => bind_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::UnexcludedCompanion { ref dir, .. } => {
            let dir = dir.display().to_string();
            miette::miette!(
                "{}\n\nHint: add \"{dir}/**\", \"**/{dir}/**\" or \"{dir}/*\" to [server.watch] ignored, \
                 otherwise the companion's output triggers endless rebuilds",
                err
            )
        }
        ConfigError::ConflictingStrictness { .. } => miette::miette!(
            "{}\n\nHint: drop `fallback_ports` or set `strict = false`",
            err
        ),
        ConfigError::NotFound => miette::miette!(
            "Configuration error: {}\n\nHint: create a tandem.toml or pass --config <path>",
            err
        ),
        _ => miette::miette!("Configuration error: {}", err),
    }
}

fn bind_error_to_miette(err: BindError) -> Report {
    match err {
        BindError::PortInUse { port, .. } => miette::miette!(
            "{}\n\nHint: stop the process holding port {}, or disable strict binding",
            err,
            port
        ),
        _ => miette::miette!("{}", err),
    }
}
