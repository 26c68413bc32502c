//! Command-line interface definition for Tandem.
//!
//! - `tandem check` - resolve and print the effective configuration
//! - `tandem explain` - report whether paths are hidden from the watcher
//! - `tandem dev` - bind the dev server and watch for changes

mod commands;

use clap::Parser;

pub use commands::{CheckArgs, Command, ConfigArgs, DevArgs, ExplainArgs};

/// Tandem - dev server coordination for frontends with a companion native build
#[derive(Parser, Debug)]
#[command(
    name = "tandem",
    version,
    about = "Dev server and watcher that stay out of a companion native build",
    long_about = "Tandem resolves the dev server configuration of a frontend that shares its\n\
                  project root with a second build process (such as a native shell), binds\n\
                  the requested port, and watches for changes outside the excluded trees."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_dev_overrides() {
        let cli = Cli::parse_from(["tandem", "dev", "--port", "5000", "--strict"]);
        match cli.command {
            Command::Dev(args) => {
                assert_eq!(args.port, Some(5000));
                assert!(args.strict);
                assert_eq!(args.debounce_ms, 100);
            }
            other => panic!("expected dev command, got {other:?}"),
        }
    }

    #[test]
    fn parses_check_with_profile() {
        let cli = Cli::parse_from([
            "tandem", "check", "--config", "alt.toml", "--profile", "ci", "--json",
        ]);
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.config.config, Some(PathBuf::from("alt.toml")));
                assert_eq!(args.config.profile.as_deref(), Some("ci"));
                assert!(args.json);
            }
            other => panic!("expected check command, got {other:?}"),
        }
    }

    #[test]
    fn explain_requires_paths() {
        assert!(Cli::try_parse_from(["tandem", "explain"]).is_err());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["tandem", "-v", "-q", "check"]).is_err());
    }
}
