use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available Tandem subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve and validate the dev server configuration
    ///
    /// Loads tandem.toml (or the `tandem` field of package.json), applies the
    /// selected profile and environment overrides, and prints the result.
    Check(CheckArgs),

    /// Report whether paths are hidden from the file watcher
    Explain(ExplainArgs),

    /// Start the dev server and watch for changes
    ///
    /// Binds the configured port (failing instead of renumbering when strict),
    /// serves the project root, and reports every change that would trigger a
    /// rebuild.
    Dev(DevArgs),
}

/// Options shared by every command that loads configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a config file (defaults to tandem.toml or package.json)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Profile to apply on top of the base configuration
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the effective configuration as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the explain command
#[derive(Args, Debug)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Paths, relative to the project root, to classify
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Arguments for the dev command
#[derive(Args, Debug)]
pub struct DevArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Override the configured port
    #[arg(long, value_name = "PORT")]
    pub port: Option<i64>,

    /// Fail instead of falling back when the port is taken
    #[arg(long)]
    pub strict: bool,

    /// Debounce window for repeated changes to the same file
    #[arg(long, default_value_t = 100, value_name = "MS")]
    pub debounce_ms: u64,
}
