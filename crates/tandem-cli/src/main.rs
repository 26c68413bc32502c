//! Tandem CLI entry point.
//!
//! Parses arguments, initializes logging, and dispatches to a command.

use clap::Parser;
use miette::Result;
use tandem_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors();
    if args.no_color {
        ui::set_color(false);
    }

    let result = match args.command {
        cli::Command::Check(check_args) => commands::check_execute(check_args),
        cli::Command::Explain(explain_args) => commands::explain_execute(explain_args),
        cli::Command::Dev(dev_args) => commands::dev_execute(dev_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
