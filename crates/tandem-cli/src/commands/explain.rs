//! Explain command implementation.
//!
//! Prints whether each given path is hidden from the file watcher.

use crate::cli::ExplainArgs;
use crate::commands::utils;
use crate::error::Result;
use std::path::Path;
use tandem_config::WatchPolicy;

/// Execute the explain command.
///
/// Writes one `<verdict>\t<path>` line per argument to stdout.
pub fn execute(args: ExplainArgs) -> Result<()> {
    let root = utils::project_root(&args.config)?;
    let config = utils::load_config(&root, &args.config)?;
    let effective = utils::resolve_config(&config)?;

    for path in &args.paths {
        println!("{}\t{}", verdict(&effective.watch, &root, path), path.display());
    }
    Ok(())
}

fn verdict(policy: &WatchPolicy, root: &Path, path: &Path) -> &'static str {
    let ignored = if path.is_absolute() {
        policy.is_ignored_abs(root, path)
    } else {
        policy.is_ignored(path)
    };
    if ignored { "ignored" } else { "watched" }
}
