//! Dev command implementation.
//!
//! Resolves the configuration, binds the listener under the strictness
//! policy, serves the project root, and reports every change that survives the
//! watch policy until Ctrl+C.

use crate::cli::DevArgs;
use crate::commands::utils;
use crate::dev::{bind, DevServer, FileChange, FileWatcher};
use crate::error::Result;
use crate::ui;
use std::path::Path;
use std::sync::Arc;
use tandem_config::TandemConfig;
use tokio::signal;
use tracing::debug;

/// Execute the dev command.
///
/// # Errors
///
/// Returns configuration errors before anything is bound, and bind errors
/// before the watcher starts. A strict binding never falls back to another port.
pub async fn execute(args: DevArgs) -> Result<()> {
    let root = utils::project_root(&args.config)?;
    let mut config = utils::load_config(&root, &args.config)?;
    apply_overrides(&mut config, &args);

    let effective = Arc::new(utils::resolve_config(&config)?);

    if effective.clear_screen {
        clear_terminal(&console::Term::stderr());
    }

    let listener = bind(&effective.binding)?;
    let server = DevServer::new(listener, root.clone(), Arc::clone(&effective));
    let addr = server.local_addr()?;
    ui::success(&format!("Dev server listening on http://{addr}"));

    let (watcher, mut change_rx) =
        FileWatcher::new(root, effective.watch.clone(), args.debounce_ms)?;
    ui::info(&format!(
        "Watching for changes in: {}",
        watcher.root().display()
    ));
    for companion in &effective.companions {
        debug!(name = %companion.name, dir = %companion.dir.display(), "companion build excluded");
    }

    let mut server_handle = tokio::spawn(async move {
        if let Err(e) = server.start().await {
            ui::error(&e.to_string());
        }
    });

    ui::info("Press Ctrl+C to stop");

    loop {
        tokio::select! {
            Some(change) = change_rx.recv() => {
                report_change(&change, watcher.root());
            }

            _ = signal::ctrl_c() => {
                ui::info("Shutting down development server...");
                break;
            }

            _ = &mut server_handle => {
                ui::warning("Server task completed unexpectedly");
                break;
            }
        }
    }

    server_handle.abort();
    ui::success("Development server stopped");
    Ok(())
}

/// Command-line flags take precedence over file and environment values.
fn apply_overrides(config: &mut TandemConfig, args: &DevArgs) {
    if let Some(port) = args.port {
        config.server.port = Some(port);
    }
    if args.strict {
        config.server.strict = true;
    }
}

fn clear_terminal(term: &console::Term) {
    if let Err(err) = term.clear_screen() {
        debug!(error = %err, "could not clear the terminal");
    }
}

fn report_change(change: &FileChange, root: &Path) {
    let path = change.path();
    let shown = path.strip_prefix(root).unwrap_or(path);
    let verb = match change {
        FileChange::Created(_) => "created",
        FileChange::Modified(_) => "changed",
        FileChange::Removed(_) => "removed",
    };
    ui::info(&format!("{verb}: {} (rebuild)", shown.display()));
}
