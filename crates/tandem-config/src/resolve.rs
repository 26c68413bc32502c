//! Turns a declarative [`ConfigRequest`] into an immutable [`EffectiveConfig`].
//!
//! Resolution is a pure function of its input: it performs no I/O, binds no
//! socket and starts no watcher. Every inconsistency is reported as a
//! [`ConfigError`]; nothing is silently corrected.
//!
//! A companion build (a second process, such as a native shell, writing inside
//! the project root) must be excluded by the watch policy. Otherwise the
//! watcher would see its output, trigger a frontend rebuild, and possibly
//! provoke further writes from the companion in an unbounded loop.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::binding::{validate_port, ServerBinding, DEFAULT_HOST, DEFAULT_PORT};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{ConfigError, Result};
use crate::plugin::{IntegrationPluginSet, PluginHandle};
use crate::watch::WatchPolicy;

/// A sibling build process whose working directory lives under the project root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanionBuild {
    pub name: String,
    pub dir: PathBuf,
}

impl CompanionBuild {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }
}

/// Everything a caller may ask of the dev server.
#[derive(Debug, Clone, Default)]
pub struct ConfigRequest {
    /// Listening port; [`DEFAULT_PORT`] when unset.
    pub port: Option<i64>,
    /// Fail instead of renumbering when the port is taken.
    pub strict: bool,
    /// Ports to try, in order, when the requested one is taken.
    pub fallback_ports: Vec<i64>,
    /// Listening host; [`DEFAULT_HOST`] when unset.
    pub host: Option<String>,
    pub ignored_patterns: Vec<String>,
    pub plugins: Vec<PluginHandle>,
    pub companions: Vec<CompanionBuild>,
    /// Keep previous terminal output when the dev server starts.
    pub clear_screen: bool,
}

/// Resolved configuration shared by the socket binder and the file-watcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub binding: ServerBinding,
    pub watch: WatchPolicy,
    pub plugins: IntegrationPluginSet,
    pub companions: Vec<CompanionBuild>,
    pub clear_screen: bool,
}

/// Resolve a request, reporting diagnostics through `tracing`.
pub fn resolve(request: &ConfigRequest) -> Result<EffectiveConfig> {
    resolve_with(request, &mut TracingSink)
}

/// Resolve a request, reporting diagnostics to `sink`.
pub fn resolve_with(
    request: &ConfigRequest,
    sink: &mut dyn DiagnosticSink,
) -> Result<EffectiveConfig> {
    let binding = resolve_binding(request)?;
    let watch = WatchPolicy::new(&request.ignored_patterns)?;

    for companion in &request.companions {
        check_companion(companion, &watch)?;
    }

    let (plugins, dropped) = IntegrationPluginSet::dedup(&request.plugins);
    for position in dropped {
        sink.emit(Diagnostic::DuplicatePlugin {
            name: request.plugins[position].name().to_string(),
            position,
        });
    }

    Ok(EffectiveConfig {
        binding,
        watch,
        plugins,
        companions: request.companions.clone(),
        clear_screen: request.clear_screen,
    })
}

fn resolve_binding(request: &ConfigRequest) -> Result<ServerBinding> {
    let port = match request.port {
        Some(port) => validate_port(port)?,
        None => DEFAULT_PORT,
    };

    let fallback_ports = request
        .fallback_ports
        .iter()
        .map(|&p| validate_port(p))
        .collect::<Result<Vec<_>>>()?;

    if request.strict && !fallback_ports.is_empty() {
        return Err(ConfigError::ConflictingStrictness { fallback_ports });
    }

    let host = match &request.host {
        Some(host) if host.trim().is_empty() => {
            return Err(ConfigError::InvalidHost { host: host.clone() });
        }
        Some(host) => host.trim().to_string(),
        None => DEFAULT_HOST.to_string(),
    };

    Ok(ServerBinding {
        host,
        port,
        strict: request.strict,
        fallback_ports,
    })
}

fn check_companion(companion: &CompanionBuild, watch: &WatchPolicy) -> Result<()> {
    let invalid = |reason: &str| ConfigError::InvalidCompanion {
        name: companion.name.clone(),
        dir: companion.dir.clone(),
        reason: reason.to_string(),
    };

    let dir: &Path = &companion.dir;
    if dir.has_root() || dir.is_absolute() {
        return Err(invalid("directory must be relative to the project root"));
    }
    if dir.components().any(|c| c == Component::ParentDir) {
        return Err(invalid("directory must stay inside the project root"));
    }
    if !dir.components().any(|c| matches!(c, Component::Normal(_))) {
        return Err(invalid("directory cannot be the project root"));
    }

    if !hides_companion(watch, dir) {
        return Err(ConfigError::UnexcludedCompanion {
            name: companion.name.clone(),
            dir: companion.dir.clone(),
        });
    }

    Ok(())
}

/// Entry names of different shapes a companion may write directly inside its directory.
const COMPANION_ENTRIES: &[&str] = &["target", ".cache", "build.log", "Cargo.lock", "x"];

/// The companion directory is hidden when the policy ignores it, or ignores
/// every kind of entry written directly inside it (`src-tauri/*`).
fn hides_companion(watch: &WatchPolicy, dir: &Path) -> bool {
    watch.is_ignored(dir)
        || COMPANION_ENTRIES
            .iter()
            .all(|entry| watch.is_ignored(dir.join(entry)))
}
