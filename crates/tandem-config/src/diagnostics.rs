//! Non-fatal findings reported while resolving a request.

use std::fmt;

use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The same plugin instance was listed more than once; the later reference was dropped.
    DuplicatePlugin { name: String, position: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicatePlugin { name, position } => write!(
                f,
                "plugin '{name}' at position {position} is already registered; ignoring duplicate"
            ),
        }
    }
}

/// Receives diagnostics emitted by the resolver.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
