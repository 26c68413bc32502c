//! Network endpoint the dev server listens on.

use serde::Serialize;

use crate::error::{ConfigError, Result};

/// Port substituted when a request leaves `port` unset.
pub const DEFAULT_PORT: u16 = 1420;

/// Host substituted when a request leaves `host` unset.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Fully resolved listener settings.
///
/// When `strict` is set the binder must fail rather than pick another port,
/// and `fallback_ports` is guaranteed to be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ServerBinding {
    pub host: String,
    pub port: u16,
    pub strict: bool,
    pub fallback_ports: Vec<u16>,
}

impl ServerBinding {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Ports a non-strict binder may try after the requested one, in order.
    ///
    /// Explicit fallbacks come first, followed by the next ten ports above the
    /// requested one. Strict bindings have no candidates.
    pub fn candidate_ports(&self) -> Vec<u16> {
        if self.strict {
            return Vec::new();
        }

        let mut ports: Vec<u16> = Vec::with_capacity(self.fallback_ports.len() + 10);
        let sequential = (1..=10).filter_map(|offset| self.port.checked_add(offset));
        for port in self.fallback_ports.iter().copied().chain(sequential) {
            if port != self.port && !ports.contains(&port) {
                ports.push(port);
            }
        }
        ports
    }
}

/// Validate a raw port number from a request or config file.
pub fn validate_port(port: i64) -> Result<u16> {
    match u16::try_from(port) {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(ConfigError::InvalidPort { port }),
    }
}
