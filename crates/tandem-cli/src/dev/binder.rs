//! Socket binding for the dev server.
//!
//! With strict binding the requested port is the only candidate; any failure
//! is fatal. Otherwise the configured fallbacks are tried in order, followed by
//! the next ten ports.

use std::io;
use std::net::TcpListener;

use tandem_config::ServerBinding;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum BindError {
    #[error("port {port} on {host} is unavailable and strict port binding is enabled: {source}")]
    PortInUse {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("no available port on {host}; tried {tried:?}")]
    NoAvailablePort { host: String, tried: Vec<u16> },
}

/// Bind the listener described by `binding`.
pub fn bind(binding: &ServerBinding) -> Result<TcpListener, BindError> {
    let requested = match try_bind(&binding.host, binding.port) {
        Ok(listener) => return Ok(listener),
        Err(err) => err,
    };

    if binding.strict {
        return Err(BindError::PortInUse {
            host: binding.host.clone(),
            port: binding.port,
            source: requested,
        });
    }

    let mut tried = vec![binding.port];
    for port in binding.candidate_ports() {
        match try_bind(&binding.host, port) {
            Ok(listener) => {
                warn!(
                    requested = binding.port,
                    port, "port {} is busy, using port {} instead", binding.port, port
                );
                return Ok(listener);
            }
            Err(err) => {
                debug!(port, error = %err, "candidate port unavailable");
                tried.push(port);
            }
        }
    }

    Err(BindError::NoAvailablePort {
        host: binding.host.clone(),
        tried,
    })
}

fn try_bind(host: &str, port: u16) -> io::Result<TcpListener> {
    TcpListener::bind((host, port))
}
