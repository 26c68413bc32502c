//! Static dev server over an already-bound listener.
//!
//! Serves the project root and exposes the effective configuration at
//! `/__tandem/config` for tooling that wants to inspect it.

use crate::error::{CliError, Result};
use axum::{extract::State, routing::get, Json, Router};
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::Arc;
use tandem_config::EffectiveConfig;
use tower_http::services::ServeDir;

/// Route exposing the effective configuration as JSON.
pub const CONFIG_ROUTE: &str = "/__tandem/config";

/// Development server.
pub struct DevServer {
    listener: TcpListener,
    root: PathBuf,
    config: Arc<EffectiveConfig>,
}

impl DevServer {
    /// Wrap a listener produced by [`crate::dev::bind`].
    pub fn new(listener: TcpListener, root: PathBuf, config: Arc<EffectiveConfig>) -> Self {
        Self {
            listener,
            root,
            config,
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the task is cancelled or the listener fails.
    pub async fn start(self) -> Result<()> {
        self.listener.set_nonblocking(true)?;
        let listener = tokio::net::TcpListener::from_std(self.listener)?;
        let app = router(self.root, self.config);

        axum::serve(listener, app)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {e}")))
    }
}

fn router(root: PathBuf, config: Arc<EffectiveConfig>) -> Router {
    Router::new()
        .route(CONFIG_ROUTE, get(effective_config))
        .fallback_service(ServeDir::new(root))
        .with_state(config)
}

async fn effective_config(State(config): State<Arc<EffectiveConfig>>) -> Json<EffectiveConfig> {
    Json(config.as_ref().clone())
}
