//! Dev server collaborators that consume the resolved configuration.
//!
//! - [`binder`] reads `ServerBinding` and opens the listener
//! - [`watcher`] reads `WatchPolicy` and reports relevant changes
//! - [`server`] serves the project root over the bound listener

pub mod binder;
pub mod server;
pub mod watcher;

pub use binder::{bind, BindError};
pub use server::DevServer;
pub use watcher::{FileChange, FileWatcher};
