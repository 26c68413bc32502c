//! Dev-server configuration for a frontend that shares its project root with a
//! companion native build.
//!
//! The entry point is [`resolve`], a pure function from a [`ConfigRequest`] to an
//! immutable [`EffectiveConfig`] consumed by the socket binder and the file-watcher.
//!
//! ```
//! use tandem_config::{resolve, CompanionBuild, ConfigRequest};
//!
//! let request = ConfigRequest {
//!     port: Some(1420),
//!     strict: true,
//!     ignored_patterns: vec!["**/src-tauri/**".into()],
//!     companions: vec![CompanionBuild::new("tauri", "src-tauri")],
//!     ..Default::default()
//! };
//!
//! let config = resolve(&request).unwrap();
//! assert!(config.watch.is_ignored("src-tauri/target/debug/app"));
//! assert!(!config.watch.is_ignored("src/routes/+page.svelte"));
//! ```

pub mod binding;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod plugin;
pub mod resolve;
pub mod watch;

pub use binding::*;
pub use config::*;
pub use diagnostics::*;
pub use error::*;
pub use plugin::*;
pub use resolve::*;
pub use watch::*;

pub use discovery::{discover, discover_with_profile, ConfigDiscovery, CONFIG_FILE, ENV_PREFIX};
