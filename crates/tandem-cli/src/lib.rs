//! Tandem CLI - runs a frontend dev server next to a companion native build.
//!
//! The heavy lifting lives in `tandem-config`, which resolves the effective
//! server configuration. This crate is the surrounding tooling that consumes it:
//!
//! - [`dev::binder`] - binds the listener, honoring strict port binding
//! - [`dev::watcher`] - file watching filtered through the resolved watch policy
//! - [`dev::server`] - static file server for the project root
//! - [`commands`] - `check`, `explain` and `dev`
//! - [`error`] - error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - colored status messages

pub mod cli;
pub mod commands;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
