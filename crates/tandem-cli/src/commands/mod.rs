//! Command implementations for the Tandem CLI.
//!
//! - [`check`] - resolve and print the effective configuration
//! - [`explain`] - classify paths against the watch policy
//! - [`dev`] - bind, serve and watch

pub mod check;
pub mod dev;
pub mod explain;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use dev::execute as dev_execute;
pub use explain::execute as explain_execute;
