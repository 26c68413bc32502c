//! Terminal status messages.
//!
//! Everything is written to stderr so stdout stays free for machine-readable
//! output such as `tandem check --json`.

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{error, info, success, warning};

static COLOR: AtomicBool = AtomicBool::new(true);

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, falling back to terminal detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Detect color support once, early in `main`.
pub fn init_colors() {
    set_color(should_use_color());
}

/// Force colors on or off (`--no-color`).
pub fn set_color(enabled: bool) {
    COLOR.store(enabled, Ordering::Relaxed);
}

pub(crate) fn color_enabled() -> bool {
    COLOR.load(Ordering::Relaxed)
}
