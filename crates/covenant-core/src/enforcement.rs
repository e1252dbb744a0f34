//! Process-wide enforcement toggle.
//!
//! Explicit global state with a simple lifecycle: read before each wrapped
//! call, mutated only by [`set_enabled`]. When off, wrapped callables
//! delegate directly and no checks run.

use std::sync::atomic::{AtomicBool, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turns contract enforcement on or off for the whole process.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
    tracing::debug!(enabled, "contract enforcement toggled");
}

/// Returns true when contracts are being enforced. Default is on.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}
