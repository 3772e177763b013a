//! Shutdown Hook: releases the process-wide registry at normal exit.
//!
//! Rust never drops statics, so the global session's registry is released
//! from an `atexit` handler instead.

#![allow(unsafe_code)]

use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use stdprompt_core::ReleaseSummary;

use crate::global;

static INSTALL: Once = Once::new();
static REGISTERED: AtomicBool = AtomicBool::new(false);

/// Register the exit handler. Runs at most once per process; later calls
/// report the first call's outcome.
pub fn install() -> bool {
    INSTALL.call_once(|| {
        // SAFETY: `teardown_hook` is a plain `extern "C" fn()` that takes
        // no arguments and never unwinds across the boundary.
        let rc = unsafe { libc::atexit(teardown_hook) };
        REGISTERED.store(rc == 0, Ordering::Release);
    });
    REGISTERED.load(Ordering::Acquire)
}

/// Returns true if the exit handler is registered.
#[must_use]
pub fn is_installed() -> bool {
    REGISTERED.load(Ordering::Acquire)
}

/// Release every line held by the process-wide session.
///
/// Returns `None` when no session was ever created, or when another
/// thread holds it (exit raced with a blocked read).
pub fn teardown() -> Option<ReleaseSummary> {
    let session = global::existing()?;
    let mut guard = session.try_lock()?;
    Some(guard.close())
}

extern "C" fn teardown_hook() {
    let _ = std::panic::catch_unwind(teardown);
}
