//! Process-wide session bound to stdin/stdout.
//!
//! Created on first use. Creation also installs the exit-time release hook,
//! so every line the process ever read through this session is released
//! at normal termination.

use std::io::{Stdin, Stdout};
use std::sync::OnceLock;

use parking_lot::Mutex;
use stdprompt_core::{Session, process_config};

use crate::shutdown;

/// The session type behind the free functions.
pub type StdSession = Session<Stdin, Stdout>;

static GLOBAL_SESSION: OnceLock<Mutex<StdSession>> = OnceLock::new();

fn new_session() -> StdSession {
    match Session::from_config(std::io::stdin(), std::io::stdout(), process_config()) {
        Ok(session) => session,
        Err(err) => {
            // Input handling does not depend on the log sink.
            eprintln!("stdprompt: log sink unavailable: {err}");
            Session::new(std::io::stdin(), std::io::stdout())
        }
    }
}

fn global_session() -> &'static Mutex<StdSession> {
    GLOBAL_SESSION.get_or_init(|| {
        shutdown::install();
        Mutex::new(new_session())
    })
}

/// Run `f` with exclusive access to the process-wide session.
///
/// Calls from several threads are serialized; interleaved interactive use
/// is still the caller's problem.
pub fn with_session<T>(f: impl FnOnce(&mut StdSession) -> T) -> T {
    let mut session = global_session().lock();
    f(&mut session)
}

/// Returns true once the process-wide session exists.
#[must_use]
pub fn is_initialized() -> bool {
    GLOBAL_SESSION.get().is_some()
}

pub(crate) fn existing() -> Option<&'static Mutex<StdSession>> {
    GLOBAL_SESSION.get()
}
