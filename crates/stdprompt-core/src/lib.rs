//! # stdprompt-core
//!
//! Safe Rust implementation of a line-oriented console input library.
//!
//! The crate is layered leaf first:
//! - [`stdio`]: byte stream with one-byte pushback and the Line Reader that
//!   turns it into owned [`Line`] buffers.
//! - [`registry`]: the Ownership Registry recording every line handed out.
//! - [`getter`]: trimming and typed parsing of a line.
//! - [`session`]: the [`Session`] tying prompt output, line input, the
//!   registry and the retry loops together.
//!
//! No `unsafe` code is permitted at the crate level.

#![deny(unsafe_code)]

pub mod config;
pub mod conversion;
pub mod ctype;
pub mod error;
pub mod getter;
pub mod registry;
pub mod session;
pub mod stdio;
pub mod structured_log;

pub use config::{LogTarget, SessionConfig, process_config};
pub use error::ReadError;
pub use getter::{PromptValue, Rejection};
pub use registry::{LineRegistry, ReleaseSummary};
pub use session::{Prompt, Session};
pub use stdio::{INITIAL_CAPACITY, InputStream, Line, Terminator};
pub use structured_log::{LogEmitter, LogEntry, LogLevel};
