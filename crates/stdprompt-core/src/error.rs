//! Line Reader failures.
//!
//! Every variant means "no line": a failed read never hands back partial
//! content.

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    /// End-of-input before any byte of the line.
    #[error("end of input")]
    Eof,
    /// Line buffer or registry growth would overflow addressable memory.
    #[error("buffer growth would overflow addressable memory")]
    CapacityOverflow,
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
    #[error("io: {0}")]
    Io(#[from] io::Error),
    /// The byte peeked after a `\r` could not be pushed back.
    #[error("pushback slot already occupied")]
    Pushback,
}

impl ReadError {
    /// Short stable name used in structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Eof => "eof",
            Self::CapacityOverflow => "capacity_overflow",
            Self::Alloc(_) => "alloc",
            Self::Io(_) => "io",
            Self::Pushback => "pushback",
        }
    }

    /// True when input is simply exhausted, as opposed to a resource or
    /// device failure.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}
