//! Input stream state.
//!
//! `InputStream` is the safe model of a readable C `FILE`: it wraps any
//! [`Read`] source, tracks EOF/error indicators and holds one byte of
//! pushback for `ungetc`. Bytes are pulled one at a time, so the wrapped
//! source should do its own buffering (`Stdin` does).

use std::io::{self, ErrorKind, Read};

/// Runtime stream state flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamFlags {
    pub eof: bool,
    pub error: bool,
}

/// Readable byte stream with one-byte pushback.
#[derive(Debug)]
pub struct InputStream<R> {
    inner: R,
    flags: StreamFlags,
    /// One-byte pushback for ungetc.
    ungetc_byte: Option<u8>,
}

impl<R: Read> InputStream<R> {
    /// Wrap a byte source.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            flags: StreamFlags::default(),
            ungetc_byte: None,
        }
    }

    /// Read one byte (POSIX `fgetc`).
    ///
    /// Returns `Ok(None)` at end-of-input. EOF is sticky: once the source
    /// reports it, later calls return `Ok(None)` without reading again,
    /// unless a byte was pushed back or [`clear_err`](Self::clear_err) ran.
    /// Interrupted reads are retried.
    pub fn getc(&mut self) -> io::Result<Option<u8>> {
        if let Some(b) = self.ungetc_byte.take() {
            return Ok(Some(b));
        }
        if self.flags.eof {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => {
                    self.flags.eof = true;
                    return Ok(None);
                }
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.flags.error = true;
                    return Err(err);
                }
            }
        }
    }

    /// Push a byte back (POSIX `ungetc`). Returns false if one is already
    /// pushed back.
    pub fn ungetc(&mut self, byte: u8) -> bool {
        if self.ungetc_byte.is_some() {
            return false;
        }
        self.ungetc_byte = Some(byte);
        self.flags.eof = false; // POSIX: ungetc clears EOF
        true
    }
}

impl<R> InputStream<R> {
    /// Check if EOF has been reached.
    pub fn is_eof(&self) -> bool {
        self.flags.eof
    }

    /// Check if an error has occurred.
    pub fn is_error(&self) -> bool {
        self.flags.error
    }

    /// Clear EOF and error indicators.
    pub fn clear_err(&mut self) {
        self.flags.eof = false;
        self.flags.error = false;
    }

    /// Whether a pushed-back byte is waiting.
    pub fn has_pushback(&self) -> bool {
        self.ungetc_byte.is_some()
    }

    /// Borrow the wrapped source.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwrap the source. A pending pushback byte is lost.
    pub fn into_inner(self) -> R {
        self.inner
    }
}
