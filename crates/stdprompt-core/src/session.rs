//! Prompt session: prompt output, line input, the Ownership Registry and
//! the typed retry loops.
//!
//! Every typed getter runs the same loop: write the prompt, read a line,
//! trim, parse. A rejected line loops back to the prompt with no bound; a
//! Line Reader failure ends the call with that error.
//!
//! Prompts are `format_args!` values (or `None` for no prompt). They are
//! flushed right after being written so they are visible before the read
//! blocks.

use std::ffi::{
    c_char, c_double, c_float, c_int, c_long, c_longlong, c_uchar, c_uint, c_ulong, c_ulonglong,
};
use std::fmt;
use std::io::{Read, Write};

use crate::config::SessionConfig;
use crate::error::ReadError;
use crate::getter::{
    PromptValue, Rejection, parse_char, parse_float, parse_signed, parse_unsigned,
};
use crate::registry::{LineRegistry, ReleaseSummary};
use crate::stdio::{InputStream, Line, read_raw_line};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel};

/// Optional rendered prompt.
pub type Prompt<'a> = Option<fmt::Arguments<'a>>;

/// One interactive input session.
///
/// Lines returned by [`read_line`](Self::read_line) stay registered until
/// [`close`](Self::close) or drop; callers may keep their own handles as
/// long as they like.
#[derive(Debug)]
pub struct Session<R, W> {
    input: InputStream<R>,
    output: W,
    registry: LineRegistry,
    log: Option<LogEmitter>,
    retries: u64,
}

impl<R: Read, W: Write> Session<R, W> {
    /// Create a session without logging.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: InputStream::new(input),
            output,
            registry: LineRegistry::new(),
            log: None,
            retries: 0,
        }
    }

    /// Create a session logging per `config`. Fails only when the
    /// configured log sink cannot be opened.
    pub fn from_config(input: R, output: W, config: &SessionConfig) -> std::io::Result<Self> {
        let log = config.open_log()?;
        let mut session = Self::new(input, output);
        session.log = log;
        Ok(session)
    }

    /// Cap how many lines may be held at once. Reads past the cap fail with
    /// [`ReadError::CapacityOverflow`] before any prompt or input, until
    /// [`close`](Self::close) empties the registry.
    #[must_use]
    pub fn with_line_limit(mut self, limit: usize) -> Self {
        self.registry.set_limit(limit);
        self
    }

    /// Attach a log emitter.
    #[must_use]
    pub fn with_log(mut self, log: LogEmitter) -> Self {
        self.log = Some(log);
        self
    }

    fn write_prompt(&mut self, prompt: Prompt<'_>) {
        let Some(args) = prompt else {
            return;
        };
        let written = self
            .output
            .write_fmt(args)
            .and_then(|()| self.output.flush());
        if let Err(err) = written {
            let reason = err.kind().to_string();
            self.log_with(LogLevel::Warn, "prompt_write_failed", |e| e.with_reason(&reason));
        }
    }

    /// Line Reader entry point: write the prompt, then read and register
    /// one line.
    pub fn read_line(&mut self, prompt: Prompt<'_>) -> Result<Line, ReadError> {
        match self.read_line_inner(prompt) {
            Ok(line) => Ok(line),
            Err(err) => {
                let reason = err.kind();
                self.log_with(LogLevel::Debug, "line_read_failed", |e| e.with_reason(reason));
                Err(err)
            }
        }
    }

    fn read_line_inner(&mut self, prompt: Prompt<'_>) -> Result<Line, ReadError> {
        if !self.registry.can_grow() {
            return Err(ReadError::CapacityOverflow);
        }
        self.write_prompt(prompt);

        let raw = read_raw_line(&mut self.input)?;
        let terminator = raw.terminator();
        let line = raw.into_line()?;
        self.registry.register(line.clone())?;

        let bytes = line.len();
        self.log_with(LogLevel::Trace, "line_read", |e| {
            e.with_bytes(bytes).with_terminator(terminator.as_str())
        });
        Ok(line)
    }

    /// Text getter: the line as read. An empty line is a valid result.
    pub fn get_string(&mut self, prompt: Prompt<'_>) -> Result<Line, ReadError> {
        self.read_line(prompt)
    }

    /// Retry loop shared by every typed getter.
    ///
    /// `symbol` names the getter in log records. `parse` sees the line up
    /// to its first NUL byte, as C string functions would.
    pub fn get_with<T>(
        &mut self,
        prompt: Prompt<'_>,
        symbol: &'static str,
        parse: impl Fn(&[u8]) -> Result<T, Rejection>,
    ) -> Result<T, ReadError> {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            let line = match self.read_line(prompt) {
                Ok(line) => line,
                Err(err) => {
                    let reason = err.kind();
                    self.log_with(LogLevel::Info, "give_up", |e| {
                        e.with_symbol(symbol).with_attempt(attempt).with_reason(reason)
                    });
                    return Err(err);
                }
            };
            match parse(line.as_c_str().to_bytes()) {
                Ok(value) => return Ok(value),
                Err(rejection) => {
                    self.retries += 1;
                    self.log_with(LogLevel::Debug, "parse_retry", |e| {
                        e.with_symbol(symbol)
                            .with_attempt(attempt)
                            .with_reason(rejection.as_str())
                    });
                }
            }
        }
    }

    /// Generic typed getter, e.g. `session.get::<c_int>(None)`.
    pub fn get<T: PromptValue>(&mut self, prompt: Prompt<'_>) -> Result<T, ReadError> {
        self.get_with(prompt, T::SYMBOL, T::parse)
    }

    pub fn get_char(&mut self, prompt: Prompt<'_>) -> Result<c_char, ReadError> {
        // Same bit pattern as C's `(char)byte` on either signedness.
        self.get_with(prompt, "get_char", |l| parse_char(l).map(|b| b as c_char))
    }

    pub fn get_unsigned_char(&mut self, prompt: Prompt<'_>) -> Result<c_uchar, ReadError> {
        self.get_with(prompt, "get_unsigned_char", parse_char)
    }

    pub fn get_int(&mut self, prompt: Prompt<'_>) -> Result<c_int, ReadError> {
        self.get_with(prompt, "get_int", parse_signed::<c_int>)
    }

    pub fn get_unsigned_int(&mut self, prompt: Prompt<'_>) -> Result<c_uint, ReadError> {
        self.get_with(prompt, "get_unsigned_int", parse_unsigned::<c_uint>)
    }

    pub fn get_long(&mut self, prompt: Prompt<'_>) -> Result<c_long, ReadError> {
        self.get_with(prompt, "get_long", parse_signed::<c_long>)
    }

    pub fn get_unsigned_long(&mut self, prompt: Prompt<'_>) -> Result<c_ulong, ReadError> {
        self.get_with(prompt, "get_unsigned_long", parse_unsigned::<c_ulong>)
    }

    pub fn get_long_long(&mut self, prompt: Prompt<'_>) -> Result<c_longlong, ReadError> {
        self.get_with(prompt, "get_long_long", parse_signed::<c_longlong>)
    }

    pub fn get_unsigned_long_long(
        &mut self,
        prompt: Prompt<'_>,
    ) -> Result<c_ulonglong, ReadError> {
        self.get_with(prompt, "get_unsigned_long_long", parse_unsigned::<c_ulonglong>)
    }

    pub fn get_float(&mut self, prompt: Prompt<'_>) -> Result<c_float, ReadError> {
        self.get_with(prompt, "get_float", parse_float::<c_float>)
    }

    pub fn get_double(&mut self, prompt: Prompt<'_>) -> Result<c_double, ReadError> {
        self.get_with(prompt, "get_double", parse_float::<c_double>)
    }

    /// `long double` getter. Rust has no extended-precision float, so this
    /// parses and returns `f64`.
    pub fn get_long_double(&mut self, prompt: Prompt<'_>) -> Result<f64, ReadError> {
        self.get_with(prompt, "get_long_double", parse_float::<f64>)
    }
}

impl<R, W> Session<R, W> {
    /// Lines handed out so far.
    pub fn registry(&self) -> &LineRegistry {
        &self.registry
    }

    pub fn input(&self) -> &InputStream<R> {
        &self.input
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Lines rejected by a typed getter over the session's life.
    pub fn retries(&self) -> u64 {
        self.retries
    }

    /// Release every registered line. Idempotent; the session stays usable.
    pub fn close(&mut self) -> ReleaseSummary {
        let summary = self.registry.release();
        if summary.lines > 0 {
            self.log_with(LogLevel::Info, "registry_release", |e| {
                e.with_bytes(summary.bytes)
                    .with_details(serde_json::json!({ "lines": summary.lines }))
            });
        }
        if let Some(log) = self.log.as_mut() {
            // Nowhere left to report a failing log sink.
            let _ = log.flush();
        }
        summary
    }

    fn log_with(&mut self, level: LogLevel, event: &str, fill: impl FnOnce(LogEntry) -> LogEntry) {
        let Some(log) = self.log.as_mut() else {
            return;
        };
        if !log.enabled(level) {
            return;
        }
        let entry = fill(LogEntry::new(String::new(), level, event));
        if log.emit_entry(entry).is_err() {
            // A broken sink stops logging; input handling carries on.
            self.log = None;
        }
    }
}

impl<R, W> Drop for Session<R, W> {
    fn drop(&mut self) {
        self.close();
    }
}
