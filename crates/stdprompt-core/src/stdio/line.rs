//! Line Reader.
//!
//! Reads one line from an [`InputStream`] into a growable buffer and
//! freezes it into an immutable, shared [`Line`].
//!
//! Line endings: `\n`, `\r` and `\r\n` all end a line and are never part of
//! its content. After a `\r` the next byte is peeked; anything other than
//! `\n` is pushed back for the next read. End-of-input ends a non-empty
//! line; end-of-input before any byte is [`ReadError::Eof`].
//!
//! Growth: the buffer starts at [`INITIAL_CAPACITY`] bytes and doubles
//! whenever it is full. Growth that would overflow `usize` fails with
//! [`ReadError::CapacityOverflow`]; allocator refusals fail with
//! [`ReadError::Alloc`]. In both cases the partial buffer is dropped.

use std::borrow::Cow;
use std::ffi::CStr;
use std::fmt;
use std::io::Read;
use std::ops::Deref;
use std::str::Utf8Error;
use std::sync::Arc;

use serde::Serialize;

use super::stream::InputStream;
use crate::error::ReadError;

/// Capacity of a fresh line buffer.
pub const INITIAL_CAPACITY: usize = 16;

/// How a line ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminator {
    Lf,
    Cr,
    CrLf,
    /// End-of-input after at least one byte.
    Eof,
}

impl Terminator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "lf",
            Self::Cr => "cr",
            Self::CrLf => "crlf",
            Self::Eof => "eof",
        }
    }
}

/// Bytes of one line, still mutable and not yet registered.
#[derive(Debug)]
pub struct RawLine {
    bytes: Vec<u8>,
    terminator: Terminator,
}

impl RawLine {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn terminator(&self) -> Terminator {
        self.terminator
    }

    /// Capacity the buffer reached while reading.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Append the NUL terminator and freeze into an exactly-sized [`Line`].
    ///
    /// Only the NUL slot is reserved fallibly. The final copy into shared
    /// storage goes through `Arc::from`, which has no fallible form: if the
    /// allocator refuses it, the process aborts instead of returning
    /// [`ReadError::Alloc`].
    pub fn into_line(self) -> Result<Line, ReadError> {
        let mut bytes = self.bytes;
        if bytes.len() == bytes.capacity() {
            bytes.try_reserve_exact(1)?;
        }
        bytes.push(0);
        Ok(Line {
            bytes: Arc::from(bytes),
        })
    }
}

/// Double the capacity of a full buffer.
fn grow(bytes: &mut Vec<u8>) -> Result<(), ReadError> {
    let capacity = bytes.capacity();
    if capacity >= usize::MAX / 2 {
        return Err(ReadError::CapacityOverflow);
    }
    // len == capacity here, so reserving `capacity` more doubles it.
    bytes.try_reserve_exact(capacity)?;
    Ok(())
}

/// Resolve a `\r`: swallow a following `\n`, push anything else back.
fn finish_cr<R: Read>(stream: &mut InputStream<R>) -> Result<Terminator, ReadError> {
    match stream.getc()? {
        Some(b'\n') => Ok(Terminator::CrLf),
        Some(next) => {
            if stream.ungetc(next) {
                Ok(Terminator::Cr)
            } else {
                Err(ReadError::Pushback)
            }
        }
        None => Ok(Terminator::Cr),
    }
}

/// Read one line from `stream`.
pub fn read_raw_line<R: Read>(stream: &mut InputStream<R>) -> Result<RawLine, ReadError> {
    let mut bytes = Vec::new();
    bytes.try_reserve_exact(INITIAL_CAPACITY)?;

    let terminator = loop {
        match stream.getc()? {
            None => break Terminator::Eof,
            Some(b'\n') => break Terminator::Lf,
            Some(b'\r') => break finish_cr(stream)?,
            Some(byte) => {
                if bytes.len() == bytes.capacity() {
                    grow(&mut bytes)?;
                }
                bytes.push(byte);
            }
        }
    };

    if bytes.is_empty() && terminator == Terminator::Eof {
        return Err(ReadError::Eof);
    }

    Ok(RawLine { bytes, terminator })
}

/// One line of input, immutable and cheaply clonable.
///
/// Storage is exactly the content plus a trailing NUL byte, shared between
/// every clone. The content never includes the line terminator.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Line {
    bytes: Arc<[u8]>,
}

impl Line {
    /// Build a line from raw content (used outside the reader, e.g. tests).
    #[must_use]
    pub fn new(content: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(content.len() + 1);
        bytes.extend_from_slice(content);
        bytes.push(0);
        Self {
            bytes: Arc::from(bytes),
        }
    }

    /// Content without the trailing NUL.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    /// Content including the trailing NUL.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    /// NUL-terminated view. Stops at the first NUL, so input containing a
    /// NUL byte is truncated here but not in [`as_bytes`](Self::as_bytes).
    #[must_use]
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(&self.bytes).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Returns true if both handles share the same storage.
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.bytes, &other.bytes)
    }

    /// Number of live handles to this line's storage.
    #[must_use]
    pub fn handle_count(this: &Self) -> usize {
        Arc::strong_count(&this.bytes)
    }
}

impl Deref for Line {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Line {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl PartialEq<str> for Line {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Line {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<[u8]> for Line {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn stream(input: &[u8]) -> InputStream<Cursor<Vec<u8>>> {
        InputStream::new(Cursor::new(input.to_vec()))
    }

    #[test]
    fn test_terminators_give_identical_content() {
        for input in [&b"hello\n"[..], b"hello\r", b"hello\r\n", b"hello"] {
            let mut s = stream(input);
            let raw = read_raw_line(&mut s).unwrap();
            assert_eq!(raw.as_bytes(), b"hello", "input {input:?}");
        }
    }

    #[test]
    fn test_terminator_kinds() {
        let mut s = stream(b"a\nb\rc\r\nd");
        assert_eq!(read_raw_line(&mut s).unwrap().terminator(), Terminator::Lf);
        assert_eq!(read_raw_line(&mut s).unwrap().terminator(), Terminator::Cr);
        assert_eq!(read_raw_line(&mut s).unwrap().terminator(), Terminator::CrLf);
        assert_eq!(read_raw_line(&mut s).unwrap().terminator(), Terminator::Eof);
        assert!(matches!(read_raw_line(&mut s), Err(ReadError::Eof)));
    }

    #[test]
    fn test_bare_cr_pushes_back_next_byte() {
        let mut s = stream(b"one\rtwo\n");
        assert_eq!(read_raw_line(&mut s).unwrap().as_bytes(), b"one");
        assert_eq!(read_raw_line(&mut s).unwrap().as_bytes(), b"two");
    }

    #[test]
    fn test_cr_cr_is_two_lines() {
        let mut s = stream(b"\r\r");
        assert_eq!(read_raw_line(&mut s).unwrap().as_bytes(), b"");
        assert_eq!(read_raw_line(&mut s).unwrap().as_bytes(), b"");
        assert!(matches!(read_raw_line(&mut s), Err(ReadError::Eof)));
    }

    #[test]
    fn test_empty_line_is_not_eof() {
        let mut s = stream(b"\n");
        let raw = read_raw_line(&mut s).unwrap();
        assert!(raw.as_bytes().is_empty());
        assert!(matches!(read_raw_line(&mut s), Err(ReadError::Eof)));
    }

    #[test]
    fn test_empty_input_is_eof() {
        let mut s = stream(b"");
        assert!(matches!(read_raw_line(&mut s), Err(ReadError::Eof)));
    }

    #[test]
    fn test_growth_boundaries_round_trip() {
        for len in [
            INITIAL_CAPACITY - 1,
            INITIAL_CAPACITY,
            INITIAL_CAPACITY + 1,
            INITIAL_CAPACITY * 4 + 3,
        ] {
            let content: Vec<u8> = (0..len).map(|i| b'a' + (i % 26) as u8).collect();
            let mut input = content.clone();
            input.push(b'\n');
            let mut s = stream(&input);
            let raw = read_raw_line(&mut s).unwrap();
            assert_eq!(raw.as_bytes(), &content[..], "len {len}");
            assert!(raw.capacity() >= len);
            let line = raw.into_line().unwrap();
            assert_eq!(line.as_bytes(), &content[..]);
            assert_eq!(line.as_bytes_with_nul().len(), len + 1);
        }
    }

    #[test]
    fn test_growth_doubles_capacity() {
        let mut s = stream(&[b'x'; INITIAL_CAPACITY + 1]);
        let raw = read_raw_line(&mut s).unwrap();
        assert!(raw.capacity() >= INITIAL_CAPACITY * 2);
    }

    #[test]
    fn test_line_views() {
        let line = Line::new(b"ab\0cd");
        assert_eq!(line.len(), 5);
        assert_eq!(line.as_bytes(), b"ab\0cd");
        assert_eq!(line.as_c_str().to_bytes(), b"ab");
        assert_eq!(line.as_bytes_with_nul().last(), Some(&0));

        let text = Line::new("héllo".as_bytes());
        assert_eq!(text.to_str().unwrap(), "héllo");
        assert_eq!(text, "héllo");
        assert_eq!(format!("{text}"), "héllo");

        let bad = Line::new(&[0xff, b'a']);
        assert!(bad.to_str().is_err());
        assert_eq!(bad.to_string_lossy(), "\u{fffd}a");
    }

    #[test]
    fn test_line_clones_share_storage() {
        let line = Line::new(b"shared");
        let copy = line.clone();
        assert!(Line::ptr_eq(&line, &copy));
        assert_eq!(Line::handle_count(&line), 2);
        drop(copy);
        assert_eq!(Line::handle_count(&line), 1);
    }
}
