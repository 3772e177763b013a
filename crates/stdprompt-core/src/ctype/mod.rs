//! Character classification and line trimming.
//!
//! C locale only. The whitespace class is the `isspace(3)` set: space,
//! tab, newline, vertical tab, form feed and carriage return.

/// Returns `true` if `c` is a whitespace character.
#[inline]
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Returns `true` if `c` is a decimal digit (`[0-9]`).
#[inline]
pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Strips leading whitespace.
pub fn trim_start(s: &[u8]) -> &[u8] {
    let start = s.iter().position(|&c| !is_space(c)).unwrap_or(s.len());
    &s[start..]
}

/// Strips trailing whitespace.
pub fn trim_end(s: &[u8]) -> &[u8] {
    let end = s.iter().rposition(|&c| !is_space(c)).map_or(0, |i| i + 1);
    &s[..end]
}

/// Strips leading and trailing whitespace.
pub fn trim(s: &[u8]) -> &[u8] {
    trim_end(trim_start(s))
}

/// Returns `true` if every byte of `s` is whitespace (vacuously for empty).
pub fn is_blank(s: &[u8]) -> bool {
    s.iter().all(|&c| is_space(c))
}
