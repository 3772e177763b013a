//! Trim and parse one line into a typed value.
//!
//! Each parser takes the line as a C string would see it, trims C-locale
//! whitespace from both ends and either accepts the rest or returns the
//! [`Rejection`] that sends the caller back to the prompt. The session
//! passes [`Line::as_c_str`](crate::Line::as_c_str) bytes, so anything after
//! an embedded NUL is never seen: `"42\0junk"` reads as 42.

use crate::conversion::{ConversionStatus, FloatTarget, strto, strtol, strtoul};
use crate::ctype::{is_blank, trim};

/// Why a line was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing but whitespace.
    Blank,
    /// More than one non-whitespace byte for a character getter.
    NotSingleChar,
    /// No number at the start of the field.
    NoDigits,
    /// A `-` given to an unsigned getter.
    NegativeUnsigned,
    /// Conversion range error or value outside the target type.
    OutOfRange,
    /// Non-whitespace after the number.
    TrailingInput,
    /// Infinity or NaN.
    NonFinite,
}

impl Rejection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::NotSingleChar => "not_single_char",
            Self::NoDigits => "no_digits",
            Self::NegativeUnsigned => "negative_unsigned",
            Self::OutOfRange => "out_of_range",
            Self::TrailingInput => "trailing_input",
            Self::NonFinite => "non_finite",
        }
    }
}

fn non_blank(line: &[u8]) -> Result<&[u8], Rejection> {
    let field = trim(line);
    if field.is_empty() {
        Err(Rejection::Blank)
    } else {
        Ok(field)
    }
}

/// Exactly one byte must remain after trimming.
pub fn parse_char(line: &[u8]) -> Result<u8, Rejection> {
    match non_blank(line)? {
        [c] => Ok(*c),
        _ => Err(Rejection::NotSingleChar),
    }
}

/// Base-10 signed integer narrowed to `T`.
pub fn parse_signed<T: TryFrom<i64>>(line: &[u8]) -> Result<T, Rejection> {
    let field = non_blank(line)?;
    let (value, consumed, status) = strtol(field);
    if consumed == 0 {
        return Err(Rejection::NoDigits);
    }
    if status != ConversionStatus::Success {
        return Err(Rejection::OutOfRange);
    }
    if !is_blank(&field[consumed..]) {
        return Err(Rejection::TrailingInput);
    }
    T::try_from(value).map_err(|_| Rejection::OutOfRange)
}

/// Base-10 unsigned integer narrowed to `T`. A leading `-` is refused
/// before conversion, since `strtoul` would wrap it.
pub fn parse_unsigned<T: TryFrom<u64>>(line: &[u8]) -> Result<T, Rejection> {
    let field = non_blank(line)?;
    if field[0] == b'-' {
        return Err(Rejection::NegativeUnsigned);
    }
    let (value, consumed, status) = strtoul(field);
    if consumed == 0 {
        return Err(Rejection::NoDigits);
    }
    if status != ConversionStatus::Success {
        return Err(Rejection::OutOfRange);
    }
    if !is_blank(&field[consumed..]) {
        return Err(Rejection::TrailingInput);
    }
    T::try_from(value).map_err(|_| Rejection::OutOfRange)
}

/// Finite floating-point value of type `T`. Subnormal results count as a
/// range error.
pub fn parse_float<T: FloatTarget>(line: &[u8]) -> Result<T, Rejection> {
    let field = non_blank(line)?;
    let (value, consumed, status) = strto::<T>(field);
    if consumed == 0 {
        return Err(Rejection::NoDigits);
    }
    if status != ConversionStatus::Success {
        return Err(Rejection::OutOfRange);
    }
    if !is_blank(&field[consumed..]) {
        return Err(Rejection::TrailingInput);
    }
    if !value.is_finite() {
        return Err(Rejection::NonFinite);
    }
    if value.abs() > T::MAX {
        return Err(Rejection::OutOfRange);
    }
    Ok(value)
}

/// Values a typed getter can produce.
///
/// Implemented for the primitive types behind the C-compatible aliases, so
/// `c_int`, `c_ulong` and friends resolve to an impl on every platform.
/// The impl, and with it [`SYMBOL`](Self::SYMBOL), belongs to the primitive:
/// `get::<c_long>` logs as `get_long_long` wherever `c_long` is `i64`, and
/// `get::<c_char>` logs as `get_unsigned_char` where `c_char` is `u8`. The
/// named `Session` getters always log under their own names.
pub trait PromptValue: Sized {
    /// Getter name used in log records, named after the primitive's
    /// usual C type.
    const SYMBOL: &'static str;

    fn parse(line: &[u8]) -> Result<Self, Rejection>;
}

impl PromptValue for i8 {
    const SYMBOL: &'static str = "get_char";

    fn parse(line: &[u8]) -> Result<Self, Rejection> {
        parse_char(line).map(|b| b as i8)
    }
}

impl PromptValue for u8 {
    const SYMBOL: &'static str = "get_unsigned_char";

    fn parse(line: &[u8]) -> Result<Self, Rejection> {
        parse_char(line)
    }
}

macro_rules! impl_prompt_value {
    ($parser:ident: $($t:ty => $symbol:literal),* $(,)?) => {
        $(
            impl PromptValue for $t {
                const SYMBOL: &'static str = $symbol;

                fn parse(line: &[u8]) -> Result<Self, Rejection> {
                    $parser::<$t>(line)
                }
            }
        )*
    };
}

impl_prompt_value!(parse_signed: i16 => "get_short", i32 => "get_int", i64 => "get_long_long");
impl_prompt_value!(
    parse_unsigned: u16 => "get_unsigned_short",
    u32 => "get_unsigned_int",
    u64 => "get_unsigned_long_long",
);
impl_prompt_value!(parse_float: f32 => "get_float", f64 => "get_double");
