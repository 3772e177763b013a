//! Numeric conversion functions (strtol, strtoul, strtof, strtod).
//!
//! Every conversion returns `(value, consumed_bytes, status)`. A consumed
//! length of zero means no number was recognized; the value is then zero.

pub mod float;
pub mod integer;

pub use float::{FloatTarget, strto, strtod, strtof};
pub use integer::{strtol, strtoul};

/// Result of a string-to-number conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Success,
    Overflow,
    Underflow,
}
