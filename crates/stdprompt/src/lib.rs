//! # stdprompt
//!
//! Prompt for and read typed values from standard input.
//!
//! Every function writes an optional prompt to stdout, reads one line from
//! stdin and, for the typed getters, keeps asking until the line parses.
//! `None` means input ran out or could not be read at all.
//!
//! ```no_run
//! use stdprompt::{get_int, get_string};
//!
//! let name = get_string!("Name: ");
//! let age = get_int!("Age: ");
//! ```
//!
//! Lines returned by [`get_string`] are kept alive by the process-wide
//! session until exit, when the [`shutdown`] hook releases them.

pub mod global;
mod macros;
pub mod sentinel;
pub mod shutdown;

use std::ffi::{
    c_char, c_double, c_float, c_int, c_long, c_longlong, c_uchar, c_uint, c_ulong, c_ulonglong,
};

pub use global::{StdSession, is_initialized, with_session};
pub use stdprompt_core::{Line, Prompt, PromptValue, ReadError, ReleaseSummary, Session};

/// Read one line. An empty line is `Some` of an empty [`Line`].
pub fn get_string(prompt: Prompt<'_>) -> Option<Line> {
    with_session(|s| s.get_string(prompt).ok())
}

/// Generic getter, e.g. `stdprompt::get::<u16>(None)`.
pub fn get<T: PromptValue>(prompt: Prompt<'_>) -> Option<T> {
    with_session(|s| s.get::<T>(prompt).ok())
}

macro_rules! facade_getters {
    ($($name:ident -> $t:ty;)*) => {
        $(
            pub fn $name(prompt: Prompt<'_>) -> Option<$t> {
                with_session(|s| s.$name(prompt).ok())
            }
        )*
    };
}

facade_getters! {
    get_char -> c_char;
    get_unsigned_char -> c_uchar;
    get_int -> c_int;
    get_unsigned_int -> c_uint;
    get_long -> c_long;
    get_unsigned_long -> c_ulong;
    get_long_long -> c_longlong;
    get_unsigned_long_long -> c_ulonglong;
    get_float -> c_float;
    get_double -> c_double;
    get_long_double -> f64;
}
