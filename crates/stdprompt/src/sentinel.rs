//! Legacy sentinel API.
//!
//! Each getter returns its type's maximum value when no value could be
//! produced, the way the C interface signals failure. That maximum is also
//! a value the user can type, so a sentinel result is ambiguous; prefer the
//! `Option` returning functions at the crate root.
//!
//! Text has no sentinel: [`get_string`] still returns `None`, the analogue
//! of a null pointer.

use std::ffi::{
    c_char, c_double, c_float, c_int, c_long, c_longlong, c_uchar, c_uint, c_ulong, c_ulonglong,
};

use stdprompt_core::{Line, Prompt};

pub fn get_string(prompt: Prompt<'_>) -> Option<Line> {
    crate::get_string(prompt)
}

macro_rules! sentinel_getters {
    ($($(#[$meta:meta])* $name:ident -> $t:ty = $sentinel:expr;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(prompt: Prompt<'_>) -> $t {
                crate::$name(prompt).unwrap_or($sentinel)
            }
        )*
    };
}

sentinel_getters! {
    /// `CHAR_MAX` on failure.
    get_char -> c_char = c_char::MAX;
    get_unsigned_char -> c_uchar = c_uchar::MAX;
    get_int -> c_int = c_int::MAX;
    get_unsigned_int -> c_uint = c_uint::MAX;
    get_long -> c_long = c_long::MAX;
    get_unsigned_long -> c_ulong = c_ulong::MAX;
    get_long_long -> c_longlong = c_longlong::MAX;
    get_unsigned_long_long -> c_ulonglong = c_ulonglong::MAX;
    /// `FLT_MAX` on failure.
    get_float -> c_float = c_float::MAX;
    get_double -> c_double = c_double::MAX;
    get_long_double -> f64 = f64::MAX;
}
