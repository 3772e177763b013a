//! `format!`-style front ends for the getters.
//!
//! ```no_run
//! let age = stdprompt::get_int!("Age of {}: ", "Ada");
//! let line = stdprompt::get_string!();
//! ```

/// Expands to a [`Prompt`](stdprompt_core::Prompt): `None` for no
/// arguments, `Some(format_args!(..))` otherwise.
#[doc(hidden)]
#[macro_export]
macro_rules! __prompt {
    () => {
        ::core::option::Option::None
    };
    ($($arg:tt)+) => {
        ::core::option::Option::Some(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! get_string {
    ($($arg:tt)*) => {
        $crate::get_string($crate::__prompt!($($arg)*))
    };
}

#[macro_export]
macro_rules! get_char {
    ($($arg:tt)*) => {
        $crate::get_char($crate::__prompt!($($arg)*))
    };
}

#[macro_export]
macro_rules! get_unsigned_char {
    ($($arg:tt)*) => {
        $crate::get_unsigned_char($crate::__prompt!($($arg)*))
    };
}

#[macro_export]
macro_rules! get_int {
    ($($arg:tt)*) => {
        $crate::get_int($crate::__prompt!($($arg)*))
    };
}

#[macro_export]
macro_rules! get_unsigned_int {
    ($($arg:tt)*) => {
        $crate::get_unsigned_int($crate::__prompt!($($arg)*))
    };
}

#[macro_export]
macro_rules! get_long {
    ($($arg:tt)*) => {
        $crate::get_long($crate::__prompt!($($arg)*))
    };
}

#[macro_export]
macro_rules! get_unsigned_long {
    ($($arg:tt)*) => {
        $crate::get_unsigned_long($crate::__prompt!($($arg)*))
    };
}

#[macro_export]
macro_rules! get_long_long {
    ($($arg:tt)*) => {
        $crate::get_long_long($crate::__prompt!($($arg)*))
    };
}

#[macro_export]
macro_rules! get_unsigned_long_long {
    ($($arg:tt)*) => {
        $crate::get_unsigned_long_long($crate::__prompt!($($arg)*))
    };
}

#[macro_export]
macro_rules! get_float {
    ($($arg:tt)*) => {
        $crate::get_float($crate::__prompt!($($arg)*))
    };
}

#[macro_export]
macro_rules! get_double {
    ($($arg:tt)*) => {
        $crate::get_double($crate::__prompt!($($arg)*))
    };
}

#[macro_export]
macro_rules! get_long_double {
    ($($arg:tt)*) => {
        $crate::get_long_double($crate::__prompt!($($arg)*))
    };
}
