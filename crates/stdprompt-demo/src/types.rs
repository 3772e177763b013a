//! Type names the demo accepts and how each one is read and shown.

use std::ffi::{
    c_char, c_double, c_float, c_int, c_long, c_longlong, c_uchar, c_uint, c_ulong, c_ulonglong,
};

use stdprompt::sentinel;

use crate::error::DemoError;

macro_rules! prompt {
    () => {
        Some(format_args!("Input : "))
    };
}

/// Decimal digits shown for `float` (C `FLT_DIG`).
const FLT_DIG: usize = 6;
/// Decimal digits shown for `double` and `ldouble` (C `DBL_DIG`).
const DBL_DIG: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Str,
    Char,
    UChar,
    Int,
    UInt,
    Long,
    ULong,
    LLong,
    ULLong,
    Float,
    Double,
    LDouble,
}

impl TypeName {
    /// Every accepted type, in usage-table order.
    pub const ALL: [Self; 12] = [
        Self::Str,
        Self::Char,
        Self::UChar,
        Self::Int,
        Self::UInt,
        Self::Long,
        Self::ULong,
        Self::LLong,
        Self::ULLong,
        Self::Float,
        Self::Double,
        Self::LDouble,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Char => "char",
            Self::UChar => "uchar",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Long => "long",
            Self::ULong => "ulong",
            Self::LLong => "llong",
            Self::ULLong => "ullong",
            Self::Float => "float",
            Self::Double => "double",
            Self::LDouble => "ldouble",
        }
    }

    /// Exact, case-sensitive lookup.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Subject of the failure message.
    #[must_use]
    pub const fn failure_subject(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Char => "char or sentinel value",
            Self::UChar => "unsigned char or sentinel value",
            Self::Int => "int or sentinel value",
            Self::UInt => "unsigned int or sentinel value",
            Self::Long => "long or sentinel value",
            Self::ULong => "unsigned long or sentinel value",
            Self::LLong => "long long or sentinel value",
            Self::ULLong => "unsigned long long or sentinel value",
            Self::Float => "float or sentinel value",
            Self::Double => "double or sentinel value",
            Self::LDouble => "long double or sentinel value",
        }
    }

    /// Prompt for one value and render it for the `Output:` line.
    pub fn read_and_render(self) -> Result<Vec<u8>, DemoError> {
        let failed = DemoError::Sentinel {
            what: self.failure_subject(),
        };
        let rendered = match self {
            Self::Str => sentinel::get_string(prompt!())
                .map(|line| line.as_bytes().to_vec())
                .ok_or(failed)?,
            Self::Char => {
                let c = checked(sentinel::get_char(prompt!()), c_char::MAX, failed)?;
                vec![c as u8]
            }
            Self::UChar => render(checked(
                sentinel::get_unsigned_char(prompt!()),
                c_uchar::MAX,
                failed,
            )?),
            Self::Int => render(checked(sentinel::get_int(prompt!()), c_int::MAX, failed)?),
            Self::UInt => render(checked(
                sentinel::get_unsigned_int(prompt!()),
                c_uint::MAX,
                failed,
            )?),
            Self::Long => render(checked(sentinel::get_long(prompt!()), c_long::MAX, failed)?),
            Self::ULong => render(checked(
                sentinel::get_unsigned_long(prompt!()),
                c_ulong::MAX,
                failed,
            )?),
            Self::LLong => render(checked(
                sentinel::get_long_long(prompt!()),
                c_longlong::MAX,
                failed,
            )?),
            Self::ULLong => render(checked(
                sentinel::get_unsigned_long_long(prompt!()),
                c_ulonglong::MAX,
                failed,
            )?),
            Self::Float => {
                let v = checked(sentinel::get_float(prompt!()), c_float::MAX, failed)?;
                format!("{:.*}", FLT_DIG, v).into_bytes()
            }
            Self::Double => {
                let v = checked(sentinel::get_double(prompt!()), c_double::MAX, failed)?;
                format!("{:.*}", DBL_DIG, v).into_bytes()
            }
            Self::LDouble => {
                let v = checked(sentinel::get_long_double(prompt!()), f64::MAX, failed)?;
                format!("{:.*}", DBL_DIG, v).into_bytes()
            }
        };
        Ok(rendered)
    }
}

fn checked<T: PartialEq>(value: T, sentinel: T, failed: DemoError) -> Result<T, DemoError> {
    if value == sentinel { Err(failed) } else { Ok(value) }
}

fn render(value: impl std::fmt::Display) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// Usage line plus the bordered table of type names.
#[must_use]
pub fn usage(program: &str) -> String {
    let width = TypeName::ALL
        .iter()
        .map(|t| t.name().len())
        .max()
        .unwrap_or(0)
        + 2;
    let border = format!("+{}+\n", "-".repeat(width + 2));

    let mut out = format!("\nUsage: {program} <type>\n");
    out.push_str(&border);
    out.push_str(&format!("| {:<width$} |\n", "Type"));
    out.push_str(&border);
    for t in TypeName::ALL {
        out.push_str(&format!("| {:<width$} |\n", t.name()));
    }
    out.push_str(&border);
    out.push('\n');
    out
}
