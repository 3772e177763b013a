//! Floating-point conversion with `strtof`/`strtod` semantics.
//!
//! Recognizes optional leading whitespace, an optional sign, then one of:
//! - a decimal significand (`digits [. digits]` or `. digits`) with an
//!   optional `e` exponent;
//! - a hexadecimal significand (`0x` then hex digits with an optional
//!   `.` fraction) with an optional `p` binary exponent;
//! - the words `inf`, `infinity`, `nan` / `nan(chars)`, case-insensitively.
//!
//! Decimal text is rounded by the target type's own `FromStr`. Hexadecimal
//! significands are rounded to the target's precision directly (ties to
//! even). Either way `strtof` rounds once to `f32` instead of going
//! through `f64`.

use std::ops::Neg;
use std::str::FromStr;

use super::ConversionStatus;
use crate::ctype::is_space;

/// Floating-point types the conversions can produce.
pub trait FloatTarget: Copy + PartialOrd + FromStr + Neg<Output = Self> {
    const ZERO: Self;
    const INFINITY: Self;
    const NEG_INFINITY: Self;
    const NAN: Self;
    /// Largest finite value.
    const MAX: Self;
    /// Significand bits, implicit bit included.
    const MANTISSA_DIGITS: u32;
    /// Normal values lie in `[2^(MIN_EXP - 1), 2^MAX_EXP)`.
    const MIN_EXP: i32;
    const MAX_EXP: i32;

    /// Narrow an `f64` that is exactly representable in `Self`.
    fn from_f64(v: f64) -> Self;
    fn is_finite(self) -> bool;
    fn is_subnormal(self) -> bool;
    fn abs(self) -> Self;
}

macro_rules! impl_float_target {
    ($($t:ty),* $(,)?) => {
        $(
            impl FloatTarget for $t {
                const ZERO: Self = 0.0;
                const INFINITY: Self = <$t>::INFINITY;
                const NEG_INFINITY: Self = <$t>::NEG_INFINITY;
                const NAN: Self = <$t>::NAN;
                const MAX: Self = <$t>::MAX;
                const MANTISSA_DIGITS: u32 = <$t>::MANTISSA_DIGITS;
                const MIN_EXP: i32 = <$t>::MIN_EXP;
                const MAX_EXP: i32 = <$t>::MAX_EXP;

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $t
                }

                #[inline]
                fn is_finite(self) -> bool {
                    <$t>::is_finite(self)
                }

                #[inline]
                fn is_subnormal(self) -> bool {
                    <$t>::is_subnormal(self)
                }

                #[inline]
                fn abs(self) -> Self {
                    <$t>::abs(self)
                }
            }
        )*
    };
}

impl_float_target!(f32, f64);

fn match_word(s: &[u8], at: usize, word: &[u8]) -> bool {
    s.get(at..at + word.len())
        .is_some_and(|window| window.eq_ignore_ascii_case(word))
}

/// Counts consecutive decimal digits from `i`, noting whether any is nonzero.
fn scan_digits(s: &[u8], mut i: usize, nonzero: &mut bool) -> (usize, usize) {
    let start = i;
    while let Some(&c) = s.get(i) {
        if !c.is_ascii_digit() {
            break;
        }
        if c != b'0' {
            *nonzero = true;
        }
        i += 1;
    }
    (i, i - start)
}

/// Generic `strtod` into any [`FloatTarget`]: returns (value,
/// consumed_bytes, status).
pub fn strto<T: FloatTarget>(s: &[u8]) -> (T, usize, ConversionStatus) {
    let mut i = 0;
    while i < s.len() && is_space(s[i]) {
        i += 1;
    }
    let number_start = i;

    let negative = match s.get(i) {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    if match_word(s, i, b"inf") {
        let end = if match_word(s, i, b"infinity") {
            i + 8
        } else {
            i + 3
        };
        let val = if negative { T::NEG_INFINITY } else { T::INFINITY };
        return (val, end, ConversionStatus::Success);
    }

    if match_word(s, i, b"nan") {
        let mut end = i + 3;
        if s.get(end) == Some(&b'(') {
            let mut j = end + 1;
            while s.get(j).is_some_and(|c| c.is_ascii_alphanumeric() || *c == b'_') {
                j += 1;
            }
            if s.get(j) == Some(&b')') {
                end = j + 1;
            }
        }
        return (T::NAN, end, ConversionStatus::Success);
    }

    if let Some((val, end, status)) = hex_float::<T>(s, i) {
        let val = if negative { -val } else { val };
        return (val, end, status);
    }

    let mut nonzero = false;
    let (after_int, int_digits) = scan_digits(s, i, &mut nonzero);
    i = after_int;
    let mut frac_digits = 0;
    if s.get(i) == Some(&b'.') {
        let (after_frac, count) = scan_digits(s, i + 1, &mut nonzero);
        if int_digits > 0 || count > 0 {
            i = after_frac;
            frac_digits = count;
        }
    }

    if int_digits + frac_digits == 0 {
        return (T::ZERO, 0, ConversionStatus::Success);
    }

    // The exponent only counts when at least one digit follows the marker.
    if matches!(s.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(s.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let mut ignored = false;
        let (after_exp, exp_digits) = scan_digits(s, j, &mut ignored);
        if exp_digits > 0 {
            i = after_exp;
        }
    }

    let Ok(text) = std::str::from_utf8(&s[number_start..i]) else {
        return (T::ZERO, 0, ConversionStatus::Success);
    };
    let Ok(val) = text.parse::<T>() else {
        return (T::ZERO, 0, ConversionStatus::Success);
    };

    let status = if !val.is_finite() {
        ConversionStatus::Overflow
    } else if (val == T::ZERO && nonzero) || val.is_subnormal() {
        ConversionStatus::Underflow
    } else {
        ConversionStatus::Success
    };

    (val, i, status)
}

/// Mantissa digits stop accumulating once this many bits are held; later
/// nonzero digits only set the sticky flag.
const HEX_MANTISSA_LIMIT: u64 = 1 << 60;
/// Exponent magnitudes past this are out of range for every target.
const HEX_EXPONENT_CAP: i64 = 1 << 20;

/// `2^e` for `e` in the normal `f64` exponent range.
fn pow2(e: i64) -> f64 {
    f64::from_bits(((e + 1023) as u64) << 52)
}

/// `x * 2^e` in steps that stay inside the normal range, so the result is
/// exact whenever it is representable.
fn scale_by_pow2(mut x: f64, mut e: i64) -> f64 {
    while e > 1023 {
        x *= pow2(1023);
        e -= 1023;
    }
    while e < -1022 {
        x *= pow2(-1022);
        e += 1022;
    }
    x * pow2(e)
}

/// Unsigned hexadecimal float starting at `i` (just past any sign).
///
/// Returns `None` unless `0x`/`0X` is followed by at least one hex digit
/// in the significand; the caller then reads the leading `0` as decimal.
fn hex_float<T: FloatTarget>(s: &[u8], i: usize) -> Option<(T, usize, ConversionStatus)> {
    if s.get(i) != Some(&b'0') || !matches!(s.get(i + 1), Some(b'x' | b'X')) {
        return None;
    }
    let hex_at = |j: usize| s.get(j).and_then(|c| (*c as char).to_digit(16));
    let start = i + 2;
    let has_digit = hex_at(start).is_some()
        || (s.get(start) == Some(&b'.') && hex_at(start + 1).is_some());
    if !has_digit {
        return None;
    }

    let mut mantissa: u64 = 0;
    let mut exponent: i64 = 0;
    let mut sticky = false;
    let mut j = start;
    while let Some(d) = hex_at(j) {
        if mantissa < HEX_MANTISSA_LIMIT {
            mantissa = mantissa * 16 + u64::from(d);
        } else {
            exponent += 4;
            sticky |= d != 0;
        }
        j += 1;
    }
    if s.get(j) == Some(&b'.') {
        j += 1;
        while let Some(d) = hex_at(j) {
            if mantissa < HEX_MANTISSA_LIMIT {
                mantissa = mantissa * 16 + u64::from(d);
                exponent -= 4;
            } else {
                sticky |= d != 0;
            }
            j += 1;
        }
    }

    // The binary exponent only counts when at least one digit follows.
    if matches!(s.get(j), Some(b'p' | b'P')) {
        let mut k = j + 1;
        let exp_negative = match s.get(k) {
            Some(b'-') => {
                k += 1;
                true
            }
            Some(b'+') => {
                k += 1;
                false
            }
            _ => false,
        };
        let digits_start = k;
        let mut value: i64 = 0;
        while let Some(&c) = s.get(k) {
            if !c.is_ascii_digit() {
                break;
            }
            value = (value * 10 + i64::from(c - b'0')).min(HEX_EXPONENT_CAP);
            k += 1;
        }
        if k > digits_start {
            exponent += if exp_negative { -value } else { value };
            j = k;
        }
    }

    Some(round_binary::<T>(mantissa, exponent, sticky, j))
}

/// Round `mantissa * 2^exponent` (plus a sticky fraction below the last
/// bit) to the precision of `T`, including its subnormal range.
fn round_binary<T: FloatTarget>(
    mantissa: u64,
    exponent: i64,
    sticky: bool,
    end: usize,
) -> (T, usize, ConversionStatus) {
    if mantissa == 0 {
        return (T::ZERO, end, ConversionStatus::Success);
    }

    let bits = i64::from(u64::BITS - mantissa.leading_zeros());
    let digits = i64::from(T::MANTISSA_DIGITS);
    let min_exp = i64::from(T::MIN_EXP);
    let max_exp = i64::from(T::MAX_EXP);

    // Value lies in [2^(top - 1), 2^top).
    let top = bits + exponent;
    if top > max_exp {
        return (T::INFINITY, end, ConversionStatus::Overflow);
    }
    let precision = if top >= min_exp {
        digits
    } else {
        digits - (min_exp - top)
    };

    let shift = bits - precision;
    let (rounded, scale) = if shift <= 0 {
        (u128::from(mantissa), exponent)
    } else if shift > 64 {
        (0, exponent + shift)
    } else {
        let wide = u128::from(mantissa);
        let kept = wide >> shift;
        let rest = wide & ((1u128 << shift) - 1);
        let half = 1u128 << (shift - 1);
        let round_up = rest > half || (rest == half && (sticky || kept & 1 == 1));
        (kept + u128::from(round_up), exponent + shift)
    };

    if rounded == 0 {
        return (T::ZERO, end, ConversionStatus::Underflow);
    }
    let rounded_top = i64::from(u128::BITS - rounded.leading_zeros()) + scale;
    if rounded_top > max_exp {
        return (T::INFINITY, end, ConversionStatus::Overflow);
    }

    // `rounded` has at most MANTISSA_DIGITS + 1 bits, so it is exact in f64.
    let val = T::from_f64(scale_by_pow2(rounded as f64, scale));
    let status = if rounded_top < min_exp {
        ConversionStatus::Underflow
    } else {
        ConversionStatus::Success
    };
    (val, end, status)
}

/// `strtof(s, &end)`: returns (value, consumed_bytes, status).
pub fn strtof(s: &[u8]) -> (f32, usize, ConversionStatus) {
    strto(s)
}

/// `strtod(s, &end)`: returns (value, consumed_bytes, status).
pub fn strtod(s: &[u8]) -> (f64, usize, ConversionStatus) {
    strto(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strtod_basic() {
        let (val, len, status) = strtod(b"3.14");
        assert!((val - 3.14).abs() < 1e-12);
        assert_eq!(len, 4);
        assert_eq!(status, ConversionStatus::Success);

        assert_eq!(strtod(b"-2.5e3"), (-2500.0, 6, ConversionStatus::Success));
        assert_eq!(strtod(b"  +7"), (7.0, 4, ConversionStatus::Success));
    }

    #[test]
    fn test_strtod_partial_forms() {
        assert_eq!(strtod(b"1."), (1.0, 2, ConversionStatus::Success));
        assert_eq!(strtod(b".5"), (0.5, 2, ConversionStatus::Success));
        assert_eq!(strtod(b"."), (0.0, 0, ConversionStatus::Success));
        assert_eq!(strtod(b"-"), (0.0, 0, ConversionStatus::Success));
        assert_eq!(strtod(b"abc"), (0.0, 0, ConversionStatus::Success));
    }

    #[test]
    fn test_strtod_dangling_exponent_is_not_consumed() {
        assert_eq!(strtod(b"2e"), (2.0, 1, ConversionStatus::Success));
        assert_eq!(strtod(b"2e+"), (2.0, 1, ConversionStatus::Success));
        assert_eq!(strtod(b"2E-1"), (0.2, 4, ConversionStatus::Success));
    }

    #[test]
    fn test_strtod_special_words() {
        let (val, len, _) = strtod(b"inf");
        assert!(val.is_infinite() && val > 0.0);
        assert_eq!(len, 3);

        let (val, len, _) = strtod(b"-Infinity");
        assert!(val.is_infinite() && val < 0.0);
        assert_eq!(len, 9);

        let (val, len, _) = strtod(b"NaN");
        assert!(val.is_nan());
        assert_eq!(len, 3);

        let (val, len, _) = strtod(b"nan(0x7f)");
        assert!(val.is_nan());
        assert_eq!(len, 9);

        // Unclosed payload: only the word is consumed.
        let (_, len, _) = strtod(b"nan(12");
        assert_eq!(len, 3);
    }

    #[test]
    fn test_strtod_range_errors() {
        let (val, _, status) = strtod(b"1e400");
        assert!(val.is_infinite());
        assert_eq!(status, ConversionStatus::Overflow);

        let (val, _, status) = strtod(b"1e-400");
        assert_eq!(val, 0.0);
        assert_eq!(status, ConversionStatus::Underflow);

        let (_, _, status) = strtod(b"4e-320");
        assert_eq!(status, ConversionStatus::Underflow);

        assert_eq!(strtod(b"0.000"), (0.0, 5, ConversionStatus::Success));
    }

    #[test]
    fn test_strtof_rounds_to_f32() {
        let (val, len, status) = strtof(b"3.14");
        assert_eq!(val, 3.14f32);
        assert_eq!(len, 4);
        assert_eq!(status, ConversionStatus::Success);

        let (val, _, status) = strtof(b"1e39");
        assert!(val.is_infinite());
        assert_eq!(status, ConversionStatus::Overflow);

        let (_, _, status) = strtof(b"1e-40");
        assert_eq!(status, ConversionStatus::Underflow);
    }

    #[test]
    fn test_strtod_hex_significands() {
        assert_eq!(strtod(b"0x1.8p1"), (3.0, 7, ConversionStatus::Success));
        assert_eq!(strtod(b"0x10"), (16.0, 4, ConversionStatus::Success));
        assert_eq!(strtod(b"0X.8P-2"), (0.125, 7, ConversionStatus::Success));
        assert_eq!(strtod(b" -0xAp0"), (-10.0, 7, ConversionStatus::Success));
        assert_eq!(strtod(b"0x0p9"), (0.0, 5, ConversionStatus::Success));
        // More digits than the mantissa holds.
        assert_eq!(
            strtod(b"0x10000000000000000"),
            (18_446_744_073_709_551_616.0, 19, ConversionStatus::Success)
        );
    }

    #[test]
    fn test_strtod_hex_partial_forms() {
        // No hex digit: only the leading zero is a number.
        assert_eq!(strtod(b"0x"), (0.0, 1, ConversionStatus::Success));
        assert_eq!(strtod(b"0x.p1"), (0.0, 1, ConversionStatus::Success));
        assert_eq!(strtod(b"0xg"), (0.0, 1, ConversionStatus::Success));
        // Dangling binary exponent is not consumed.
        assert_eq!(strtod(b"0x1p"), (1.0, 3, ConversionStatus::Success));
        assert_eq!(strtod(b"0x1p-"), (1.0, 3, ConversionStatus::Success));
    }

    #[test]
    fn test_strtod_hex_range_errors() {
        let (val, _, status) = strtod(b"0x1p1024");
        assert!(val.is_infinite());
        assert_eq!(status, ConversionStatus::Overflow);

        let (val, _, status) = strtod(b"-0x1p99999999999");
        assert!(val.is_infinite() && val < 0.0);
        assert_eq!(status, ConversionStatus::Overflow);

        assert_eq!(strtod(b"0x1p-1080"), (0.0, 9, ConversionStatus::Underflow));

        let (val, _, status) = strtod(b"0x1p-1074");
        assert_eq!(val, f64::from_bits(1));
        assert_eq!(status, ConversionStatus::Underflow);

        assert_eq!(
            strtod(b"0x1.fffffffffffffp1023"),
            (f64::MAX, 22, ConversionStatus::Success)
        );
        assert_eq!(
            strtod(b"0x1p-1022"),
            (f64::MIN_POSITIVE, 9, ConversionStatus::Success)
        );
    }

    #[test]
    fn test_strtof_hex_rounds_to_f32() {
        // Exactly half an f32 ulp above 1: ties to even.
        assert_eq!(strtof(b"0x1.000001p0").0, 1.0);
        // Just over half: rounds up.
        assert_eq!(strtof(b"0x1.0000011p0").0, 1.0 + f32::EPSILON);
        // Half an ulp above an odd significand: rounds up to even.
        assert_eq!(strtof(b"0x1.000003p0").0, 1.0 + 2.0 * f32::EPSILON);

        let (val, _, status) = strtof(b"0x1p128");
        assert!(val.is_infinite());
        assert_eq!(status, ConversionStatus::Overflow);
        assert_eq!(strtof(b"0x1.fffffep127"), (f32::MAX, 14, ConversionStatus::Success));
        assert_eq!(strtof(b"0x1p-150").2, ConversionStatus::Underflow);
    }
}
