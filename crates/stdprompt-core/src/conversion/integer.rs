//! Base-10 integer conversion with `strtol`/`strtoul` semantics.

use super::ConversionStatus;
use crate::ctype::is_space;

/// Splits optional leading whitespace and sign off `s`.
///
/// Returns `(index_after_sign, negative)`.
fn skip_prefix(s: &[u8]) -> (usize, bool) {
    let mut i = 0;
    while i < s.len() && is_space(s[i]) {
        i += 1;
    }
    match s.get(i) {
        Some(b'-') => (i + 1, true),
        Some(b'+') => (i + 1, false),
        _ => (i, false),
    }
}

/// Accumulates decimal digits starting at `i` into a magnitude bounded by
/// `abs_max`.
///
/// Returns `(magnitude, end_index, any_digits, overflow)`. Digits past an
/// overflow are still consumed, as `strtol` does.
fn accumulate(s: &[u8], mut i: usize, abs_max: u64) -> (u64, usize, bool, bool) {
    let cutoff = abs_max / 10;
    let cutlim = abs_max % 10;

    let mut acc: u64 = 0;
    let mut any_digits = false;
    let mut overflow = false;

    while let Some(&c) = s.get(i) {
        if !c.is_ascii_digit() {
            break;
        }
        let digit = u64::from(c - b'0');
        any_digits = true;
        i += 1;

        if overflow {
            continue;
        }
        if acc > cutoff || (acc == cutoff && digit > cutlim) {
            overflow = true;
        } else {
            acc = acc * 10 + digit;
        }
    }

    (acc, i, any_digits, overflow)
}

/// `strtol(s, &end, 10)`: returns (value, consumed_bytes, status).
///
/// On overflow the value saturates at `i64::MAX` / `i64::MIN`.
pub fn strtol(s: &[u8]) -> (i64, usize, ConversionStatus) {
    let (start, negative) = skip_prefix(s);

    let abs_max = if negative {
        i64::MIN.unsigned_abs()
    } else {
        i64::MAX as u64
    };
    let (acc, end, any_digits, overflow) = accumulate(s, start, abs_max);

    if !any_digits {
        return (0, 0, ConversionStatus::Success);
    }

    if overflow {
        if negative {
            return (i64::MIN, end, ConversionStatus::Underflow);
        } else {
            return (i64::MAX, end, ConversionStatus::Overflow);
        }
    }

    let val = if negative {
        (acc as i64).wrapping_neg()
    } else {
        acc as i64
    };

    (val, end, ConversionStatus::Success)
}

/// `strtoul(s, &end, 10)`: returns (value, consumed_bytes, status).
///
/// A leading `-` negates the magnitude modulo 2^64, exactly like C. Callers
/// that want to refuse negative input must check for the sign first.
pub fn strtoul(s: &[u8]) -> (u64, usize, ConversionStatus) {
    let (start, negative) = skip_prefix(s);

    let (acc, end, any_digits, overflow) = accumulate(s, start, u64::MAX);

    if !any_digits {
        return (0, 0, ConversionStatus::Success);
    }

    if overflow {
        return (u64::MAX, end, ConversionStatus::Overflow);
    }

    let val = if negative { acc.wrapping_neg() } else { acc };

    (val, end, ConversionStatus::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strtol_basic() {
        assert_eq!(strtol(b"123456"), (123456, 6, ConversionStatus::Success));
        assert_eq!(strtol(b"-42"), (-42, 3, ConversionStatus::Success));
        assert_eq!(strtol(b"+7"), (7, 2, ConversionStatus::Success));
    }

    #[test]
    fn test_strtol_leading_space_counts_as_consumed() {
        assert_eq!(strtol(b"   123"), (123, 6, ConversionStatus::Success));
    }

    #[test]
    fn test_strtol_stops_at_first_non_digit() {
        assert_eq!(strtol(b"12ab"), (12, 2, ConversionStatus::Success));
        assert_eq!(strtol(b"0x10"), (0, 1, ConversionStatus::Success));
        assert_eq!(strtol(b"4 2"), (4, 1, ConversionStatus::Success));
    }

    #[test]
    fn test_strtol_no_digits() {
        assert_eq!(strtol(b""), (0, 0, ConversionStatus::Success));
        assert_eq!(strtol(b"abc"), (0, 0, ConversionStatus::Success));
        assert_eq!(strtol(b"-"), (0, 0, ConversionStatus::Success));
        assert_eq!(strtol(b"+ 1"), (0, 0, ConversionStatus::Success));
    }

    #[test]
    fn test_strtol_overflow() {
        let max = i64::MAX.to_string();
        assert_eq!(
            strtol(max.as_bytes()),
            (i64::MAX, max.len(), ConversionStatus::Success)
        );

        let s_over = "9223372036854775808"; // MAX + 1
        let (val, len, status) = strtol(s_over.as_bytes());
        assert_eq!(val, i64::MAX);
        assert_eq!(len, s_over.len());
        assert_eq!(status, ConversionStatus::Overflow);

        let min = i64::MIN.to_string();
        assert_eq!(
            strtol(min.as_bytes()),
            (i64::MIN, min.len(), ConversionStatus::Success)
        );

        let s_under = "-9223372036854775809"; // MIN - 1
        let (val, _, status) = strtol(s_under.as_bytes());
        assert_eq!(val, i64::MIN);
        assert_eq!(status, ConversionStatus::Underflow);
    }

    #[test]
    fn test_strtol_overflow_consumes_all_digits() {
        let (_, len, status) = strtol(b"99999999999999999999999 ");
        assert_eq!(len, 23);
        assert_eq!(status, ConversionStatus::Overflow);
    }

    #[test]
    fn test_strtoul_overflow() {
        let max = u64::MAX.to_string();
        assert_eq!(
            strtoul(max.as_bytes()),
            (u64::MAX, max.len(), ConversionStatus::Success)
        );

        let s_over = "18446744073709551616"; // MAX + 1
        let (val, _, status) = strtoul(s_over.as_bytes());
        assert_eq!(val, u64::MAX);
        assert_eq!(status, ConversionStatus::Overflow);
    }

    #[test]
    fn test_strtoul_negative_wraps() {
        let (val, len, status) = strtoul(b"-5");
        assert_eq!(val, 5u64.wrapping_neg());
        assert_eq!(len, 2);
        assert_eq!(status, ConversionStatus::Success);
    }
}
