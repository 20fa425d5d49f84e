use crate::error::EvalFault;

/// `2^63` as an `f64`; the first value above the `i64` range.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Scans the longest prefix of `text` that reads as a decimal floating-point
/// number and returns its length in bytes together with its value.
///
/// Accepted forms, matching C's `strtod` for decimal input:
/// - `digits [. digits] [(e|E) [+|-] digits]`, with at least one digit before
///   or after the point. An exponent marker without digits is not consumed.
/// - `inf`, `infinity`, `nan` and `nan(chars)`, in any letter case.
///
/// Returns `None` when no character can be consumed.
///
/// ## Example
/// ```
/// use varexpr::util::num::float_prefix;
///
/// assert_eq!(float_prefix("2.5e3+1"), Some((5, 2500.0)));
/// assert_eq!(float_prefix(".5"), Some((2, 0.5)));
/// assert_eq!(float_prefix("1e+"), Some((1, 1.0)));
/// assert_eq!(float_prefix("Infinity"), Some((8, f64::INFINITY)));
/// assert_eq!(float_prefix("."), None);
/// ```
#[must_use]
pub fn float_prefix(text: &str) -> Option<(usize, f64)> {
    let bytes = text.as_bytes();

    if starts_with_ignore_case(bytes, b"infinity") {
        return Some((8, f64::INFINITY));
    }
    if starts_with_ignore_case(bytes, b"inf") {
        return Some((3, f64::INFINITY));
    }
    if starts_with_ignore_case(bytes, b"nan") {
        return Some((3 + nan_payload_len(&bytes[3..]), f64::NAN));
    }

    let mut end = count_digits(bytes);
    let mut mantissa_digits = end;
    if bytes.get(end) == Some(&b'.') {
        let fraction = count_digits(&bytes[end + 1..]);
        mantissa_digits += fraction;
        end += 1 + fraction;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    text[..end].parse().ok().map(|value| (end, value))
}

/// Scans the leading decimal digits of `text`, the way `strtol` with base 10
/// does for input that starts with a digit.
///
/// Returns the number of digits consumed and the value, or `None` for the
/// value when it does not fit in an `i64`.
///
/// ## Example
/// ```
/// use varexpr::util::num::integer_prefix;
///
/// assert_eq!(integer_prefix("042.5"), (3, Some(42)));
/// assert_eq!(integer_prefix("99999999999999999999"), (20, None));
/// assert_eq!(integer_prefix("x"), (0, None));
/// ```
#[must_use]
pub fn integer_prefix(text: &str) -> (usize, Option<i64>) {
    let end = count_digits(text.as_bytes());
    if end == 0 {
        return (0, None);
    }
    (end, text[..end].parse().ok())
}

/// Accumulates a run of ASCII decimal digits into an `i64`, detecting
/// overflow after every digit.
///
/// ## Example
/// ```
/// use varexpr::util::num::accumulate_digits;
///
/// assert_eq!(accumulate_digits(b"120"), Some(120));
/// assert_eq!(accumulate_digits(b""), Some(0));
/// assert_eq!(accumulate_digits(b"9223372036854775808"), None);
/// ```
#[must_use]
pub fn accumulate_digits(digits: &[u8]) -> Option<i64> {
    digits.iter().try_fold(0i64, |acc, &d| {
                     acc.checked_mul(10)?.checked_add(i64::from(d - b'0'))
                 })
}

/// Truncates an `f64` toward zero into an `i64`.
///
/// ## Errors
/// - `EvalFault::NotRepresentable` if the value is NaN or infinite.
/// - `EvalFault::Overflow` if the truncated value lies outside the `i64`
///   range.
///
/// ## Example
/// ```
/// use varexpr::{error::EvalFault, util::num::f64_to_i64_truncated};
///
/// assert_eq!(f64_to_i64_truncated(-2.9), Ok(-2));
/// assert_eq!(f64_to_i64_truncated(f64::NAN), Err(EvalFault::NotRepresentable));
/// assert_eq!(f64_to_i64_truncated(1e19), Err(EvalFault::Overflow));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_truncated(value: f64) -> Result<i64, EvalFault> {
    if !value.is_finite() {
        return Err(EvalFault::NotRepresentable);
    }
    let value = value.trunc();
    if value < -I64_UPPER_BOUND || value >= I64_UPPER_BOUND {
        return Err(EvalFault::Overflow);
    }
    Ok(value as i64)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn starts_with_ignore_case(bytes: &[u8], word: &[u8]) -> bool {
    bytes.len() >= word.len() && bytes[..word.len()].eq_ignore_ascii_case(word)
}

/// Length of an optional `(chars)` suffix after `nan`, where chars are ASCII
/// alphanumerics or `_`. An unterminated suffix is not consumed.
fn nan_payload_len(bytes: &[u8]) -> usize {
    if bytes.first() != Some(&b'(') {
        return 0;
    }
    let inner = bytes[1..].iter()
                          .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
                          .count();
    if bytes.get(1 + inner) == Some(&b')') { inner + 2 } else { 0 }
}
