// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Textual notations accepted by coercive prototypes.
//!
//! | Notation | Examples |
//! |----------|----------|
//! | Standard | `42`, `-1.5`, `+7` |
//! | Exponential | `1e3`, `2.5E-2` |
//! | Hexadecimal | `0x1F`, `-0xff` |
//! | Octal | `0o17` |
//! | Binary | `0b101` |
//! | Decimal magnitude | `2k`, `1.5M`, `3G`, `1T`, `1P`, `1E` |
//! | Binary magnitude | `4Ki`, `1Mi`, `2Gi`, `1Ti`, `1Pi`, `1Ei` |
//!
//! Surrounding whitespace is ignored. `inf`, `nan` and digit separators are not
//! accepted.

use core::cmp::Ordering;
use core::fmt;

use tenet_text::TextParam;

use crate::value::Value;

/// Exclusive upper magnitude of `i64` as an `f64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

const BINARY_SUFFIXES: [(&str, u64); 6] = [
    ("Ki", 1 << 10),
    ("Mi", 1 << 20),
    ("Gi", 1 << 30),
    ("Ti", 1 << 40),
    ("Pi", 1 << 50),
    ("Ei", 1 << 60),
];

const DECIMAL_SUFFIXES: [(char, u64); 7] = [
    ('k', 1_000),
    ('K', 1_000),
    ('M', 1_000_000),
    ('G', 1_000_000_000),
    ('T', 1_000_000_000_000),
    ('P', 1_000_000_000_000_000),
    ('E', 1_000_000_000_000_000_000),
];

/// A numeric value, either integral or floating point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
}

impl Number {
    /// Extracts a number from an integer or float value.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(Self::Int(*n)),
            Value::Float(x) => Some(Self::Float(*x)),
            _ => None,
        }
    }

    /// Converts back into a [`Value`].
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Int(n) => Value::Int(n),
            Self::Float(x) => Value::Float(x),
        }
    }

    /// Returns the number as a float.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Float(x) => x,
        }
    }

    /// Returns the integer value if the number is integral and fits an `i64`.
    #[must_use]
    pub fn as_integral(self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(n),
            Self::Float(x) => float_to_int(x),
        }
    }

    /// Compares two numbers, exactly for integers.
    ///
    /// Returns `None` when a NaN is involved.
    #[must_use]
    pub fn compare(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Number> for TextParam {
    fn from(value: Number) -> Self {
        match value {
            Number::Int(n) => Self::Integer(n),
            Number::Float(x) => Self::Float(x),
        }
    }
}

/// Converts an integral float to an `i64`, if it fits.
#[must_use]
pub(crate) fn float_to_int(x: f64) -> Option<i64> {
    if x.is_finite() && libm::trunc(x) == x && (-I64_BOUND..I64_BOUND).contains(&x) {
        #[expect(clippy::cast_possible_truncation, reason = "range checked above")]
        let n = x as i64;
        Some(n)
    } else {
        None
    }
}

/// Parses `text` in any of the accepted numeric notations.
///
/// Plain integers and radix-prefixed literals yield [`Number::Int`]. Decimal
/// and exponential literals yield [`Number::Float`]. Magnitude suffixes yield
/// an integer when the scaled result is integral and fits, a float otherwise.
///
/// ```rust
/// use tenet_type::{Number, parse_number};
///
/// assert_eq!(parse_number("50"), Some(Number::Int(50)));
/// assert_eq!(parse_number("1e3"), Some(Number::Float(1000.0)));
/// assert_eq!(parse_number("0x1F"), Some(Number::Int(31)));
/// assert_eq!(parse_number("1.5k"), Some(Number::Int(1500)));
/// assert_eq!(parse_number("4Ki"), Some(Number::Int(4096)));
/// assert_eq!(parse_number("twelve"), None);
/// ```
#[must_use]
pub fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if body.is_empty() {
        return None;
    }

    if let Some((radix, digits)) = split_radix(body) {
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        let magnitude = u64::from_str_radix(digits, radix).ok()?;
        return signed(negative, magnitude).map(Number::Int);
    }

    let (mantissa, multiplier) = split_magnitude(body);
    if !is_decimal_literal(mantissa) {
        return None;
    }

    if mantissa.bytes().all(|b| b.is_ascii_digit())
        && let Ok(magnitude) = mantissa.parse::<u64>()
        && let Some(scaled) = magnitude.checked_mul(multiplier)
        && let Some(n) = signed(negative, scaled)
    {
        return Some(Number::Int(n));
    }

    let mut x = mantissa.parse::<f64>().ok()? * multiplier as f64;
    if negative {
        x = -x;
    }
    if !x.is_finite() {
        return None;
    }
    if multiplier > 1
        && let Some(n) = float_to_int(x)
    {
        return Some(Number::Int(n));
    }
    Some(Number::Float(x))
}

/// Parses a boolean notation: `true/false`, `yes/no`, `on/off`, `1/0`.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    const TRUE: [&str; 4] = ["true", "yes", "on", "1"];
    const FALSE: [&str; 4] = ["false", "no", "off", "0"];
    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        Some(true)
    } else if FALSE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        Some(false)
    } else {
        None
    }
}

fn split_radix(body: &str) -> Option<(u32, &str)> {
    let bytes = body.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    Some((radix, &body[2..]))
}

fn split_magnitude(body: &str) -> (&str, u64) {
    for (suffix, multiplier) in BINARY_SUFFIXES {
        if let Some(rest) = body.strip_suffix(suffix) {
            return (rest, multiplier);
        }
    }
    for (suffix, multiplier) in DECIMAL_SUFFIXES {
        if let Some(rest) = body.strip_suffix(suffix) {
            return (rest, multiplier);
        }
    }
    (body, 1)
}

/// Checks for `digits[.digits][(e|E)[+|-]digits]` with at least one mantissa digit.
fn is_decimal_literal(text: &str) -> bool {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
        None => (text, None),
    };
    let mut digits = 0;
    let mut dots = 0;
    for b in mantissa.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }
    if digits == 0 || dots > 1 {
        return false;
    }
    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && exp.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

fn signed(negative: bool, magnitude: u64) -> Option<i64> {
    if negative {
        0_i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}
