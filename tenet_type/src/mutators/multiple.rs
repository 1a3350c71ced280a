// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Divisibility constraints.

use alloc::format;

use tenet_text::ExplanatoryText;

use crate::error::{ConfigError, TypeError, TypeErrorKind};
use crate::mutator::Mutator;
use crate::notation::Number;
use crate::options::OptionReader;
use crate::value::Value;

/// Relative tolerance for float divisibility.
const EPSILON: f64 = 1e-9;

/// Requires the value to be a whole multiple of a base.
///
/// Integers are checked exactly. When either side is a float the quotient must
/// be within a small relative tolerance of a whole number, so `0.3` is a
/// multiple of `0.1`.
#[derive(Clone, Debug, PartialEq)]
pub struct MultipleOf {
    base: Number,
}

impl MultipleOf {
    /// Creates the constraint; `base` must be a non-zero number.
    pub fn new(base: impl Into<Number>) -> Result<Self, ConfigError> {
        let base = base.into();
        let x = base.as_f64();
        if x == 0.0 || !x.is_finite() {
            return Err(ConfigError::invalid(
                "multiple_of",
                "base",
                format!("expected a non-zero number, got {base}"),
            ));
        }
        Ok(Self { base })
    }

    /// Returns `true` if `n` is a multiple of the base.
    #[must_use]
    pub fn contains(&self, n: Number) -> bool {
        match (n, self.base) {
            (Number::Int(a), Number::Int(b)) => a.checked_rem(b).is_none_or(|r| r == 0),
            _ => {
                let quotient = n.as_f64() / self.base.as_f64();
                quotient.is_finite()
                    && libm::fabs(quotient - libm::round(quotient))
                        <= EPSILON * libm::fabs(quotient).max(1.0)
            }
        }
    }

    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        Self::new(r.require_number("base")?)
    }

    fn describe(&self) -> ExplanatoryText {
        ExplanatoryText::new("the value must be a multiple of {base}").with_param("base", self.base)
    }
}

impl Mutator for MultipleOf {
    fn id(&self) -> &'static str {
        "multiple_of"
    }

    fn process(&self, value: &mut Value) -> Result<(), TypeError> {
        let Some(n) = Number::from_value(value) else {
            return Err(TypeError::unsupported(self.id(), value));
        };
        if self.contains(n) {
            Ok(())
        } else {
            Err(TypeError::with_text(TypeErrorKind::Constraint, self.describe()))
        }
    }

    fn explain(&self) -> Option<ExplanatoryText> {
        Some(self.describe())
    }
}

/// Requires the value to be a non-negative integral power of a base.
///
/// `base^0 = 1` always qualifies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerOf {
    base: i64,
}

impl PowerOf {
    /// Creates the constraint; `base` must be at least 2.
    pub fn new(base: i64) -> Result<Self, ConfigError> {
        if base < 2 {
            return Err(ConfigError::invalid(
                "power_of",
                "base",
                format!("expected at least 2, got {base}"),
            ));
        }
        Ok(Self { base })
    }

    /// Returns `true` if `n` is `base^k` for some `k >= 0`.
    #[must_use]
    pub fn contains(&self, n: i64) -> bool {
        if n < 1 {
            return false;
        }
        let mut n = n;
        while n % self.base == 0 {
            n /= self.base;
        }
        n == 1
    }

    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        Self::new(r.require_int("base")?)
    }

    fn describe(&self) -> ExplanatoryText {
        ExplanatoryText::new("the value must be a power of {base}").with_param("base", self.base)
    }
}

impl Mutator for PowerOf {
    fn id(&self) -> &'static str {
        "power_of"
    }

    fn process(&self, value: &mut Value) -> Result<(), TypeError> {
        let Some(n) = Number::from_value(value) else {
            return Err(TypeError::unsupported(self.id(), value));
        };
        if n.as_integral().is_some_and(|n| self.contains(n)) {
            Ok(())
        } else {
            Err(TypeError::with_text(TypeErrorKind::Constraint, self.describe()))
        }
    }

    fn explain(&self) -> Option<ExplanatoryText> {
        Some(self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn integer_multiples() {
        let m = MultipleOf::new(5).unwrap();
        assert!(m.process(&mut Value::from(15)).is_ok());
        assert!(m.process(&mut Value::from(-10)).is_ok());
        assert!(m.process(&mut Value::from(0)).is_ok());
        let err = m.process(&mut Value::from(7)).unwrap_err();
        assert_eq!(err.to_string(), "the value must be a multiple of 5");
        assert!(MultipleOf::new(-1).unwrap().contains(Number::Int(i64::MIN)));
    }

    #[test]
    fn float_multiples() {
        let m = MultipleOf::new(0.1).unwrap();
        assert!(m.contains(Number::Float(0.3)));
        assert!(m.contains(Number::Int(2)));
        assert!(!m.contains(Number::Float(0.25)));
        assert!(MultipleOf::new(2).unwrap().contains(Number::Float(4.0)));
        assert!(!MultipleOf::new(2).unwrap().contains(Number::Float(4.5)));
    }

    #[test]
    fn zero_base_is_rejected() {
        assert!(MultipleOf::new(0).is_err());
        assert!(MultipleOf::new(f64::NAN).is_err());
    }

    #[test]
    fn powers() {
        let p = PowerOf::new(2).unwrap();
        for n in [1, 2, 4, 1024, 1 << 62] {
            assert!(p.contains(n), "{n}");
        }
        for n in [0, -2, 3, 6, 1023] {
            assert!(!p.contains(n), "{n}");
        }
        assert!(p.process(&mut Value::from(8.0)).is_ok());
        assert!(p.process(&mut Value::from(8.5)).is_err());
        assert!(PowerOf::new(1).is_err());
    }
}
