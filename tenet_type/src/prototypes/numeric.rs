// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer, float, and number prototypes.
//!
//! Numeric prototypes never parse strings themselves. Numeric-looking strings
//! reach them already converted by the unit's
//! [`NumericStrings`](crate::NumericStrings) policy; any string left over is an
//! invalid notation.

use alloc::format;

use crate::context::Context;
use crate::error::{ConfigError, TypeError};
use crate::mutator::Mutator;
use crate::mutators::{Bound, Range};
use crate::notation::{Number, float_to_int};
use crate::options::OptionReader;
use crate::prototype::TypePrototype;
use crate::value::Value;

fn range_from_options(r: &OptionReader<'_>) -> Result<Option<Range>, ConfigError> {
    let min = r.number("min")?;
    let max = r.number("max")?;
    if min.is_none() && max.is_none() {
        return Ok(None);
    }
    Range::new(min.map(Bound::inclusive), max.map(Bound::inclusive)).map(Some)
}

fn check_range(range: Option<&Range>, value: &mut Value) -> Result<(), TypeError> {
    match range {
        Some(range) => range.process(value),
        None => Ok(()),
    }
}

fn not_a_number(expected: &'static str, value: &Value) -> TypeError {
    match value {
        Value::Str(s) => TypeError::invalid_format(expected, s),
        other => TypeError::invalid_type(expected, other),
    }
}

/// Whole numbers, optionally within a range.
///
/// Coercive runs also accept integral floats such as `3.0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntegerPrototype {
    range: Option<Range>,
}

impl IntegerPrototype {
    /// Any `i64`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the accepted values to `range`.
    #[must_use]
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    /// The accepted range, if restricted.
    #[must_use]
    pub fn range(&self) -> Option<&Range> {
        self.range.as_ref()
    }

    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        for name in ["min", "max"] {
            if let Some(n) = r.number(name)?
                && n.as_integral().is_none()
            {
                return Err(ConfigError::invalid(
                    r.component(),
                    name,
                    format!("expected an integer, got {n}"),
                ));
            }
        }
        Ok(Self {
            range: range_from_options(r)?,
        })
    }
}

impl TypePrototype for IntegerPrototype {
    fn id(&self) -> &'static str {
        "integer"
    }

    fn expected(&self) -> &'static str {
        "an integer"
    }

    fn process(&self, value: &mut Value, _context: Context, strict: bool) -> Result<(), TypeError> {
        match value {
            Value::Int(_) => {}
            Value::Float(x) if !strict => match float_to_int(*x) {
                Some(n) => *value = Value::Int(n),
                None => return Err(TypeError::invalid_type(self.expected(), value)),
            },
            other if strict => return Err(TypeError::strict(self.expected(), other)),
            other => return Err(not_a_number(self.expected(), other)),
        }
        check_range(self.range.as_ref(), value)
    }
}

/// Floating point numbers, optionally within a range.
///
/// Only finite values are accepted unless NaN and infinities are explicitly
/// allowed. Coercive runs also accept integers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FloatPrototype {
    range: Option<Range>,
    allow_nan: bool,
}

impl FloatPrototype {
    /// Any finite `f64`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts finite values to `range`.
    #[must_use]
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    /// Also accepts NaN and the infinities.
    #[must_use]
    pub fn allow_nan(mut self, allow: bool) -> Self {
        self.allow_nan = allow;
        self
    }

    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            range: range_from_options(r)?,
            allow_nan: r.bool("allow_nan")?.unwrap_or(false),
        })
    }
}

impl TypePrototype for FloatPrototype {
    fn id(&self) -> &'static str {
        "float"
    }

    fn expected(&self) -> &'static str {
        "a number"
    }

    fn process(&self, value: &mut Value, _context: Context, strict: bool) -> Result<(), TypeError> {
        let x = match value {
            Value::Float(x) => *x,
            Value::Int(n) if !strict => *n as f64,
            other if strict => return Err(TypeError::strict("a float", other)),
            other => return Err(not_a_number(self.expected(), other)),
        };
        if !x.is_finite() {
            if self.allow_nan {
                *value = Value::Float(x);
                return Ok(());
            }
            return Err(TypeError::invalid_type("a finite number", value));
        }
        *value = Value::Float(x);
        check_range(self.range.as_ref(), value)
    }
}

/// Integers or floats, kept in their native representation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberPrototype {
    range: Option<Range>,
}

impl NumberPrototype {
    /// Any finite number.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the accepted values to `range`.
    #[must_use]
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            range: range_from_options(r)?,
        })
    }
}

impl TypePrototype for NumberPrototype {
    fn id(&self) -> &'static str {
        "number"
    }

    fn expected(&self) -> &'static str {
        "a number"
    }

    fn process(&self, value: &mut Value, _context: Context, strict: bool) -> Result<(), TypeError> {
        match Number::from_value(value) {
            Some(n) if n.as_f64().is_finite() => check_range(self.range.as_ref(), value),
            Some(_) => Err(TypeError::invalid_type("a finite number", value)),
            None if strict => Err(TypeError::strict(self.expected(), value)),
            None => Err(not_a_number(self.expected(), value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use crate::error::TypeErrorKind;
    use crate::options::Options;

    fn run(proto: &dyn TypePrototype, input: Value, strict: bool) -> Result<Value, TypeError> {
        let mut value = input;
        proto.process(&mut value, Context::Internal, strict)?;
        Ok(value)
    }

    #[test]
    fn integers() {
        let proto = IntegerPrototype::new();
        assert_eq!(run(&proto, Value::from(50), true), Ok(Value::from(50)));
        assert_eq!(run(&proto, Value::from(3.0), false), Ok(Value::from(3)));
        assert_eq!(
            run(&proto, Value::from(3.5), false).map_err(|e| e.kind()),
            Err(TypeErrorKind::InvalidType)
        );
        assert_eq!(
            run(&proto, Value::from(3.0), true).map_err(|e| e.kind()),
            Err(TypeErrorKind::StrictType)
        );
        assert_eq!(
            run(&proto, Value::from("50"), false).map_err(|e| e.kind()),
            Err(TypeErrorKind::InvalidFormat)
        );
    }

    #[test]
    fn integer_in_range() {
        let options = Options::new().with("min", 1).with("max", "1k");
        let proto = IntegerPrototype::from_options(&options.reader("integer")).unwrap();
        assert_eq!(run(&proto, Value::from(1000), true), Ok(Value::from(1000)));
        let err = run(&proto, Value::from(0), true).unwrap_err();
        assert_eq!(err.kind(), TypeErrorKind::OutOfRange);
        assert_eq!(err.to_string(), "the value must be between 1 and 1000");

        let options = Options::new().with("min", 0.5);
        assert!(IntegerPrototype::from_options(&options.reader("integer")).is_err());
    }

    #[test]
    fn floats() {
        let proto = FloatPrototype::new();
        assert_eq!(run(&proto, Value::from(2), false), Ok(Value::from(2.0)));
        assert_eq!(
            run(&proto, Value::from(2), true).map_err(|e| e.kind()),
            Err(TypeErrorKind::StrictType)
        );
        assert!(run(&proto, Value::from(f64::NAN), true).is_err());
        assert!(run(&proto, Value::from(f64::INFINITY), false).is_err());

        let lenient = FloatPrototype::new()
            .allow_nan(true)
            .with_range(Range::between(0, 1).unwrap());
        assert!(run(&lenient, Value::from(f64::NAN), true).is_ok());
        assert!(run(&lenient, Value::from(0.5), true).is_ok());
        assert!(run(&lenient, Value::from(1.5), true).is_err());
    }

    #[test]
    fn numbers_keep_representation() {
        let proto = NumberPrototype::new();
        assert_eq!(run(&proto, Value::from(7), true), Ok(Value::from(7)));
        assert_eq!(run(&proto, Value::from(7.5), true), Ok(Value::from(7.5)));
        assert_eq!(
            run(&proto, Value::from(true), false).map_err(|e| e.kind()),
            Err(TypeErrorKind::InvalidType)
        );
    }
}
