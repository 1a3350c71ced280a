// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric range, minimum, and maximum constraints.

use alloc::format;
use alloc::string::String;
use core::cmp::Ordering;

use tenet_text::{ExplanatoryText, InfoLevel};

use crate::error::{ConfigError, TypeError, TypeErrorKind};
use crate::mutator::Mutator;
use crate::notation::Number;
use crate::options::OptionReader;
use crate::value::Value;

/// One end of a [`Range`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bound {
    /// The limit.
    pub value: Number,
    /// Whether the limit itself is allowed.
    pub inclusive: bool,
}

impl Bound {
    /// A bound that admits its limit.
    #[must_use]
    pub fn inclusive(value: impl Into<Number>) -> Self {
        Self {
            value: value.into(),
            inclusive: true,
        }
    }

    /// A bound that excludes its limit.
    #[must_use]
    pub fn exclusive(value: impl Into<Number>) -> Self {
        Self {
            value: value.into(),
            inclusive: false,
        }
    }
}

/// Rejects numbers outside an interval.
///
/// # Example
///
/// ```rust
/// use tenet_type::{Mutator, Range, Value};
///
/// let range = Range::between(0, 2).unwrap();
/// assert!(range.process(&mut Value::from(2)).is_ok());
/// assert!(range.process(&mut Value::from(3)).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Range {
    id: &'static str,
    min: Option<Bound>,
    max: Option<Bound>,
}

impl Range {
    /// Creates a range from optional bounds.
    ///
    /// Fails when both bounds are absent, when a bound is NaN, or when the
    /// interval is empty.
    pub fn new(min: Option<Bound>, max: Option<Bound>) -> Result<Self, ConfigError> {
        let id = match (min, max) {
            (Some(_), None) => "min",
            (None, Some(_)) => "max",
            _ => "range",
        };
        Self::checked(id, min, max)
    }

    /// Validates the bounds for a range reported under `id`.
    fn checked(
        id: &'static str,
        min: Option<Bound>,
        max: Option<Bound>,
    ) -> Result<Self, ConfigError> {
        if min.is_none() && max.is_none() {
            return Err(ConfigError::invalid(id, "min", "a range needs at least one bound"));
        }
        for (name, bound) in [("min", min), ("max", max)] {
            if let Some(bound) = bound
                && bound.value.compare(bound.value).is_none()
            {
                return Err(ConfigError::invalid(id, name, "bound must be a number"));
            }
        }
        if let (Some(lo), Some(hi)) = (min, max) {
            let empty = match lo.value.compare(hi.value) {
                Some(Ordering::Less) => false,
                Some(Ordering::Equal) => !(lo.inclusive && hi.inclusive),
                _ => true,
            };
            if empty {
                return Err(ConfigError::invalid(
                    id,
                    "max",
                    format!("the interval from {} to {} is empty", lo.value, hi.value),
                ));
            }
        }
        Ok(Self { id, min, max })
    }

    /// An inclusive range `[min, max]`.
    pub fn between(min: impl Into<Number>, max: impl Into<Number>) -> Result<Self, ConfigError> {
        Self::new(Some(Bound::inclusive(min)), Some(Bound::inclusive(max)))
    }

    /// An inclusive lower limit.
    #[must_use]
    pub fn at_least(min: impl Into<Number>) -> Self {
        Self {
            id: "min",
            min: Some(Bound::inclusive(min)),
            max: None,
        }
    }

    /// An inclusive upper limit.
    #[must_use]
    pub fn at_most(max: impl Into<Number>) -> Self {
        Self {
            id: "max",
            min: None,
            max: Some(Bound::inclusive(max)),
        }
    }

    /// The lower bound.
    #[must_use]
    pub fn min(&self) -> Option<Bound> {
        self.min
    }

    /// The upper bound.
    #[must_use]
    pub fn max(&self) -> Option<Bound> {
        self.max
    }

    /// Returns `true` if `n` lies inside the interval.
    #[must_use]
    pub fn contains(&self, n: Number) -> bool {
        let above_min = self.min.is_none_or(|b| match n.compare(b.value) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => b.inclusive,
            _ => false,
        });
        let below_max = self.max.is_none_or(|b| match n.compare(b.value) {
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => b.inclusive,
            _ => false,
        });
        above_min && below_max
    }

    /// Reads `min`, `max`, `exclusive`, `min_exclusive`, and `max_exclusive`.
    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        let exclusive = r.bool("exclusive")?.unwrap_or(false);
        let min_exclusive = r.bool("min_exclusive")?.unwrap_or(exclusive);
        let max_exclusive = r.bool("max_exclusive")?.unwrap_or(exclusive);
        let min = r.number("min")?.map(|value| Bound {
            value,
            inclusive: !min_exclusive,
        });
        let max = r.number("max")?.map(|value| Bound {
            value,
            inclusive: !max_exclusive,
        });
        match (r.component(), min, max) {
            ("min", None, _) => Err(ConfigError::MissingOption {
                component: "min",
                option: "min",
            }),
            ("max", _, None) => Err(ConfigError::MissingOption {
                component: "max",
                option: "max",
            }),
            (id, ..) => Self::checked(id, min, max),
        }
    }

    fn describe(&self) -> ExplanatoryText {
        let end_user = match (self.min, self.max) {
            (Some(lo), Some(hi)) if lo.inclusive && hi.inclusive => {
                "the value must be between {min} and {max}"
            }
            (Some(lo), Some(hi)) => match (lo.inclusive, hi.inclusive) {
                (false, true) => "the value must be greater than {min} and at most {max}",
                (true, false) => "the value must be at least {min} and less than {max}",
                _ => "the value must be greater than {min} and less than {max}",
            },
            (Some(lo), None) if lo.inclusive => "the value must be at least {min}",
            (Some(_), None) => "the value must be greater than {min}",
            (None, Some(hi)) if hi.inclusive => "the value must be at most {max}",
            (None, Some(_)) => "the value must be less than {max}",
            (None, None) => "the value is out of range",
        };
        let mut text = ExplanatoryText::new(end_user)
            .with_variant(InfoLevel::Technical, "{value} is outside {interval}")
            .with_param("interval", self.interval());
        if let Some(lo) = self.min {
            text = text.with_param("min", lo.value);
        }
        if let Some(hi) = self.max {
            text = text.with_param("max", hi.value);
        }
        text
    }

    fn interval(&self) -> String {
        let lower = match self.min {
            Some(b) => format!("{}{}", if b.inclusive { '[' } else { '(' }, b.value),
            None => String::from("(-inf"),
        };
        let upper = match self.max {
            Some(b) => format!("{}{}", b.value, if b.inclusive { ']' } else { ')' }),
            None => String::from("+inf)"),
        };
        format!("{lower}, {upper}")
    }
}

impl Mutator for Range {
    fn id(&self) -> &'static str {
        self.id
    }

    fn process(&self, value: &mut Value) -> Result<(), TypeError> {
        let Some(n) = Number::from_value(value) else {
            return Err(TypeError::unsupported(self.id, value));
        };
        if self.contains(n) {
            Ok(())
        } else {
            Err(TypeError::with_text(
                TypeErrorKind::OutOfRange,
                self.describe().with_param("value", n),
            ))
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
    use crate::options::Options;
    use tenet_text::{PlainRenderer, Renderer};

    #[test]
    fn inclusive_bounds() {
        let range = Range::between(0, 2).unwrap();
        let mut three = Value::from(3);
        let err = range.process(&mut three).unwrap_err();
        assert_eq!(err.kind(), TypeErrorKind::OutOfRange);
        assert_eq!(err.to_string(), "the value must be between 0 and 2");
        assert_eq!(
            err.render(&PlainRenderer, InfoLevel::Technical),
            "3 is outside [0, 2]"
        );

        let mut two = Value::from(2);
        range.process(&mut two).unwrap();
        assert_eq!(two, Value::from(2));
        range.process(&mut Value::from(0)).unwrap();
    }

    #[test]
    fn exclusive_bounds() {
        let range = Range::new(Some(Bound::exclusive(0)), Some(Bound::inclusive(1.5))).unwrap();
        assert!(!range.contains(Number::Int(0)));
        assert!(range.contains(Number::Float(0.001)));
        assert!(range.contains(Number::Float(1.5)));
        assert!(!range.contains(Number::Int(2)));
    }

    #[test]
    fn single_bounds() {
        let min = Range::at_least(10);
        assert_eq!(min.id(), "min");
        assert!(min.process(&mut Value::from(9)).is_err());
        assert!(min.process(&mut Value::from(i64::MAX)).is_ok());

        let max = Range::at_most(-1.5);
        assert_eq!(max.id(), "max");
        assert!(max.process(&mut Value::from(-1)).is_err());
        let err = max.process(&mut Value::from(0)).unwrap_err();
        assert_eq!(err.to_string(), "the value must be at most -1.5");
    }

    #[test]
    fn invalid_configurations() {
        assert!(Range::new(None, None).is_err());
        assert!(Range::between(3, 1).is_err());
        assert!(Range::new(Some(Bound::exclusive(1)), Some(Bound::inclusive(1))).is_err());
        assert!(Range::between(1, 1).is_ok());
        assert!(Range::between(f64::NAN, 1).is_err());
    }

    #[test]
    fn non_numbers_are_unsupported() {
        let err = Range::at_least(1)
            .process(&mut Value::from("5"))
            .unwrap_err();
        assert_eq!(err.kind(), TypeErrorKind::Unsupported);
    }

    #[test]
    fn from_options() {
        let options = Options::new()
            .with("min", "1k")
            .with("max_exclusive", true)
            .with("max", 2000);
        let range = Range::from_options(&options.reader("range")).unwrap();
        assert!(range.contains(Number::Int(1000)));
        assert!(!range.contains(Number::Int(2000)));

        // The id stays the one the range was registered under.
        let options = Options::new().with("min", 1);
        assert_eq!(Range::from_options(&options.reader("range")).unwrap().id(), "range");
        assert_eq!(Range::from_options(&options.reader("min")).unwrap().id(), "min");
        let options = Options::new().with("max", 3);
        assert_eq!(Range::from_options(&options.reader("range")).unwrap().id(), "range");
        assert_eq!(
            Range::from_options(&Options::new().reader("range")),
            Err(ConfigError::invalid("range", "min", "a range needs at least one bound"))
        );
        assert_eq!(
            Range::from_options(&options.reader("min")),
            Err(ConfigError::MissingOption {
                component: "min",
                option: "min"
            })
        );
    }

    #[test]
    fn explanation_matches_rejection() {
        let range = Range::at_least(1);
        let explained = range.explain().unwrap();
        assert_eq!(
            PlainRenderer.render(&explained, InfoLevel::EndUser),
            "the value must be at least 1"
        );
    }
}
