// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exact and bounded length constraints for strings and lists.

use alloc::format;

use tenet_text::{ExplanatoryText, InfoLevel};

use crate::error::{ConfigError, TypeError, TypeErrorKind};
use crate::mutator::Mutator;
use crate::options::OptionReader;
use crate::value::Value;

/// What a length counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Measure {
    Characters,
    Items,
}

impl Measure {
    fn noun(self) -> (&'static str, &'static str) {
        match self {
            Self::Characters => ("character", "characters"),
            Self::Items => ("item", "items"),
        }
    }
}

/// Strings are measured in characters, lists in items.
fn measure(component: &'static str, value: &Value) -> Result<(usize, Measure), TypeError> {
    match value {
        Value::Str(s) => Ok((s.chars().count(), Measure::Characters)),
        Value::List(items) => Ok((items.len(), Measure::Items)),
        other => Err(TypeError::unsupported(component, other)),
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Requires an exact length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LengthExact {
    length: usize,
}

impl LengthExact {
    /// Requires exactly `length` characters or items.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// The required length.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new(r.require_count("length")?))
    }

    /// Without a measure the wording fits strings and lists alike.
    fn describe(&self, measure: Option<Measure>) -> ExplanatoryText {
        let template = match measure {
            Some(Measure::Characters) => {
                "exactly {length} character required|exactly {length} characters required"
            }
            Some(Measure::Items) => {
                "exactly {length} item required|exactly {length} items required"
            }
            None => "the length must be exactly {length}",
        };
        ExplanatoryText::new(template)
            .with_param("length", self.length)
            .with_plural(to_i64(self.length))
    }
}

impl Mutator for LengthExact {
    fn id(&self) -> &'static str {
        "length"
    }

    fn process(&self, value: &mut Value) -> Result<(), TypeError> {
        let (actual, measure) = measure(self.id(), value)?;
        if actual == self.length {
            return Ok(());
        }
        let text = self
            .describe(Some(measure))
            .with_variant(
                InfoLevel::Technical,
                "expected exactly {length} {unit}, got {actual}",
            )
            .with_param("unit", measure.noun().1)
            .with_param("actual", actual);
        Err(TypeError::with_text(TypeErrorKind::Constraint, text))
    }

    fn explain(&self) -> Option<ExplanatoryText> {
        Some(self.describe(None))
    }
}

/// Requires a length within inclusive bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LengthRange {
    min: Option<usize>,
    max: Option<usize>,
}

impl LengthRange {
    /// Creates a bounded length constraint.
    ///
    /// At least one bound is required and `min` may not exceed `max`.
    pub fn new(min: Option<usize>, max: Option<usize>) -> Result<Self, ConfigError> {
        match (min, max) {
            (None, None) => Err(ConfigError::invalid(
                "length_range",
                "min",
                "a length range needs at least one bound",
            )),
            (Some(lo), Some(hi)) if lo > hi => Err(ConfigError::invalid(
                "length_range",
                "max",
                format!("maximum {hi} is below minimum {lo}"),
            )),
            _ => Ok(Self { min, max }),
        }
    }

    /// The inclusive lower bound.
    #[must_use]
    pub fn min(&self) -> Option<usize> {
        self.min
    }

    /// The inclusive upper bound.
    #[must_use]
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        Self::new(r.count("min")?, r.count("max")?)
    }

    /// Without a measure the wording fits strings and lists alike.
    fn describe(&self, measure: Option<Measure>) -> ExplanatoryText {
        let mut text = match measure {
            Some(measure) => self.describe_counted(measure),
            None => ExplanatoryText::new(match (self.min, self.max) {
                (Some(lo), Some(hi)) if lo == hi => "the length must be exactly {min}",
                (Some(_), Some(_)) => "the length must be between {min} and {max}",
                (Some(_), None) => "the length must be at least {min}",
                (None, Some(_)) => "the length must be at most {max}",
                (None, None) => "any length is allowed",
            }),
        };
        if let Some(lo) = self.min {
            text = text.with_param("min", lo);
        }
        if let Some(hi) = self.max {
            text = text.with_param("max", hi);
        }
        text
    }

    fn describe_counted(&self, measure: Measure) -> ExplanatoryText {
        let (one, many) = measure.noun();
        let (template, selector) = match (self.min, self.max) {
            (Some(lo), Some(hi)) if lo == hi => (
                "exactly {min} {one} required|exactly {min} {many} required",
                lo,
            ),
            (Some(_), Some(hi)) => (
                "between {min} and {max} {one} required|between {min} and {max} {many} required",
                hi,
            ),
            (Some(lo), None) => (
                "at least {min} {one} required|at least {min} {many} required",
                lo,
            ),
            (None, Some(hi)) => (
                "at most {max} {one} allowed|at most {max} {many} allowed",
                hi,
            ),
            (None, None) => ("any length is allowed", 0),
        };
        ExplanatoryText::new(template)
            .with_param("one", one)
            .with_param("many", many)
            .with_plural(to_i64(selector))
    }
}

impl Mutator for LengthRange {
    fn id(&self) -> &'static str {
        "length_range"
    }

    fn process(&self, value: &mut Value) -> Result<(), TypeError> {
        let (actual, measure) = measure(self.id(), value)?;
        let too_short = self.min.is_some_and(|lo| actual < lo);
        let too_long = self.max.is_some_and(|hi| actual > hi);
        if !too_short && !too_long {
            return Ok(());
        }
        let text = self
            .describe(Some(measure))
            .with_variant(InfoLevel::Technical, "length {actual} is out of bounds")
            .with_param("actual", actual);
        Err(TypeError::with_text(TypeErrorKind::Constraint, text))
    }

    fn explain(&self) -> Option<ExplanatoryText> {
        Some(self.describe(None))
    }
}
