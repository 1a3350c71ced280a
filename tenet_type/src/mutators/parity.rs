// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Even and odd numbers.

use alloc::format;

use tenet_text::ExplanatoryText;

use crate::error::{ConfigError, TypeError, TypeErrorKind};
use crate::mutator::Mutator;
use crate::notation::Number;
use crate::options::OptionReader;
use crate::value::Value;

/// Requires an even or odd integral value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Parity {
    /// Divisible by two.
    Even,
    /// Not divisible by two.
    Odd,
}

impl Parity {
    /// Returns `true` if `n` has this parity.
    #[must_use]
    pub fn contains(self, n: i64) -> bool {
        (n % 2 == 0) == (self == Self::Even)
    }

    /// Reads `parity` (`even` or `odd`).
    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        match r.require_str("parity")? {
            "even" => Ok(Self::Even),
            "odd" => Ok(Self::Odd),
            other => Err(ConfigError::invalid(
                r.component(),
                "parity",
                format!("expected `even` or `odd`, got `{other}`"),
            )),
        }
    }

    fn describe(self) -> ExplanatoryText {
        match self {
            Self::Even => ExplanatoryText::new("the value must be an even number"),
            Self::Odd => ExplanatoryText::new("the value must be an odd number"),
        }
    }
}

impl Mutator for Parity {
    fn id(&self) -> &'static str {
        "parity"
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
