// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handling of empty strings and lists.

use tenet_text::ExplanatoryText;

use crate::error::{ConfigError, TypeError, TypeErrorKind};
use crate::mutator::{Mutator, PRIORITY_EMPTY};
use crate::options::OptionReader;
use crate::value::Value;

fn is_empty(value: &Value, ignore_whitespace: bool) -> bool {
    match value {
        Value::Str(s) if ignore_whitespace => s.trim().is_empty(),
        Value::Str(s) => s.is_empty(),
        Value::List(items) => items.is_empty(),
        _ => false,
    }
}

/// Replaces empty strings and lists with null.
///
/// Once a value becomes null the rest of the chain is skipped and the unit
/// decides whether null is acceptable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmptyToNull {
    ignore_whitespace: bool,
}

impl EmptyToNull {
    /// Treats only `""` and `[]` as empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also treats whitespace-only strings as empty.
    #[must_use]
    pub fn ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = ignore;
        self
    }

    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new().ignore_whitespace(r.bool("ignore_whitespace")?.unwrap_or(false)))
    }
}

impl Mutator for EmptyToNull {
    fn id(&self) -> &'static str {
        "empty_to_null"
    }

    fn priority(&self) -> i32 {
        PRIORITY_EMPTY
    }

    fn process(&self, value: &mut Value) -> Result<(), TypeError> {
        if is_empty(value, self.ignore_whitespace) {
            *value = Value::Null;
        }
        Ok(())
    }
}

/// Rejects empty strings and lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NonEmpty {
    ignore_whitespace: bool,
}

impl NonEmpty {
    /// Rejects `""` and `[]`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also rejects whitespace-only strings.
    #[must_use]
    pub fn ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = ignore;
        self
    }

    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new().ignore_whitespace(r.bool("ignore_whitespace")?.unwrap_or(false)))
    }
}

impl Mutator for NonEmpty {
    fn id(&self) -> &'static str {
        "non_empty"
    }

    fn process(&self, value: &mut Value) -> Result<(), TypeError> {
        if is_empty(value, self.ignore_whitespace) {
            Err(TypeError::new(TypeErrorKind::Constraint))
        } else {
            Ok(())
        }
    }

    fn explain(&self) -> Option<ExplanatoryText> {
        Some(ExplanatoryText::new("the value must not be empty"))
    }
}
