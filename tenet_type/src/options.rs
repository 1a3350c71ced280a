// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration maps for building units and mutators by id.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::ConfigError;
use crate::notation::{Number, parse_number};
use crate::value::Value;

/// An ordered configuration map of option name to [`Value`].
///
/// Options are what [`TypeFactory`](crate::TypeFactory) constructors read.
/// Values may come from code or from configuration files; numeric options
/// also accept any notation [`parse_number`] understands.
///
/// # Example
///
/// ```rust
/// use tenet_type::{Options, Value};
///
/// let options = Options::new().with("min", 0).with("max", "2k");
/// assert_eq!(options.get("min"), Some(&Value::from(0)));
/// assert_eq!(options.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    entries: Vec<(String, Value)>,
}

impl Options {
    /// Creates an empty option map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `name` set to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets `name` to `value`, replacing an earlier entry in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Looks up an option.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the option is present (even when null).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of options.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no options are set.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns a typed reader attributing errors to `component`.
    #[must_use]
    pub fn reader(&self, component: &'static str) -> OptionReader<'_> {
        OptionReader {
            component,
            options: self,
        }
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (name, value) in iter {
            options.insert(name, value);
        }
        options
    }
}

/// Typed access to [`Options`] on behalf of one component.
///
/// Absent and null options read as `None`. Present options of the wrong type
/// are a [`ConfigError::InvalidOption`].
#[derive(Copy, Clone, Debug)]
pub struct OptionReader<'a> {
    component: &'static str,
    options: &'a Options,
}

impl<'a> OptionReader<'a> {
    /// The component errors are attributed to.
    #[must_use]
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// The underlying options.
    #[must_use]
    pub fn options(&self) -> &'a Options {
        self.options
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        self.options.get(name).filter(|v| !v.is_null())
    }

    fn invalid(&self, name: &str, expected: &str, got: &Value) -> ConfigError {
        ConfigError::invalid(
            self.component,
            name,
            format!("expected {expected}, got {}", got.type_name()),
        )
    }

    /// Reads a boolean; strings use the boolean notations.
    pub fn bool(&self, name: &str) -> Result<Option<bool>, ConfigError> {
        let Some(value) = self.present(name) else {
            return Ok(None);
        };
        match value {
            Value::Bool(b) => Ok(Some(*b)),
            Value::Str(s) => crate::notation::parse_bool(s)
                .map(Some)
                .ok_or_else(|| self.invalid(name, "a boolean", value)),
            _ => Err(self.invalid(name, "a boolean", value)),
        }
    }

    /// Reads a number in any notation.
    pub fn number(&self, name: &str) -> Result<Option<Number>, ConfigError> {
        let Some(value) = self.present(name) else {
            return Ok(None);
        };
        match value {
            Value::Int(n) => Ok(Some(Number::Int(*n))),
            Value::Float(x) if x.is_finite() => Ok(Some(Number::Float(*x))),
            Value::Str(s) => parse_number(s)
                .map(Some)
                .ok_or_else(|| self.invalid(name, "a number", value)),
            _ => Err(self.invalid(name, "a number", value)),
        }
    }

    /// Reads a float; integers are widened.
    pub fn float(&self, name: &str) -> Result<Option<f64>, ConfigError> {
        Ok(self.number(name)?.map(Number::as_f64))
    }

    /// Reads an integer; integral floats are accepted.
    pub fn int(&self, name: &str) -> Result<Option<i64>, ConfigError> {
        match self.number(name)? {
            None => Ok(None),
            Some(n) => n.as_integral().map(Some).ok_or_else(|| {
                ConfigError::invalid(self.component, name, format!("expected an integer, got {n}"))
            }),
        }
    }

    /// Reads a non-negative integer that fits a `usize`.
    pub fn count(&self, name: &str) -> Result<Option<usize>, ConfigError> {
        match self.int(name)? {
            None => Ok(None),
            Some(n) => usize::try_from(n).map(Some).map_err(|_| {
                ConfigError::invalid(self.component, name, format!("expected a count, got {n}"))
            }),
        }
    }

    /// Reads a string.
    pub fn str(&self, name: &str) -> Result<Option<&'a str>, ConfigError> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::Str(s)) => Ok(Some(s)),
            Some(other) => Err(self.invalid(name, "a string", other)),
        }
    }

    /// Reads a list; a scalar is not promoted.
    pub fn list(&self, name: &str) -> Result<Option<&'a [Value]>, ConfigError> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::List(items)) => Ok(Some(items)),
            Some(other) => Err(self.invalid(name, "a list", other)),
        }
    }

    /// Reads a list of strings.
    pub fn str_list(&self, name: &str) -> Result<Option<Vec<&'a str>>, ConfigError> {
        let Some(items) = self.list(name)? else {
            return Ok(None);
        };
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| self.invalid(name, "a list of strings", item))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Reads a required number.
    pub fn require_number(&self, name: &'static str) -> Result<Number, ConfigError> {
        self.number(name)?.ok_or_else(|| self.missing(name))
    }

    /// Reads a required integer.
    pub fn require_int(&self, name: &'static str) -> Result<i64, ConfigError> {
        self.int(name)?.ok_or_else(|| self.missing(name))
    }

    /// Reads a required count.
    pub fn require_count(&self, name: &'static str) -> Result<usize, ConfigError> {
        self.count(name)?.ok_or_else(|| self.missing(name))
    }

    /// Reads a required string.
    pub fn require_str(&self, name: &'static str) -> Result<&'a str, ConfigError> {
        self.str(name)?.ok_or_else(|| self.missing(name))
    }

    /// Reads a required, non-empty list.
    pub fn require_list(&self, name: &'static str) -> Result<&'a [Value], ConfigError> {
        let items = self.list(name)?.ok_or_else(|| self.missing(name))?;
        if items.is_empty() {
            return Err(ConfigError::EmptyOption {
                component: self.component,
                option: name,
            });
        }
        Ok(items)
    }

    /// Reads a required, non-empty list of strings.
    pub fn require_str_list(&self, name: &'static str) -> Result<Vec<&'a str>, ConfigError> {
        let items = self.require_list(name)?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| self.invalid(name, "a list of strings", item))
            })
            .collect()
    }

    fn missing(&self, name: &'static str) -> ConfigError {
        ConfigError::MissingOption {
            component: self.component,
            option: name,
        }
    }
}
