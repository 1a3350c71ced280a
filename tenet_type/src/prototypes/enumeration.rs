// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A closed set of named values.

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use tenet_text::{ExplanatoryText, InfoLevel};

use crate::context::{Context, NumericStrings};
use crate::error::{ConfigError, TypeError, TypeErrorKind};
use crate::notation::parse_number;
use crate::options::OptionReader;
use crate::prototype::{TypePrototype, textify_plain};
use crate::value::Value;

/// One of a fixed list of values, each with a display name.
///
/// Strict runs accept only the values themselves. Coercive runs also accept a
/// name (case-insensitively) and replace it with its value, and accept numeric
/// notations for numeric values.
///
/// # Example
///
/// ```rust
/// use tenet_type::{Context, EnumPrototype, TypePrototype, Value};
///
/// let level = EnumPrototype::new([("low", 1), ("high", 2)]).unwrap();
/// let mut value = Value::from("HIGH");
/// level.process(&mut value, Context::Interface, false).unwrap();
/// assert_eq!(value, Value::from(2));
/// assert_eq!(level.textify(&value).as_deref(), Some("high"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EnumPrototype {
    entries: Vec<(String, Value)>,
}

impl EnumPrototype {
    /// Creates an enumeration from `(name, value)` pairs.
    ///
    /// Fails when there are no entries, when a value is null or an object,
    /// or when names collide case-insensitively.
    pub fn new<I, N, V>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<Value>,
    {
        let entries: Vec<(String, Value)> = entries
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        if entries.is_empty() {
            return Err(ConfigError::EmptyOption {
                component: "enum",
                option: "values",
            });
        }
        for (i, (name, value)) in entries.iter().enumerate() {
            if matches!(value, Value::Null | Value::Object(_)) {
                return Err(ConfigError::invalid(
                    "enum",
                    "values",
                    format!("`{name}` has no comparable value"),
                ));
            }
            if entries[..i]
                .iter()
                .any(|(other, _)| other.eq_ignore_ascii_case(name))
            {
                return Err(ConfigError::invalid(
                    "enum",
                    "names",
                    format!("duplicate name `{name}`"),
                ));
            }
        }
        Ok(Self { entries })
    }

    /// Creates an enumeration whose names are the textual forms of the values.
    pub fn from_values<I, V>(values: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let names = values
            .iter()
            .map(|v| textify_plain(v).unwrap_or_default())
            .collect::<Vec<_>>();
        Self::new(names.into_iter().zip(values))
    }

    /// The `(name, value)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Looks up the value for a name, ignoring ASCII case.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<&Value> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Looks up the name for a value.
    #[must_use]
    pub fn name_of(&self, value: &Value) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| v == value)
            .map(|(n, _)| n.as_str())
    }

    /// Reads `values` (required, non-empty) and `names` (same length).
    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        let values = r.require_list("values")?;
        match r.str_list("names")? {
            None => Self::from_values(values.iter().cloned()),
            Some(names) if names.len() == values.len() => {
                Self::new(names.into_iter().zip(values.iter().cloned()))
            }
            Some(names) => Err(ConfigError::invalid(
                r.component(),
                "names",
                format!("expected {} names, got {}", values.len(), names.len()),
            )),
        }
    }

    fn rejection(&self) -> TypeError {
        let names: Vec<String> = self.entries.iter().map(|(n, _)| n.clone()).collect();
        TypeError::with_text(
            TypeErrorKind::Constraint,
            ExplanatoryText::new("the value must be one of {names}")
                .with_variant(InfoLevel::Internal, "the value must be one of {names} ({values})")
                .with_param("names", names)
                .with_param(
                    "values",
                    Value::List(self.entries.iter().map(|(_, v)| v.clone()).collect())
                        .to_text_param(),
                ),
        )
    }
}

impl TypePrototype for EnumPrototype {
    fn id(&self) -> &'static str {
        "enum"
    }

    fn expected(&self) -> &'static str {
        "one of the listed values"
    }

    fn process(&self, value: &mut Value, _context: Context, strict: bool) -> Result<(), TypeError> {
        if self.name_of(value).is_some() {
            return Ok(());
        }
        if strict {
            return Err(self.rejection());
        }
        let found = match value {
            Value::Str(s) => self.value_of(s).cloned().or_else(|| {
                let n = parse_number(s)?.to_value();
                self.name_of(&n).map(|_| n)
            }),
            _ => None,
        };
        match found {
            Some(found) => {
                *value = found;
                Ok(())
            }
            None => Err(self.rejection()),
        }
    }

    fn numeric_strings(&self) -> NumericStrings {
        NumericStrings::Never
    }

    fn textify(&self, value: &Value) -> Option<String> {
        self.name_of(value)
            .map(str::to_owned)
            .or_else(|| textify_plain(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use crate::options::Options;

    fn colors() -> EnumPrototype {
        EnumPrototype::new([("red", 1), ("green", 2), ("blue", 3)]).unwrap()
    }

    #[test]
    fn strict_accepts_values_only() {
        let colors = colors();
        let mut value = Value::from(2);
        colors.process(&mut value, Context::Internal, true).unwrap();
        let mut value = Value::from("green");
        let err = colors
            .process(&mut value, Context::Internal, true)
            .unwrap_err();
        assert_eq!(err.to_string(), "the value must be one of red, green, blue");
        assert_eq!(value, Value::from("green"));
    }

    #[test]
    fn coercive_lookup_by_name() {
        let colors = colors();
        let mut value = Value::from(" Blue");
        colors.process(&mut value, Context::Internal, false).unwrap();
        assert_eq!(value, Value::from(3));

        let mut value = Value::from("0x1");
        colors.process(&mut value, Context::Interface, false).unwrap();
        assert_eq!(value, Value::from(1));

        let mut value = Value::from("purple");
        assert!(colors.process(&mut value, Context::Interface, false).is_err());
    }

    #[test]
    fn textify_maps_back_to_names() {
        assert_eq!(colors().textify(&Value::from(1)).as_deref(), Some("red"));
    }

    #[test]
    fn configuration_is_validated() {
        assert!(EnumPrototype::new(Vec::<(&str, i64)>::new()).is_err());
        assert!(EnumPrototype::new([("a", 1), ("A", 2)]).is_err());
        assert!(EnumPrototype::new([("a", Value::Null)]).is_err());

        let options = Options::new()
            .with("values", vec!["s", "m"])
            .with("names", vec!["small"]);
        assert!(EnumPrototype::from_options(&options.reader("enum")).is_err());

        let options = Options::new().with("values", vec!["s", "m"]);
        let proto = EnumPrototype::from_options(&options.reader("enum")).unwrap();
        assert_eq!(proto.value_of("M"), Some(&Value::from("m")));
    }
}
