// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lists with an optional element type.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use tenet_text::{ExplanatoryText, InfoLevel};

use crate::context::{Context, NumericStrings};
use crate::error::{ConfigError, TypeError};
use crate::factory::TypeFactory;
use crate::options::{OptionReader, Options};
use crate::prototype::{TypePrototype, textify_plain};
use crate::unit::TypeUnit;
use crate::value::Value;

/// Lists, optionally with every item checked by an element unit.
///
/// Coercive runs wrap a single scalar into a one-item list. In external
/// contexts a string is split on `,` first, so `"a, b"` becomes `["a", "b"]`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use tenet_type::{Context, IntegerPrototype, ListPrototype, TypeUnit, Value};
///
/// let items = Arc::new(TypeUnit::new(IntegerPrototype::new()));
/// let unit = TypeUnit::new(ListPrototype::of(items));
/// let mut value = Value::from("1, 2,3");
/// unit.process(&mut value, Context::Interface, false).unwrap();
/// assert_eq!(value, Value::from(vec![1, 2, 3]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ListPrototype {
    items: Option<Arc<TypeUnit>>,
}

impl ListPrototype {
    /// Lists of anything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists whose items all pass `items`.
    #[must_use]
    pub fn of(items: Arc<TypeUnit>) -> Self {
        Self { items: Some(items) }
    }

    /// The element unit, if any.
    #[must_use]
    pub fn items(&self) -> Option<&Arc<TypeUnit>> {
        self.items.as_ref()
    }

    /// Reads `items`, the id of a prototype built with default options.
    pub(crate) fn from_options(
        factory: &TypeFactory,
        r: &OptionReader<'_>,
    ) -> Result<Self, ConfigError> {
        match r.str("items")? {
            None => Ok(Self::new()),
            Some(id) => Ok(Self::of(Arc::new(factory.build(id, &Options::new())?))),
        }
    }

    fn check_items(
        &self,
        items: &mut [Value],
        context: Context,
        strict: bool,
    ) -> Result<(), TypeError> {
        let Some(unit) = &self.items else {
            return Ok(());
        };
        for (position, item) in items.iter_mut().enumerate() {
            if let Err(err) = unit.process(item, context, strict) {
                let reason = err.explanation();
                let text = ExplanatoryText::new("item {position} is invalid: {reason}")
                    .with_variant(
                        InfoLevel::Technical,
                        "item {position} ({item}) is invalid: {reason}",
                    )
                    .with_param("position", position + 1)
                    .with_param("item", item.to_text_param())
                    .with_param("reason", reason);
                return Err(TypeError::with_text(err.kind(), text));
            }
        }
        Ok(())
    }
}

impl TypePrototype for ListPrototype {
    fn id(&self) -> &'static str {
        "list"
    }

    fn expected(&self) -> &'static str {
        "a list"
    }

    fn process(&self, value: &mut Value, context: Context, strict: bool) -> Result<(), TypeError> {
        if !matches!(value, Value::List(_)) {
            if strict {
                return Err(TypeError::strict(self.expected(), value));
            }
            let wrapped = match core::mem::take(value) {
                Value::Str(s) if context.is_external() => {
                    if s.trim().is_empty() {
                        Vec::new()
                    } else {
                        s.split(',').map(|part| Value::from(part.trim())).collect()
                    }
                }
                Value::Object(o) => {
                    *value = Value::Object(o);
                    return Err(TypeError::invalid_type(self.expected(), value));
                }
                scalar => vec![scalar],
            };
            *value = Value::List(wrapped);
        }
        match value {
            Value::List(items) => self.check_items(items, context, strict),
            _ => Ok(()),
        }
    }

    fn numeric_strings(&self) -> NumericStrings {
        NumericStrings::Never
    }

    fn textify(&self, value: &Value) -> Option<String> {
        let (Some(unit), Value::List(items)) = (&self.items, value) else {
            return textify_plain(value);
        };
        let parts = items
            .iter()
            .map(|item| match item {
                Value::Null => Some(String::new()),
                item => unit.prototype().textify(item),
            })
            .collect::<Option<Vec<_>>>()?;
        Some(parts.join(", "))
    }
}
