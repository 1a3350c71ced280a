// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The type prototype contract.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::context::{Context, NumericStrings};
use crate::error::TypeError;
use crate::value::Value;

/// Type-specific validation and coercion logic wrapped by a
/// [`TypeUnit`](crate::TypeUnit).
///
/// A prototype never sees `null`; the unit handles nullability before
/// delegating. Prototypes are shared between units and threads, so `process`
/// must not keep per-call state.
///
/// # Strictness
///
/// With `strict = true` the prototype accepts only the exact native
/// representation and otherwise returns [`TypeError::strict`]. With
/// `strict = false` it also accepts its documented textual notations and
/// normalizes `value` in place.
pub trait TypePrototype: fmt::Debug + Send + Sync {
    /// The identifier the prototype is registered under.
    fn id(&self) -> &'static str;

    /// A short noun phrase for messages, such as `"an integer"`.
    fn expected(&self) -> &'static str;

    /// Checks `value` and normalizes it in place.
    fn process(&self, value: &mut Value, context: Context, strict: bool) -> Result<(), TypeError>;

    /// Whether numeric-looking strings are turned into numbers before
    /// [`TypePrototype::process`] runs in a coercive pass.
    fn numeric_strings(&self) -> NumericStrings {
        NumericStrings::ExternalContexts
    }

    /// Renders an already processed value for display.
    ///
    /// Returns `None` for values without a textual form.
    fn textify(&self, value: &Value) -> Option<String> {
        textify_plain(value)
    }
}

/// The default textual form of a value.
///
/// Strings are returned verbatim, lists are `, `-joined, and objects use
/// their [`ErasedValue::text`](crate::ErasedValue::text) form.
#[must_use]
pub fn textify_plain(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Int(n) => Some(n.to_string()),
        Value::Float(x) => Some(x.to_string()),
        Value::Str(s) => Some(s.clone()),
        Value::List(items) => {
            let parts = items.iter().map(textify_plain).collect::<Option<Vec<_>>>()?;
            Some(parts.join(", "))
        }
        Value::Object(o) => o.text(),
    }
}
