// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `any`, `boolean`, and `string` prototypes.

use alloc::string::ToString;

use crate::context::{Context, NumericStrings};
use crate::error::TypeError;
use crate::notation::parse_bool;
use crate::prototype::TypePrototype;
use crate::value::Value;

/// Accepts every non-null value unchanged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AnyPrototype;

impl TypePrototype for AnyPrototype {
    fn id(&self) -> &'static str {
        "any"
    }

    fn expected(&self) -> &'static str {
        "a value"
    }

    fn process(
        &self,
        _value: &mut Value,
        _context: Context,
        _strict: bool,
    ) -> Result<(), TypeError> {
        Ok(())
    }

    fn numeric_strings(&self) -> NumericStrings {
        NumericStrings::Never
    }
}

/// Booleans.
///
/// Coercive runs also accept the integers `0` and `1` and the notations
/// `true/false`, `yes/no`, `on/off`, `1/0`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BooleanPrototype;

impl TypePrototype for BooleanPrototype {
    fn id(&self) -> &'static str {
        "boolean"
    }

    fn expected(&self) -> &'static str {
        "a boolean"
    }

    fn process(&self, value: &mut Value, _context: Context, strict: bool) -> Result<(), TypeError> {
        let b = match value {
            Value::Bool(_) => return Ok(()),
            other if strict => return Err(TypeError::strict(self.expected(), other)),
            Value::Int(0) => false,
            Value::Int(1) => true,
            Value::Str(s) => {
                parse_bool(s).ok_or_else(|| TypeError::invalid_format(self.expected(), s))?
            }
            other => return Err(TypeError::invalid_type(self.expected(), other)),
        };
        *value = Value::Bool(b);
        Ok(())
    }

    fn numeric_strings(&self) -> NumericStrings {
        NumericStrings::Never
    }
}

/// Strings.
///
/// Coercive runs also stringify booleans and numbers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StringPrototype;

impl TypePrototype for StringPrototype {
    fn id(&self) -> &'static str {
        "string"
    }

    fn expected(&self) -> &'static str {
        "a string"
    }

    fn process(&self, value: &mut Value, _context: Context, strict: bool) -> Result<(), TypeError> {
        let text = match value {
            Value::Str(_) => return Ok(()),
            other if strict => return Err(TypeError::strict(self.expected(), other)),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(x) if x.is_finite() => x.to_string(),
            other => return Err(TypeError::invalid_type(self.expected(), other)),
        };
        *value = Value::Str(text);
        Ok(())
    }

    fn numeric_strings(&self) -> NumericStrings {
        NumericStrings::Never
    }
}
