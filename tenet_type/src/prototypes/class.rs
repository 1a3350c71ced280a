// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host objects of one registered class.

use alloc::string::String;
use core::fmt;

use tenet_text::{ExplanatoryText, InfoLevel};

use crate::context::{Context, NumericStrings};
use crate::error::{TypeError, TypeErrorKind};
use crate::prototype::{TypePrototype, textify_plain};
use crate::value::{ErasedValue, Value};

fn instance_of<T: 'static>(object: &ErasedValue) -> bool {
    object.is::<T>()
}

/// Accepts [`Value::Object`]s wrapping one concrete Rust type.
///
/// There is no coercion into objects; strict and coercive runs behave the
/// same apart from the error kind. Objects render through their own
/// [`text`](ErasedValue::text) form.
///
/// # Example
///
/// ```rust
/// use tenet_type::{ClassPrototype, Context, ErasedValue, TypePrototype, Value};
///
/// #[derive(Debug)]
/// struct Socket(u16);
///
/// let proto = ClassPrototype::of::<Socket>().named("socket");
/// let mut value = Value::object(Socket(80));
/// assert!(proto.process(&mut value, Context::Internal, true).is_ok());
/// assert!(proto.process(&mut Value::from(80), Context::Internal, false).is_err());
/// // Objects without a textual form cannot be rendered.
/// assert_eq!(proto.textify(&value), None);
///
/// let port = ClassPrototype::of::<u16>();
/// let shown = Value::from(ErasedValue::displayable(443_u16));
/// assert_eq!(port.textify(&shown).as_deref(), Some("443"));
/// ```
#[derive(Clone)]
pub struct ClassPrototype {
    matches: fn(&ErasedValue) -> bool,
    name: &'static str,
}

impl ClassPrototype {
    /// Objects of type `T`, named after the Rust type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            matches: instance_of::<T>,
            name: core::any::type_name::<T>(),
        }
    }

    /// Sets the class name used in messages.
    #[must_use]
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// The class name used in messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn rejection(&self, kind: TypeErrorKind, value: &Value) -> TypeError {
        TypeError::with_text(
            kind,
            ExplanatoryText::new("the value must be a {class} object")
                .with_variant(
                    InfoLevel::Technical,
                    "the value must be a {class} object, got {actual}",
                )
                .with_param("class", self.name)
                .with_param("actual", value.to_text_param()),
        )
    }
}

impl fmt::Debug for ClassPrototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassPrototype")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TypePrototype for ClassPrototype {
    fn id(&self) -> &'static str {
        "class"
    }

    fn expected(&self) -> &'static str {
        "an object"
    }

    fn process(&self, value: &mut Value, _context: Context, strict: bool) -> Result<(), TypeError> {
        match value {
            Value::Object(o) if (self.matches)(o) => Ok(()),
            other => {
                let kind = if strict {
                    TypeErrorKind::StrictType
                } else {
                    TypeErrorKind::InvalidType
                };
                Err(self.rejection(kind, other))
            }
        }
    }

    fn numeric_strings(&self) -> NumericStrings {
        NumericStrings::Never
    }

    fn textify(&self, value: &Value) -> Option<String> {
        textify_plain(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[derive(Clone, Debug)]
    struct Point(i32, i32);

    impl fmt::Display for Point {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "({}, {})", self.0, self.1)
        }
    }

    #[derive(Clone, Debug)]
    struct Other;

    #[test]
    fn matches_by_type() {
        let proto = ClassPrototype::of::<Point>().named("point");
        let mut value = Value::object(Point(1, 2));
        assert!(proto.process(&mut value, Context::Internal, true).is_ok());

        let err = proto
            .process(&mut Value::object(Other), Context::Internal, false)
            .unwrap_err();
        assert_eq!(err.kind(), TypeErrorKind::InvalidType);
        assert_eq!(err.to_string(), "the value must be a point object");
    }

    #[test]
    fn strict_kind() {
        let proto = ClassPrototype::of::<Point>();
        let err = proto
            .process(&mut Value::from("p"), Context::Internal, true)
            .unwrap_err();
        assert_eq!(err.kind(), TypeErrorKind::StrictType);
        assert!(proto.name().ends_with("Point"));
    }

    #[test]
    fn objects_render_through_their_text() {
        let proto = ClassPrototype::of::<Point>().named("point");
        let shown = Value::from(ErasedValue::displayable(Point(3, 4)).with_class("point"));
        assert_eq!(proto.textify(&shown).as_deref(), Some("(3, 4)"));
        assert_eq!(proto.textify(&Value::object(Point(3, 4))), None);

        // The object's own class name shows in rejections of other classes.
        let err = ClassPrototype::of::<Other>()
            .named("widget")
            .process(&mut shown.clone(), Context::Internal, false)
            .unwrap_err();
        assert_eq!(
            err.render(&tenet_text::PlainRenderer, InfoLevel::Technical),
            "the value must be a widget object, got <point>"
        );
    }
}
