// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The field access capability used by [`PropertyDescriptor::bind`].
//!
//! [`PropertyDescriptor::bind`]: crate::PropertyDescriptor::bind

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use tenet_type::Value;

/// Reads and writes one named field on a host object.
///
/// The owner supplies accessors explicitly; nothing is discovered at runtime.
/// Accessors take `&self` on both sides, so hosts that need mutation share
/// their state through interior mutability (`Rc<RefCell<_>>`, `Cell`, ...).
pub trait Accessor {
    /// The name of the field.
    fn field(&self) -> &str;

    /// The scope the field lives in, such as a type or module name.
    fn scope(&self) -> Option<&str> {
        None
    }

    /// Reads the field.
    fn get(&self) -> Value;

    /// Writes the field.
    fn set(&self, value: Value);
}

/// An [`Accessor`] made from two closures.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use tenet_property::{Accessor, FieldAccessor};
/// use tenet_type::Value;
///
/// let port = Rc::new(RefCell::new(Value::from(80)));
/// let accessor = FieldAccessor::new(
///     "port",
///     { let port = Rc::clone(&port); move || port.borrow().clone() },
///     { let port = Rc::clone(&port); move |v| *port.borrow_mut() = v },
/// )
/// .with_scope("Server");
///
/// accessor.set(Value::from(8080));
/// assert_eq!(accessor.get(), Value::from(8080));
/// assert_eq!(accessor.scope(), Some("Server"));
/// ```
pub struct FieldAccessor {
    field: String,
    scope: Option<String>,
    get: Box<dyn Fn() -> Value>,
    set: Box<dyn Fn(Value)>,
}

impl FieldAccessor {
    /// Creates an accessor for `field`.
    pub fn new(
        field: impl Into<String>,
        get: impl Fn() -> Value + 'static,
        set: impl Fn(Value) + 'static,
    ) -> Self {
        Self {
            field: field.into(),
            scope: None,
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    /// Sets the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

impl Accessor for FieldAccessor {
    fn field(&self) -> &str {
        &self.field
    }

    fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    fn get(&self) -> Value {
        (self.get)()
    }

    fn set(&self, value: Value) {
        (self.set)(value);
    }
}

impl fmt::Debug for FieldAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("field", &self.field)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
