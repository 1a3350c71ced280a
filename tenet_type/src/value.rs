// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime values flowing through type units.
//!
//! [`Value`] is the dynamic representation of anything a caller may hand to a
//! [`TypeUnit`](crate::TypeUnit): scalars, strings, lists, and opaque host
//! objects wrapped in an [`ErasedValue`].

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use tenet_text::TextParam;

/// A dynamically typed runtime value.
///
/// # Example
///
/// ```rust
/// use tenet_type::Value;
///
/// let v = Value::from("50");
/// assert_eq!(v.type_name(), "string");
/// assert_eq!(v.as_str(), Some("50"));
///
/// let n = Value::from(50);
/// assert_eq!(n.as_int(), Some(50));
/// assert!(Value::Null.is_null());
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed 64-bit integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// A UTF-8 string.
    Str(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// An opaque host object.
    Object(ErasedValue),
}

impl Value {
    /// Returns a short name for the value's runtime type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float, if this is one.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the wrapped host object, if this is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&ErasedValue> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Wraps a host object.
    #[must_use]
    pub fn object<T: Send + Sync + 'static>(value: T) -> Self {
        Self::Object(ErasedValue::new(value))
    }

    /// Converts the value into a message parameter.
    ///
    /// Objects become their class name in angle brackets; they are never
    /// inspected.
    #[must_use]
    pub fn to_text_param(&self) -> TextParam {
        match self {
            Self::Null => TextParam::from("null"),
            Self::Bool(b) => TextParam::Bool(*b),
            Self::Int(n) => TextParam::Integer(*n),
            Self::Float(x) => TextParam::Float(*x),
            Self::Str(s) => TextParam::from(s.clone()),
            Self::List(items) => TextParam::List(items.iter().map(Self::to_text_param).collect()),
            Self::Object(o) => TextParam::from(format!("<{}>", o.class())),
        }
    }
}

impl PartialEq for Value {
    /// Structural equality; host objects never compare equal.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(o) => write!(f, "<{}>", o.class()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<ErasedValue> for Value {
    fn from(value: ErasedValue) -> Self {
        Self::Object(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

type Describe = fn(&(dyn Any + Send + Sync)) -> Option<String>;

fn describe_as<T: fmt::Display + 'static>(object: &(dyn Any + Send + Sync)) -> Option<String> {
    object.downcast_ref::<T>().map(ToString::to_string)
}

/// An opaque host object carried through a pipeline.
///
/// The object is shared: cloning the value clones a handle, never the object.
/// It is tagged with a class name for messages, and may carry a textual form
/// for [`TypeUnit::textify`](crate::TypeUnit::textify).
///
/// # Example
///
/// ```rust
/// use tenet_type::ErasedValue;
///
/// #[derive(Debug, PartialEq)]
/// struct Socket(u16);
///
/// let value = ErasedValue::new(Socket(80)).with_class("socket");
/// assert_eq!(value.class(), "socket");
/// assert_eq!(value.downcast_ref::<Socket>(), Some(&Socket(80)));
/// assert_eq!(value.text(), None);
///
/// let port = ErasedValue::displayable(443_u16);
/// assert_eq!(port.text().as_deref(), Some("443"));
/// ```
#[derive(Clone)]
pub struct ErasedValue {
    object: Arc<dyn Any + Send + Sync>,
    class: &'static str,
    describe: Option<Describe>,
}

impl ErasedValue {
    /// Wraps `object`, classed under its Rust type name.
    #[must_use]
    pub fn new<T: Send + Sync + 'static>(object: T) -> Self {
        Self {
            object: Arc::new(object),
            class: core::any::type_name::<T>(),
            describe: None,
        }
    }

    /// Wraps `object`, rendering it with its [`Display`](fmt::Display) impl.
    #[must_use]
    pub fn displayable<T: fmt::Display + Send + Sync + 'static>(object: T) -> Self {
        Self {
            describe: Some(describe_as::<T>),
            ..Self::new(object)
        }
    }

    /// Sets the class name.
    #[must_use]
    pub fn with_class(mut self, class: &'static str) -> Self {
        self.class = class;
        self
    }

    /// The class name.
    #[must_use]
    #[inline]
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// Returns `true` if the object is a `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.object.is::<T>()
    }

    /// Borrows the object as a `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.object.downcast_ref()
    }

    /// The textual form, if the object was wrapped as displayable.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.describe.and_then(|describe| describe(&*self.object))
    }

    /// Returns `true` if both handles refer to the same object.
    #[must_use]
    pub fn same_object(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedValue")
            .field("class", &self.class)
            .field("displayable", &self.describe.is_some())
            .finish_non_exhaustive()
    }
}
