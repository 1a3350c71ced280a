// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placeholder values for explanatory messages.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::text::ExplanatoryText;

/// A value that can be substituted into a message placeholder.
///
/// Parameters stay structured until render time so that a localization layer
/// can format numbers and lists the way its locale expects.
#[derive(Clone, Debug, PartialEq)]
pub enum TextParam {
    /// Plain text, inserted verbatim.
    Text(Cow<'static, str>),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A boolean flag.
    Bool(bool),
    /// A list of parameters, rendered as a separated sequence.
    List(Vec<TextParam>),
    /// Another explanation, rendered at the same level as its parent.
    Nested(Box<ExplanatoryText>),
}

impl TextParam {
    /// Returns the parameter as an integer when it is one.
    ///
    /// Used to derive a plural selector from a parameter.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&'static str> for TextParam {
    fn from(value: &'static str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl From<String> for TextParam {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for TextParam {
    fn from(value: Cow<'static, str>) -> Self {
        Self::Text(value)
    }
}

impl From<char> for TextParam {
    fn from(value: char) -> Self {
        Self::Text(Cow::Owned(String::from(value)))
    }
}

impl From<i64> for TextParam {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for TextParam {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for TextParam {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<usize> for TextParam {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or(Self::Float(value as f64), Self::Integer)
    }
}

impl From<f64> for TextParam {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for TextParam {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<ExplanatoryText> for TextParam {
    fn from(value: ExplanatoryText) -> Self {
        Self::Nested(Box::new(value))
    }
}

impl<T: Into<Self>> From<Vec<T>> for TextParam {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn conversions_keep_structure() {
        assert_eq!(TextParam::from(3_i32), TextParam::Integer(3));
        assert_eq!(TextParam::from(3_usize), TextParam::Integer(3));
        assert_eq!(TextParam::from(true), TextParam::Bool(true));
        assert_eq!(
            TextParam::from(vec!["a", "b"]),
            TextParam::List(vec![TextParam::from("a"), TextParam::from("b")])
        );
    }

    #[test]
    fn integer_accessor() {
        assert_eq!(TextParam::Integer(7).as_integer(), Some(7));
        assert_eq!(TextParam::from("7").as_integer(), None);
    }
}
