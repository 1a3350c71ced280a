// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`ExplanatoryText`] message value.

use alloc::borrow::Cow;
use core::fmt;
use smallvec::SmallVec;

use crate::level::InfoLevel;
use crate::param::TextParam;
use crate::render::{PlainRenderer, Renderer};

/// An immutable, multi-level, parameterized message.
///
/// Templates use `{name}` placeholders. A template may hold several plural
/// forms separated by `|`; the plural selector picks one at render time
/// (the first form for `1` or `-1`, the second form otherwise).
///
/// All `with_*` methods consume the text and return a new one, so a text is
/// never modified once it has been handed to someone else.
///
/// # Example
///
/// ```rust
/// use tenet_text::{ExplanatoryText, InfoLevel};
///
/// let text = ExplanatoryText::new("value is too large")
///     .with_variant(InfoLevel::Technical, "value {value} exceeds {max}")
///     .with_param("value", 12)
///     .with_param("max", 10);
///
/// assert_eq!(text.template(InfoLevel::EndUser), "value is too large");
/// assert_eq!(text.template(InfoLevel::Internal), "value {value} exceeds {max}");
/// assert_eq!(text.to_string(), "value is too large");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ExplanatoryText {
    /// Templates keyed by level, sorted by level; always holds `EndUser`.
    variants: SmallVec<[(InfoLevel, Cow<'static, str>); 2]>,
    /// Named parameters in insertion order.
    params: SmallVec<[(Cow<'static, str>, TextParam); 4]>,
    plural: Option<i64>,
}

impl ExplanatoryText {
    /// Creates a text with the given end-user template.
    #[must_use]
    pub fn new(template: impl Into<Cow<'static, str>>) -> Self {
        let mut variants = SmallVec::new();
        variants.push((InfoLevel::EndUser, template.into()));
        Self {
            variants,
            params: SmallVec::new(),
            plural: None,
        }
    }

    /// Returns a copy with the template for `level` set (or replaced).
    #[must_use]
    pub fn with_variant(
        mut self,
        level: InfoLevel,
        template: impl Into<Cow<'static, str>>,
    ) -> Self {
        let template = template.into();
        match self.variants.binary_search_by_key(&level, |(l, _)| *l) {
            Ok(idx) => self.variants[idx].1 = template,
            Err(idx) => self.variants.insert(idx, (level, template)),
        }
        self
    }

    /// Returns a copy with the parameter `name` set (or replaced).
    #[must_use]
    pub fn with_param(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<TextParam>,
    ) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.params.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.params.push((name, value));
        }
        self
    }

    /// Returns a copy with the plural selector set.
    #[must_use]
    pub fn with_plural(mut self, number: i64) -> Self {
        self.plural = Some(number);
        self
    }

    /// Returns the template used for `level`.
    ///
    /// Missing levels fall back to the next more general level.
    #[must_use]
    pub fn template(&self, level: InfoLevel) -> &str {
        let mut current = Some(level);
        while let Some(level) = current {
            if let Ok(idx) = self.variants.binary_search_by_key(&level, |(l, _)| *l) {
                return &self.variants[idx].1;
            }
            current = level.more_general();
        }
        // `new` always installs an end-user template.
        &self.variants[0].1
    }

    /// Returns `true` if a template was given for exactly this level.
    #[must_use]
    pub fn has_variant(&self, level: InfoLevel) -> bool {
        self.variants.iter().any(|(l, _)| *l == level)
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&TextParam> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Returns all parameters in insertion order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &TextParam)> {
        self.params.iter().map(|(n, v)| (n.as_ref(), v))
    }

    /// Returns the plural selector, if any.
    #[must_use]
    #[inline]
    pub fn plural(&self) -> Option<i64> {
        self.plural
    }
}

impl fmt::Display for ExplanatoryText {
    /// Renders the end-user variant with [`PlainRenderer`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&PlainRenderer.render(self, InfoLevel::EndUser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn end_user_template_always_present() {
        let text = ExplanatoryText::new("plain");
        assert!(text.has_variant(InfoLevel::EndUser));
        assert!(!text.has_variant(InfoLevel::Technical));
        assert_eq!(text.template(InfoLevel::Internal), "plain");
    }

    #[test]
    fn fallback_walks_towards_general() {
        let text = ExplanatoryText::new("user").with_variant(InfoLevel::Technical, "tech");
        assert_eq!(text.template(InfoLevel::EndUser), "user");
        assert_eq!(text.template(InfoLevel::Technical), "tech");
        assert_eq!(text.template(InfoLevel::Internal), "tech");
    }

    #[test]
    fn variants_can_be_replaced() {
        let text = ExplanatoryText::new("a")
            .with_variant(InfoLevel::Internal, "b")
            .with_variant(InfoLevel::EndUser, "c");
        assert_eq!(text.template(InfoLevel::EndUser), "c");
        assert_eq!(text.template(InfoLevel::Internal), "b");
    }

    #[test]
    fn params_keep_insertion_order_and_replace() {
        let text = ExplanatoryText::new("{a}{b}")
            .with_param("a", 1)
            .with_param("b", 2)
            .with_param("a", 3);
        let names: alloc::vec::Vec<_> = text.params().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(text.param("a"), Some(&TextParam::Integer(3)));
        assert_eq!(text.param("missing"), None);
    }

    #[test]
    fn display_uses_end_user_level() {
        let text = ExplanatoryText::new("hello {who}")
            .with_variant(InfoLevel::Internal, "internal")
            .with_param("who", "world");
        assert_eq!(text.to_string(), "hello world");
    }
}
