// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process outcomes and boundary errors.
//!
//! [`TypeError`] is a plain value returned by prototypes, mutators, and
//! [`TypeUnit::process`](crate::TypeUnit::process). It is cheap to collect in
//! batch validation. [`UnitError`] is what the three boundary methods
//! (`process_cast`, `process_coercion`, `textify`) raise when a caller asks for
//! a hard failure. [`ConfigError`] reports misconfigured units and mutators.

use alloc::format;
use alloc::string::String;
use core::fmt;
use smallvec::SmallVec;
use tenet_text::{ExplanatoryText, InfoLevel, PlainRenderer, Renderer};

use crate::context::Context;
use crate::value::Value;

/// Coarse classification of a [`TypeError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeErrorKind {
    /// A null value reached a non-nullable unit.
    NullNotAllowed,
    /// A strict run received something other than the native representation.
    StrictType,
    /// The value has a type the prototype cannot accept.
    InvalidType,
    /// A string could not be parsed in any accepted notation.
    InvalidFormat,
    /// A numeric value lies outside an allowed range.
    OutOfRange,
    /// A mutator constraint rejected the value.
    Constraint,
    /// A mutator does not apply to values of this type.
    Unsupported,
}

/// The reason a value was rejected.
///
/// Holds at most one primary explanation plus any number of annotations.
/// Annotations are non-fatal fragments (unit hints, constraint summaries) that
/// are joined with the primary text only at render time.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeError {
    kind: TypeErrorKind,
    text: Option<ExplanatoryText>,
    annotations: SmallVec<[ExplanatoryText; 2]>,
}

impl TypeError {
    /// Creates an error without an explanation.
    ///
    /// Rendering falls back to a generic message.
    #[must_use]
    pub fn new(kind: TypeErrorKind) -> Self {
        Self {
            kind,
            text: None,
            annotations: SmallVec::new(),
        }
    }

    /// Creates an error with an explanation.
    #[must_use]
    pub fn with_text(kind: TypeErrorKind, text: ExplanatoryText) -> Self {
        Self {
            kind,
            text: Some(text),
            annotations: SmallVec::new(),
        }
    }

    /// The standard "null not allowed" error.
    #[must_use]
    pub fn null_not_allowed() -> Self {
        Self::with_text(
            TypeErrorKind::NullNotAllowed,
            ExplanatoryText::new("a value is required")
                .with_variant(InfoLevel::Technical, "null is not allowed here"),
        )
    }

    /// The fixed strict-mode error: `value` is not natively `expected`.
    #[must_use]
    pub fn strict(expected: &'static str, value: &Value) -> Self {
        Self::with_text(
            TypeErrorKind::StrictType,
            ExplanatoryText::new("the value must strictly be {expected}")
                .with_variant(
                    InfoLevel::Technical,
                    "the value must strictly be {expected}, got {actual}",
                )
                .with_param("expected", expected)
                .with_param("actual", value.type_name()),
        )
    }

    /// A type mismatch in coercive mode.
    #[must_use]
    pub fn invalid_type(expected: &'static str, value: &Value) -> Self {
        Self::with_text(
            TypeErrorKind::InvalidType,
            ExplanatoryText::new("the value must be {expected}")
                .with_variant(
                    InfoLevel::Technical,
                    "the value must be {expected}, got {actual}",
                )
                .with_param("expected", expected)
                .with_param("actual", value.type_name()),
        )
    }

    /// A string that does not parse as `expected`.
    #[must_use]
    pub fn invalid_format(expected: &'static str, text: &str) -> Self {
        Self::with_text(
            TypeErrorKind::InvalidFormat,
            ExplanatoryText::new("the value must be {expected}")
                .with_variant(
                    InfoLevel::Technical,
                    "cannot read {input} as {expected}",
                )
                .with_param("expected", expected)
                .with_param("input", format!("{text:?}")),
        )
    }

    /// A mutator used on a value type it does not handle.
    #[must_use]
    pub fn unsupported(component: &'static str, value: &Value) -> Self {
        Self::with_text(
            TypeErrorKind::Unsupported,
            ExplanatoryText::new("the value is invalid")
                .with_variant(
                    InfoLevel::Technical,
                    "`{component}` cannot process a value of type {actual}",
                )
                .with_param("component", component)
                .with_param("actual", value.type_name()),
        )
    }

    /// Appends an annotation.
    #[must_use]
    pub fn annotated(mut self, annotation: ExplanatoryText) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Installs `text` as the explanation if none was given.
    #[must_use]
    pub fn or_text(mut self, text: Option<ExplanatoryText>) -> Self {
        if self.text.is_none() {
            self.text = text;
        }
        self
    }

    /// Returns the error kind.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> TypeErrorKind {
        self.kind
    }

    /// Returns the explanation given by the rejecting component, if any.
    #[must_use]
    #[inline]
    pub fn text(&self) -> Option<&ExplanatoryText> {
        self.text.as_ref()
    }

    /// Returns the explanation, or the generic fallback.
    #[must_use]
    pub fn explanation(&self) -> ExplanatoryText {
        self.text.clone().unwrap_or_else(generic_text)
    }

    /// Returns the annotations in the order they were attached.
    #[must_use]
    pub fn annotations(&self) -> &[ExplanatoryText] {
        &self.annotations
    }

    /// Renders the explanation followed by all annotations.
    #[must_use]
    pub fn render<R: Renderer>(&self, renderer: &R, level: InfoLevel) -> String {
        let primary = self.explanation();
        renderer.render_joined(
            core::iter::once(&primary).chain(self.annotations.iter()),
            level,
            " ",
        )
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&PlainRenderer, InfoLevel::EndUser))
    }
}

impl core::error::Error for TypeError {}

fn generic_text() -> ExplanatoryText {
    ExplanatoryText::new("the value is invalid")
}

/// A hard failure raised at a unit boundary.
#[derive(Clone, Debug, thiserror::Error)]
pub enum UnitError {
    /// [`TypeUnit::process_cast`](crate::TypeUnit::process_cast) rejected the value.
    #[error("cannot cast {value} with `{component}` in {context} context")]
    CastFailed {
        /// Prototype id of the unit.
        component: &'static str,
        /// The offending input.
        value: Value,
        /// The context the cast ran in.
        context: Context,
        /// Why the value was rejected.
        #[source]
        error: TypeError,
    },
    /// [`TypeUnit::process_coercion`](crate::TypeUnit::process_coercion) rejected the value.
    #[error("cannot coerce {value} with `{component}` in {context} context")]
    CoercionFailed {
        /// Prototype id of the unit.
        component: &'static str,
        /// The offending input, unchanged.
        value: Value,
        /// The context the coercion ran in.
        context: Context,
        /// Why the value was rejected.
        #[source]
        error: TypeError,
    },
    /// [`TypeUnit::textify`](crate::TypeUnit::textify) could not produce text.
    #[error("cannot textify {value} with `{component}` in {context} context")]
    TextificationFailed {
        /// Prototype id of the unit.
        component: &'static str,
        /// The offending input.
        value: Value,
        /// The context the rendering ran in.
        context: Context,
        /// Why processing failed; `None` when the value processed but has no
        /// textual form.
        #[source]
        error: Option<TypeError>,
    },
}

impl UnitError {
    /// Returns the underlying process error, if any.
    #[must_use]
    pub fn type_error(&self) -> Option<&TypeError> {
        match self {
            Self::CastFailed { error, .. } | Self::CoercionFailed { error, .. } => Some(error),
            Self::TextificationFailed { error, .. } => error.as_ref(),
        }
    }
}

/// A unit or mutator was configured incorrectly.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No prototype is registered under this id.
    #[error("unknown type prototype `{0}`")]
    UnknownPrototype(String),
    /// No mutator is registered under this id.
    #[error("unknown mutator `{0}`")]
    UnknownMutator(String),
    /// No class is registered under this name.
    #[error("unknown class `{0}`")]
    UnknownClass(String),
    /// A required option is absent.
    #[error("`{component}` requires the option `{option}`")]
    MissingOption {
        /// Component being configured.
        component: &'static str,
        /// Name of the missing option.
        option: &'static str,
    },
    /// An option that must hold at least one entry is empty.
    #[error("option `{option}` of `{component}` must not be empty")]
    EmptyOption {
        /// Component being configured.
        component: &'static str,
        /// Name of the empty option.
        option: &'static str,
    },
    /// An option has the wrong type or an unacceptable value.
    #[error("invalid option `{option}` for `{component}`: {reason}")]
    InvalidOption {
        /// Component being configured.
        component: &'static str,
        /// Name of the offending option.
        option: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(
        component: &'static str,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            component,
            option: option.into(),
            reason: reason.into(),
        }
    }
}
