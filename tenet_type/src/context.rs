// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Processing contexts and context-sensitive coercion policy.

use core::fmt;

/// Where a value being processed comes from.
///
/// The context tells a pipeline how much the value can be trusted and, through
/// [`NumericStrings`], how much textual leniency to apply.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Context {
    /// Value flow inside the system; no leniency beyond the type's own rules.
    #[default]
    Internal,
    /// Values arriving through an external interface (requests, forms).
    Interface,
    /// Values read from configuration sources.
    Configuration,
}

impl Context {
    /// Returns `true` for contexts carrying externally supplied values.
    #[must_use]
    #[inline]
    pub const fn is_external(self) -> bool {
        matches!(self, Self::Interface | Self::Configuration)
    }

    /// Returns a short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Interface => "interface",
            Self::Configuration => "configuration",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether numeric-looking strings are normalized to numbers before a
/// prototype sees them.
///
/// The policy is declared per prototype (see
/// [`TypePrototype::numeric_strings`](crate::TypePrototype::numeric_strings))
/// and can be overridden per unit with
/// [`TypeUnit::numeric_strings`](crate::TypeUnit::numeric_strings). It only
/// applies to coercive runs; strict runs never normalize.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum NumericStrings {
    /// Strings are always handed to the prototype as strings.
    Never,
    /// Normalize in [`Context::Interface`] and [`Context::Configuration`].
    #[default]
    ExternalContexts,
    /// Normalize in every context.
    Always,
}

impl NumericStrings {
    /// Returns `true` if normalization applies in `context`.
    #[must_use]
    #[inline]
    pub const fn applies(self, context: Context) -> bool {
        match self {
            Self::Never => false,
            Self::ExternalContexts => context.is_external(),
            Self::Always => true,
        }
    }
}
