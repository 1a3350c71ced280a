// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mutator contract.

use core::fmt;

use tenet_text::ExplanatoryText;

use crate::error::TypeError;
use crate::value::Value;

/// Priority used by mutators that normalize whitespace.
pub const PRIORITY_TRIM: i32 = 100;
/// Priority used by mutators that turn empty input into null.
pub const PRIORITY_EMPTY: i32 = 90;
/// Priority used by mutators that shorten input.
pub const PRIORITY_TRUNCATE: i32 = 50;
/// Priority of plain constraints.
pub const PRIORITY_DEFAULT: i32 = 0;

/// One named validate-or-transform step in a [`TypeUnit`](crate::TypeUnit)
/// pipeline.
///
/// A mutator either accepts the value (possibly rewriting it in place) or
/// rejects it with a [`TypeError`]. Mutators are configured once, validated
/// eagerly at construction, and then shared read-only.
///
/// Mutators are only run on values the prototype already accepted. A mutator
/// is never handed `null`.
pub trait Mutator: fmt::Debug + Send + Sync {
    /// The identifier the mutator is registered under.
    fn id(&self) -> &'static str;

    /// Higher priorities run first; equal priorities run in insertion order.
    fn priority(&self) -> i32 {
        PRIORITY_DEFAULT
    }

    /// Checks and possibly rewrites `value`.
    fn process(&self, value: &mut Value) -> Result<(), TypeError>;

    /// Describes the constraint this mutator enforces.
    ///
    /// Used as the explanation when [`Mutator::process`] fails without one,
    /// and by [`TypeUnit::explain`](crate::TypeUnit::explain).
    fn explain(&self) -> Option<ExplanatoryText> {
        None
    }
}
