// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value evaluators attached to descriptors.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use tenet_type::{Context, TypeError, TypeUnit, Value};

/// A boxed validation closure.
pub type Predicate = Box<dyn Fn(&mut Value) -> Result<(), TypeError>>;

/// Checks and normalizes every value a property accepts.
pub enum Evaluator {
    /// Runs a shared [`TypeUnit`].
    Type {
        /// The unit to run.
        unit: Arc<TypeUnit>,
        /// Where the values come from.
        context: Context,
        /// Whether runs are strict.
        strict: bool,
    },
    /// Runs a closure.
    Predicate(Predicate),
}

impl Evaluator {
    /// Checks `value`, normalizing it in place.
    pub fn evaluate(&self, value: &mut Value) -> Result<(), TypeError> {
        match self {
            Self::Type {
                unit,
                context,
                strict,
            } => unit.process(value, *context, *strict),
            Self::Predicate(predicate) => predicate(value),
        }
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type {
                unit,
                context,
                strict,
            } => f
                .debug_struct("Type")
                .field("prototype", &unit.prototype().id())
                .field("context", context)
                .field("strict", strict)
                .finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
