// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type units: a prototype plus an ordered mutator chain.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use smallvec::SmallVec;
use tenet_text::ExplanatoryText;

use crate::context::{Context, NumericStrings};
use crate::error::{ConfigError, TypeError, UnitError};
use crate::factory::TypeFactory;
use crate::mutator::Mutator;
use crate::notation::parse_number;
use crate::options::Options;
use crate::prototype::TypePrototype;
use crate::value::Value;

/// A validation and coercion pipeline for one declared type.
///
/// A unit wraps one [`TypePrototype`] and an ordered list of [`Mutator`]s.
/// [`TypeUnit::process`] runs them in this order:
///
/// 1. Null handling: `null` passes iff the unit is nullable.
/// 2. Numeric-string normalization, in coercive runs where the
///    [`NumericStrings`] policy applies to the context.
/// 3. The prototype.
/// 4. The mutators, highest priority first, ties in insertion order. The first
///    failing mutator ends the run with its error. A mutator that turns the
///    value into `null` ends the chain early.
///
/// Units are assembled once and then shared read-only; `process` takes
/// `&self` and keeps no per-call state.
///
/// # Example
///
/// ```rust
/// use tenet_type::{Context, IntegerPrototype, Range, TypeUnit, Value};
///
/// let percent = TypeUnit::new(IntegerPrototype::new())
///     .with_mutator(Range::between(0, 100).unwrap());
///
/// let mut value = Value::from("50");
/// percent.process(&mut value, Context::Interface, false).unwrap();
/// assert_eq!(value, Value::from(50));
///
/// let mut value = Value::from("50");
/// assert!(percent.process(&mut value, Context::Interface, true).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct TypeUnit {
    prototype: Arc<dyn TypePrototype>,
    nullable: bool,
    strict: bool,
    numeric_strings: Option<NumericStrings>,
    mutators: SmallVec<[Arc<dyn Mutator>; 4]>,
    hints: SmallVec<[ExplanatoryText; 1]>,
}

impl TypeUnit {
    /// Creates a non-nullable, coercive unit around `prototype`.
    #[must_use]
    pub fn new(prototype: impl TypePrototype + 'static) -> Self {
        Self::from_shared(Arc::new(prototype))
    }

    /// Creates a unit around a shared prototype.
    #[must_use]
    pub fn from_shared(prototype: Arc<dyn TypePrototype>) -> Self {
        Self {
            prototype,
            nullable: false,
            strict: false,
            numeric_strings: None,
            mutators: SmallVec::new(),
            hints: SmallVec::new(),
        }
    }

    /// Builds a unit by prototype id; see [`TypeFactory::build`].
    pub fn build(factory: &TypeFactory, id: &str, options: &Options) -> Result<Self, ConfigError> {
        factory.build(id, options)
    }

    /// Sets whether `null` is accepted.
    #[must_use]
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Makes every run strict, whatever the caller asks for.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Overrides the prototype's numeric-string policy.
    #[must_use]
    pub fn numeric_strings(mut self, policy: NumericStrings) -> Self {
        self.numeric_strings = Some(policy);
        self
    }

    /// Appends a mutator.
    #[must_use]
    pub fn with_mutator(mut self, mutator: impl Mutator + 'static) -> Self {
        self.push_mutator(Arc::new(mutator));
        self
    }

    /// Appends a hint that is attached to every failure of this unit.
    #[must_use]
    pub fn with_hint(mut self, hint: ExplanatoryText) -> Self {
        self.hints.push(hint);
        self
    }

    /// Inserts a shared mutator after all mutators of higher or equal priority.
    pub fn push_mutator(&mut self, mutator: Arc<dyn Mutator>) {
        let priority = mutator.priority();
        let at = self
            .mutators
            .iter()
            .position(|m| m.priority() < priority)
            .unwrap_or(self.mutators.len());
        self.mutators.insert(at, mutator);
    }

    /// Appends a mutator by id; see [`TypeFactory::add_mutator`].
    pub fn add_mutator(
        &mut self,
        factory: &TypeFactory,
        id: &str,
        options: &Options,
    ) -> Result<&mut Self, ConfigError> {
        factory.add_mutator(self, id, options)?;
        Ok(self)
    }

    /// The wrapped prototype.
    #[must_use]
    pub fn prototype(&self) -> &dyn TypePrototype {
        &*self.prototype
    }

    /// Whether `null` is accepted.
    #[must_use]
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether every run is strict.
    #[must_use]
    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The numeric-string policy in effect.
    #[must_use]
    pub fn numeric_string_policy(&self) -> NumericStrings {
        self.numeric_strings
            .unwrap_or_else(|| self.prototype.numeric_strings())
    }

    /// The mutators in execution order.
    pub fn mutators(&self) -> impl Iterator<Item = &dyn Mutator> {
        self.mutators.iter().map(|m| &**m)
    }

    /// Checks `value` and normalizes it in place.
    ///
    /// The run is strict if either the unit or the caller asks for it. On
    /// failure `value` may be partially normalized; use
    /// [`TypeUnit::process_coercion`] to keep the input intact.
    pub fn process(
        &self,
        value: &mut Value,
        context: Context,
        strict: bool,
    ) -> Result<(), TypeError> {
        self.run(value, context, self.strict || strict)
            .map_err(|err| self.hints.iter().cloned().fold(err, TypeError::annotated))
    }

    fn run(&self, value: &mut Value, context: Context, strict: bool) -> Result<(), TypeError> {
        if value.is_null() {
            return if self.nullable {
                Ok(())
            } else {
                Err(TypeError::null_not_allowed())
            };
        }

        if !strict
            && self.numeric_string_policy().applies(context)
            && let Value::Str(s) = value
            && let Some(n) = parse_number(s)
        {
            *value = n.to_value();
        }

        self.prototype.process(value, context, strict)?;

        for mutator in &self.mutators {
            if let Err(err) = mutator.process(value) {
                tracing::trace!(
                    prototype = self.prototype.id(),
                    mutator = mutator.id(),
                    "mutator rejected value"
                );
                return Err(err.or_text(mutator.explain()));
            }
            if value.is_null() {
                break;
            }
        }

        if value.is_null() && !self.nullable {
            return Err(TypeError::null_not_allowed());
        }
        Ok(())
    }

    /// Processes a copy of `value` and returns the result.
    ///
    /// # Errors
    ///
    /// [`UnitError::CastFailed`] carrying the original input.
    pub fn process_cast(
        &self,
        value: Value,
        context: Context,
        strict: bool,
    ) -> Result<Value, UnitError> {
        let mut out = value.clone();
        match self.process(&mut out, context, strict) {
            Ok(()) => Ok(out),
            Err(error) => {
                tracing::debug!(prototype = self.prototype.id(), %context, "cast failed");
                Err(UnitError::CastFailed {
                    component: self.prototype.id(),
                    value,
                    context,
                    error,
                })
            }
        }
    }

    /// Like [`TypeUnit::process_cast`], returning `None` on failure.
    #[must_use]
    pub fn try_cast(&self, value: Value, context: Context, strict: bool) -> Option<Value> {
        let mut value = value;
        self.process(&mut value, context, strict).ok().map(|()| value)
    }

    /// Normalizes `value` in place, leaving it untouched on failure.
    ///
    /// # Errors
    ///
    /// [`UnitError::CoercionFailed`] carrying the unchanged input.
    pub fn process_coercion(
        &self,
        value: &mut Value,
        context: Context,
        strict: bool,
    ) -> Result<(), UnitError> {
        let mut out = value.clone();
        match self.process(&mut out, context, strict) {
            Ok(()) => {
                *value = out;
                Ok(())
            }
            Err(error) => {
                tracing::debug!(prototype = self.prototype.id(), %context, "coercion failed");
                Err(UnitError::CoercionFailed {
                    component: self.prototype.id(),
                    value: value.clone(),
                    context,
                    error,
                })
            }
        }
    }

    /// Like [`TypeUnit::process_coercion`], returning whether it succeeded.
    pub fn try_coerce(&self, value: &mut Value, context: Context, strict: bool) -> bool {
        let mut out = value.clone();
        if self.process(&mut out, context, strict).is_ok() {
            *value = out;
            true
        } else {
            false
        }
    }

    /// Processes a copy of `value` and renders it for display.
    ///
    /// `null` renders as the empty string when the unit is nullable.
    ///
    /// # Errors
    ///
    /// [`UnitError::TextificationFailed`] when processing fails, or when the
    /// processed value has no textual form.
    pub fn textify(&self, value: &Value, context: Context) -> Result<String, UnitError> {
        let mut processed = value.clone();
        let failure = |error: Option<TypeError>| UnitError::TextificationFailed {
            component: self.prototype.id(),
            value: value.clone(),
            context,
            error,
        };
        self.process(&mut processed, context, false)
            .map_err(|err| failure(Some(err)))?;
        self.prototype.textify(&processed).ok_or_else(|| failure(None))
    }

    /// Like [`TypeUnit::textify`], returning `None` on failure.
    #[must_use]
    pub fn try_textify(&self, value: &Value, context: Context) -> Option<String> {
        self.textify(value, context).ok()
    }

    /// Describes the unit's constraints: mutator explanations in execution
    /// order, then hints.
    #[must_use]
    pub fn explain(&self) -> Vec<ExplanatoryText> {
        self.mutators
            .iter()
            .filter_map(|m| m.explain())
            .chain(self.hints.iter().cloned())
            .collect()
    }
}
