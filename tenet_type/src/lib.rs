// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tenet Type: validation and coercion pipelines for runtime values.
//!
//! A [`TypeUnit`] checks a dynamically typed [`Value`] against a declared
//! type. It either accepts the value (normalizing it in place) or rejects it
//! with a [`TypeError`] that carries an explanation at several audience levels.
//!
//! ## Core Concepts
//!
//! - A [`TypePrototype`] holds the type-specific logic: what counts as an
//!   integer, which notations a boolean may be written in, which class an
//!   object must have. See [`prototypes`] for the built-in set.
//! - A [`Mutator`] is one pluggable validate-or-transform step run after the
//!   prototype: range checks, length limits, trimming, truncation. See
//!   [`mutators`] for the built-in library.
//! - A [`TypeUnit`] combines one prototype with an ordered mutator chain, a
//!   nullability flag, and a strictness flag.
//! - A [`TypeFactory`] builds units and mutators by id from [`Options`].
//!
//! ## Strict and coercive runs
//!
//! A strict run accepts only the native representation: `50` is an integer,
//! `"50"` is not. A coercive run also accepts documented textual notations
//! and normalizes them. Numeric-looking strings are converted according to the
//! prototype's [`NumericStrings`] policy, which by default applies only in the
//! externally facing [`Context::Interface`] and [`Context::Configuration`].
//!
//! ```rust
//! use tenet_type::{Context, Options, TypeFactory, Value};
//!
//! let factory = TypeFactory::with_builtins();
//! let unit = factory.build("integer", &Options::new()).unwrap();
//!
//! let mut value = Value::from("50");
//! unit.process(&mut value, Context::Interface, false).unwrap();
//! assert_eq!(value, Value::from(50));
//!
//! let mut value = Value::from("50");
//! let err = unit.process(&mut value, Context::Interface, true).unwrap_err();
//! assert_eq!(err.to_string(), "the value must strictly be an integer");
//! ```
//!
//! ## Errors
//!
//! [`TypeUnit::process`] returns a plain [`TypeError`] so callers can validate
//! many values and collect every message. Only the boundary methods
//! [`TypeUnit::process_cast`], [`TypeUnit::process_coercion`], and
//! [`TypeUnit::textify`] turn a rejection into a [`UnitError`]; each has a
//! `try_*` sibling returning `Option` or `bool` instead.
//!
//! Misconfigured units and mutators fail at construction with a
//! [`ConfigError`].
//!
//! ## Logging
//!
//! Mutator rejections and boundary failures are reported as `tracing` events
//! at `trace` and `debug` level. No subscriber is installed.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Float rounding goes through
//! `libm`.

#![no_std]

extern crate alloc;

mod context;
mod error;
mod factory;
mod mutator;
pub mod mutators;
mod notation;
mod options;
mod prototype;
pub mod prototypes;
mod unit;
mod value;

pub use context::{Context, NumericStrings};
pub use error::{ConfigError, TypeError, TypeErrorKind, UnitError};
pub use factory::{MutatorConstructor, PrototypeConstructor, TypeFactory};
pub use mutator::{Mutator, PRIORITY_DEFAULT, PRIORITY_EMPTY, PRIORITY_TRIM, PRIORITY_TRUNCATE};
pub use mutators::{
    Bound, CharClass, Characters, EmptyToNull, LengthExact, LengthRange, MultipleOf, NonEmpty,
    Parity, Patterns, PowerOf, Range, Trim, TrimSide, Truncate, TruncatePolicy,
};
pub use notation::{Number, parse_bool, parse_number};
pub use options::{OptionReader, Options};
pub use prototype::{TypePrototype, textify_plain};
pub use prototypes::{
    AnyPrototype, BooleanPrototype, ClassPrototype, EnumPrototype, FloatPrototype,
    IntegerPrototype, ListPrototype, NumberPrototype, StringPrototype,
};
pub use unit::TypeUnit;
pub use value::{ErasedValue, Value};

pub use tenet_text::{ExplanatoryText, InfoLevel, PlainRenderer, Renderer, TextParam};
