// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tenet Property: typed, mode-constrained, lazily evaluated properties.
//!
//! A host object keeps its declared fields in a [`PropertyManager`]. Each
//! field is a [`PropertyDescriptor`] carrying an access [`Mode`], persistence
//! [`Lifecycle`], required-ness, a value or getter/setter pair, a default, and
//! an optional [`Evaluator`] (usually a [`TypeUnit`](tenet_type::TypeUnit))
//! that every incoming value passes through.
//!
//! ## Modes
//!
//! The manager's global mode bounds the modes its properties may take:
//!
//! | Global | Allowed property modes |
//! |---|---|
//! | `r` | `r` |
//! | `r+` | `r`, `r+` |
//! | `rw` | all |
//! | `w` | `w`, `w-`, `w--` |
//! | `w-` | `w-`, `w--` |
//! | `w--` | `w--` |
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tenet_property::{Mode, PropertyError, PropertyManager, PropertyValues};
//! use tenet_type::{Context, IntegerPrototype, Range, TypeUnit, Value};
//!
//! let port = Arc::new(
//!     TypeUnit::new(IntegerPrototype::new()).with_mutator(Range::between(1, 65535).unwrap()),
//! );
//!
//! let mut manager = PropertyManager::new("listener", false, Mode::WOnce);
//! manager
//!     .add_property("port")
//!     .unwrap()
//!     .set_type(port, Context::Configuration)
//!     .unwrap();
//!
//! manager
//!     .initialize(PropertyValues::new().with("port", "8080"))
//!     .unwrap();
//!
//! let err = manager.set("port", 9090).unwrap_err();
//! assert!(matches!(err, PropertyError::CannotSetWriteonceProperty { .. }));
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns a [`PropertyError`]. Its
//! [`class`](PropertyError::class) separates configuration defects (wrong call
//! order, modes outside the lattice, duplicate names) from value errors
//! (rejected values, missing required properties, writes the mode forbids).
//!
//! ## Threading
//!
//! Managers and descriptors belong to one host object and are not `Send`:
//! getters, setters, and builders are plain closures over the host's state.
//! The [`TypeUnit`](tenet_type::TypeUnit)s they evaluate with are shared
//! through `Arc` and may be used from any thread.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod accessor;
mod descriptor;
mod error;
mod evaluator;
mod manager;
mod mode;
mod values;

pub use accessor::{Accessor, FieldAccessor};
pub use descriptor::{Getter, Laziness, Lifecycle, PropertyDescriptor, PropertyState, Setter};
pub use error::{ErrorClass, PropertyError};
pub use evaluator::{Evaluator, Predicate};
pub use manager::{Builder, PropertyManager};
pub use mode::{Mode, ParseModeError};
pub use values::PropertyValues;
