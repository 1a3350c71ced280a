// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The built-in mutator library.
//!
//! | id             | type                                 | applies to        |
//! |----------------|--------------------------------------|-------------------|
//! | `length`       | [`LengthExact`]                      | strings, lists    |
//! | `length_range` | [`LengthRange`]                      | strings, lists    |
//! | `chars`        | [`Characters`]                       | strings           |
//! | `patterns`     | [`Patterns`]                         | strings           |
//! | `trim`         | [`Trim`]                             | strings           |
//! | `truncate`     | [`Truncate`]                         | strings           |
//! | `empty_to_null`| [`EmptyToNull`]                      | strings, lists    |
//! | `non_empty`    | [`NonEmpty`]                         | strings, lists    |
//! | `range`        | [`Range`]                            | numbers           |
//! | `min`, `max`   | [`Range`] with one bound             | numbers           |
//! | `multiple_of`  | [`MultipleOf`]                       | numbers           |
//! | `power_of`     | [`PowerOf`]                          | numbers           |
//! | `parity`       | [`Parity`]                           | numbers           |

mod chars;
mod empty;
mod length;
mod multiple;
mod parity;
mod pattern;
mod range;
mod trim;
mod truncate;

pub use chars::{CharClass, Characters};
pub use empty::{EmptyToNull, NonEmpty};
pub use length::{LengthExact, LengthRange};
pub use multiple::{MultipleOf, PowerOf};
pub use parity::Parity;
pub use pattern::Patterns;
pub use range::{Bound, Range};
pub use trim::{Trim, TrimSide};
pub use truncate::{Truncate, TruncatePolicy};

use alloc::sync::Arc;

use crate::error::ConfigError;
use crate::factory::MutatorConstructor;
use crate::mutator::Mutator;
use crate::options::OptionReader;

fn shared<M: Mutator + 'static>(mutator: M) -> Arc<dyn Mutator> {
    Arc::new(mutator)
}

/// Constructors for every built-in mutator, keyed by id.
pub(crate) fn builtins() -> [(&'static str, MutatorConstructor); 14] {
    fn range(r: &OptionReader<'_>) -> Result<Arc<dyn Mutator>, ConfigError> {
        Range::from_options(r).map(shared)
    }
    [
        ("length", |r| LengthExact::from_options(r).map(shared)),
        ("length_range", |r| LengthRange::from_options(r).map(shared)),
        ("chars", |r| Characters::from_options(r).map(shared)),
        ("patterns", |r| Patterns::from_options(r).map(shared)),
        ("trim", |r| Trim::from_options(r).map(shared)),
        ("truncate", |r| Truncate::from_options(r).map(shared)),
        ("empty_to_null", |r| EmptyToNull::from_options(r).map(shared)),
        ("non_empty", |r| NonEmpty::from_options(r).map(shared)),
        ("range", range),
        ("min", range),
        ("max", range),
        ("multiple_of", |r| MultipleOf::from_options(r).map(shared)),
        ("power_of", |r| PowerOf::from_options(r).map(shared)),
        ("parity", |r| Parity::from_options(r).map(shared)),
    ]
}
