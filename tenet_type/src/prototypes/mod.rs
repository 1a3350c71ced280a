// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The built-in type prototypes.
//!
//! | id        | type                 | options                         |
//! |-----------|----------------------|---------------------------------|
//! | `any`     | [`AnyPrototype`]     |                                 |
//! | `boolean` | [`BooleanPrototype`] |                                 |
//! | `integer` | [`IntegerPrototype`] | `min`, `max`                    |
//! | `float`   | [`FloatPrototype`]   | `min`, `max`, `allow_nan`       |
//! | `number`  | [`NumberPrototype`]  | `min`, `max`                    |
//! | `string`  | [`StringPrototype`]  |                                 |
//! | `list`    | [`ListPrototype`]    | `items`                         |
//! | `enum`    | [`EnumPrototype`]    | `values`, `names`               |
//! | `class`   | [`ClassPrototype`]   | `class`                         |

mod class;
mod enumeration;
mod list;
mod numeric;
mod scalar;

pub use class::ClassPrototype;
pub use enumeration::EnumPrototype;
pub use list::ListPrototype;
pub use numeric::{FloatPrototype, IntegerPrototype, NumberPrototype};
pub use scalar::{AnyPrototype, BooleanPrototype, StringPrototype};

use alloc::borrow::ToOwned;
use alloc::sync::Arc;

use crate::error::ConfigError;
use crate::factory::{PrototypeConstructor, TypeFactory};
use crate::options::OptionReader;
use crate::prototype::TypePrototype;

fn shared<P: TypePrototype + 'static>(prototype: P) -> Arc<dyn TypePrototype> {
    Arc::new(prototype)
}

fn class(
    factory: &TypeFactory,
    r: &OptionReader<'_>,
) -> Result<Arc<dyn TypePrototype>, ConfigError> {
    let name = r.require_str("class")?;
    factory
        .class(name)
        .map(|proto| shared(proto.clone()))
        .ok_or_else(|| ConfigError::UnknownClass(name.to_owned()))
}

/// Constructors for every built-in prototype, keyed by id.
pub(crate) fn builtins() -> [(&'static str, PrototypeConstructor); 9] {
    [
        ("any", |_, _| Ok(shared(AnyPrototype))),
        ("boolean", |_, _| Ok(shared(BooleanPrototype))),
        ("integer", |_, r| IntegerPrototype::from_options(r).map(shared)),
        ("float", |_, r| FloatPrototype::from_options(r).map(shared)),
        ("number", |_, r| NumberPrototype::from_options(r).map(shared)),
        ("string", |_, _| Ok(shared(StringPrototype))),
        ("list", |f, r| ListPrototype::from_options(f, r).map(shared)),
        ("enum", |_, r| EnumPrototype::from_options(r).map(shared)),
        ("class", class),
    ]
}
