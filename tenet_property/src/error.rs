// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property errors.

use alloc::string::String;
use alloc::vec::Vec;

use tenet_type::{TypeError, Value};

use crate::mode::{Mode, join_modes};

/// Which side of the caller/data divide an error falls on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Wrong call order or invalid declarations. The calling code is
    /// defective and should not try to recover.
    Configuration,
    /// The supplied data was rejected. Recoverable.
    Value,
}

/// Everything that can go wrong while declaring or using properties.
///
/// Use [`PropertyError::class`] to tell programmer mistakes from bad data.
#[derive(Clone, Debug, thiserror::Error)]
pub enum PropertyError {
    /// The manager was already initialized.
    #[error("the property manager is already initialized")]
    ManagerInitialized,
    /// The manager has not been initialized yet.
    #[error("the property manager is not initialized")]
    ManagerNotInitialized,
    /// The operation is only available on lazy managers.
    #[error("`{operation}` requires a lazy property manager")]
    LazyOnly {
        /// The rejected operation.
        operation: &'static str,
    },
    /// The operation is only available on eager managers.
    #[error("`{operation}` is not available on a lazy property manager")]
    EagerOnly {
        /// The rejected operation.
        operation: &'static str,
    },
    /// A lazy manager was initialized without a builder.
    #[error("a lazy property manager needs a builder before initialization")]
    MissingBuilder,
    /// The builder returned a descriptor for another name.
    #[error("the builder returned property `{built}` when asked for `{requested}`")]
    BuilderNameMismatch {
        /// The name that was requested.
        requested: String,
        /// The name of the returned descriptor.
        built: String,
    },
    /// A property was declared twice.
    #[error("property `{name}` is already declared")]
    DuplicateProperty {
        /// The property name.
        name: String,
    },
    /// The property was configured after it received its value.
    #[error("property `{name}` is already initialized")]
    PropertyInitialized {
        /// The property name.
        name: String,
    },
    /// The requested mode is outside the manager's lattice.
    #[error(
        "mode `{mode}` is not allowed for property `{name}` under `{global}`, allowed: {}",
        join_modes(.allowed)
    )]
    ModeNotAllowed {
        /// The property name.
        name: String,
        /// The requested mode.
        mode: Mode,
        /// The manager's global mode.
        global: Mode,
        /// The modes the global mode permits.
        allowed: &'static [Mode],
    },
    /// A strictly read-only property or manager cannot require values.
    #[error("property `{name}` is read-only and cannot be required")]
    RequiredOnReadonly {
        /// The property name, or `*` for the manager.
        name: String,
    },
    /// A value was assigned to a getter-bound property without a setter.
    #[error("property `{name}` has a getter but no setter")]
    GetterWithoutSetter {
        /// The property name.
        name: String,
    },
    /// Required properties were absent from the initialization values.
    #[error("missing required properties: {}", .names.join(", "))]
    MissingRequiredProperties {
        /// Every missing name, in declaration order.
        names: Vec<String>,
    },
    /// No property with this name exists or can be built.
    #[error("property `{name}` does not exist")]
    PropertyNotFound {
        /// The property name.
        name: String,
    },
    /// The property cannot be written.
    #[error("property `{name}` is read-only")]
    CannotSetReadonlyProperty {
        /// The property name.
        name: String,
    },
    /// The property was already written once.
    #[error("property `{name}` can only be written once")]
    CannotSetWriteonceProperty {
        /// The property name.
        name: String,
    },
    /// The property cannot be read.
    #[error("property `{name}` is write-only")]
    CannotGetWriteonlyProperty {
        /// The property name.
        name: String,
    },
    /// Required properties cannot be unset.
    #[error("property `{name}` is required and cannot be unset")]
    CannotUnsetRequiredProperty {
        /// The property name.
        name: String,
    },
    /// An automatic property was written before the owner was persisted.
    #[error("property `{name}` is set automatically and cannot be written yet")]
    CannotSetAutomaticProperty {
        /// The property name.
        name: String,
    },
    /// An immutable property was written after the owner was persisted.
    #[error("property `{name}` is immutable")]
    CannotSetImmutableProperty {
        /// The property name.
        name: String,
    },
    /// The property's evaluator rejected a value.
    #[error("invalid value {value} for property `{name}`: {error}")]
    InvalidValue {
        /// The property name.
        name: String,
        /// The rejected value.
        value: Value,
        /// Why it was rejected.
        #[source]
        error: TypeError,
    },
    /// A value passed through the manager was rejected.
    #[error("invalid value {value} for property `{name}`: {error}")]
    InvalidPropertyValue {
        /// The property name.
        name: String,
        /// The rejected value.
        value: Value,
        /// Why it was rejected.
        #[source]
        error: TypeError,
    },
    /// The property has no default.
    #[error("property `{name}` has no default value")]
    NoDefaultValueSet {
        /// The property name.
        name: String,
    },
    /// The property holds no value and has no getter or default.
    #[error("property `{name}` has no value")]
    NoValueSet {
        /// The property name.
        name: String,
    },
}

impl PropertyError {
    /// Classifies the error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ManagerInitialized
            | Self::ManagerNotInitialized
            | Self::LazyOnly { .. }
            | Self::EagerOnly { .. }
            | Self::MissingBuilder
            | Self::BuilderNameMismatch { .. }
            | Self::DuplicateProperty { .. }
            | Self::PropertyInitialized { .. }
            | Self::ModeNotAllowed { .. }
            | Self::RequiredOnReadonly { .. }
            | Self::GetterWithoutSetter { .. } => ErrorClass::Configuration,
            Self::MissingRequiredProperties { .. }
            | Self::PropertyNotFound { .. }
            | Self::CannotSetReadonlyProperty { .. }
            | Self::CannotSetWriteonceProperty { .. }
            | Self::CannotGetWriteonlyProperty { .. }
            | Self::CannotUnsetRequiredProperty { .. }
            | Self::CannotSetAutomaticProperty { .. }
            | Self::CannotSetImmutableProperty { .. }
            | Self::InvalidValue { .. }
            | Self::InvalidPropertyValue { .. }
            | Self::NoDefaultValueSet { .. }
            | Self::NoValueSet { .. } => ErrorClass::Value,
        }
    }

    /// Returns `true` for [`ErrorClass::Configuration`] errors.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.class() == ErrorClass::Configuration
    }

    /// The property the error is about, if any.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::BuilderNameMismatch { requested: name, .. }
            | Self::DuplicateProperty { name }
            | Self::PropertyInitialized { name }
            | Self::ModeNotAllowed { name, .. }
            | Self::RequiredOnReadonly { name }
            | Self::GetterWithoutSetter { name }
            | Self::PropertyNotFound { name }
            | Self::CannotSetReadonlyProperty { name }
            | Self::CannotSetWriteonceProperty { name }
            | Self::CannotGetWriteonlyProperty { name }
            | Self::CannotUnsetRequiredProperty { name }
            | Self::CannotSetAutomaticProperty { name }
            | Self::CannotSetImmutableProperty { name }
            | Self::InvalidValue { name, .. }
            | Self::InvalidPropertyValue { name, .. }
            | Self::NoDefaultValueSet { name }
            | Self::NoValueSet { name } => Some(name),
            Self::ManagerInitialized
            | Self::ManagerNotInitialized
            | Self::LazyOnly { .. }
            | Self::EagerOnly { .. }
            | Self::MissingBuilder
            | Self::MissingRequiredProperties { .. } => None,
        }
    }

    /// The evaluator's explanation for rejected values.
    #[must_use]
    pub fn type_error(&self) -> Option<&TypeError> {
        match self {
            Self::InvalidValue { error, .. } | Self::InvalidPropertyValue { error, .. } => {
                Some(error)
            }
            _ => None,
        }
    }

    /// Rewraps a descriptor-level [`PropertyError::InvalidValue`] as the
    /// manager-level [`PropertyError::InvalidPropertyValue`].
    pub(crate) fn at_manager(self) -> Self {
        match self {
            Self::InvalidValue { name, value, error } => {
                Self::InvalidPropertyValue { name, value, error }
            }
            other => other,
        }
    }
}
