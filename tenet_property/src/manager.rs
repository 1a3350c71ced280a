// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property managers: the named property set of one host object.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tenet_type::Value;

use crate::descriptor::{Lifecycle, PropertyDescriptor};
use crate::error::PropertyError;
use crate::mode::Mode;
use crate::values::PropertyValues;

/// Builds descriptors on demand for lazy managers.
pub type Builder = Box<dyn Fn(&str) -> Option<PropertyDescriptor>>;

/// Owns the properties of one host object.
///
/// An eager manager has its properties declared up front with
/// [`add_property`](Self::add_property), and each descriptor decides whether it
/// is required. A lazy manager builds descriptors on first use through a
/// [`Builder`], and required names are registered at the manager level.
///
/// [`initialize`](Self::initialize) is called exactly once. It checks that
/// every required property is supplied before touching any state, then writes
/// the values in input order. Afterwards the set of properties is frozen and
/// reads and writes go through [`get`](Self::get), [`set`](Self::set), and
/// friends, which enforce each property's [`Mode`].
///
/// # Example
///
/// ```rust
/// use tenet_property::{Mode, PropertyError, PropertyManager, PropertyValues};
/// use tenet_type::Value;
///
/// let mut manager = PropertyManager::new("server", false, Mode::Rw);
/// manager.add_property("host").unwrap();
/// manager
///     .add_property("port")
///     .unwrap()
///     .set_default_value(80)
///     .unwrap();
/// manager
///     .add_property("id")
///     .unwrap()
///     .set_mode(Mode::RPlus)
///     .unwrap()
///     .set_as_required(false)
///     .unwrap();
///
/// let err = manager.initialize(PropertyValues::new()).unwrap_err();
/// assert!(matches!(err, PropertyError::MissingRequiredProperties { .. }));
///
/// manager
///     .initialize(PropertyValues::new().with("host", "localhost").with("id", 7))
///     .unwrap();
/// assert_eq!(manager.get("port").unwrap(), Value::from(80));
/// assert!(manager.set("id", 8).is_err());
/// ```
pub struct PropertyManager<K> {
    owner: K,
    lazy: bool,
    mode: Mode,
    initialized: bool,
    persisted: bool,
    required_names: SmallVec<[String; 4]>,
    builder: Option<Builder>,
    properties: Vec<PropertyDescriptor>,
    by_name: HashMap<String, usize>,
}

impl<K> PropertyManager<K> {
    /// Creates a manager for `owner` with the given global mode.
    #[must_use]
    pub fn new(owner: K, lazy: bool, mode: Mode) -> Self {
        Self {
            owner,
            lazy,
            mode,
            initialized: false,
            persisted: false,
            required_names: SmallVec::new(),
            builder: None,
            properties: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// The object the properties belong to.
    #[must_use]
    #[inline]
    pub fn owner(&self) -> &K {
        &self.owner
    }

    /// The global mode every property mode must fit into.
    #[must_use]
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns `true` if descriptors are built on demand.
    #[must_use]
    #[inline]
    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    /// Returns `true` once [`initialize`](Self::initialize) has run.
    #[must_use]
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns `true` if the owner has been persisted at least once.
    #[must_use]
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Records whether the owner has been persisted. Automatic and immutable
    /// properties consult this on every write.
    pub fn set_persisted(&mut self, persisted: bool) {
        self.persisted = persisted;
    }

    fn ensure_configurable(&self) -> Result<(), PropertyError> {
        if self.initialized {
            Err(PropertyError::ManagerInitialized)
        } else {
            Ok(())
        }
    }

    fn ensure_initialized(&self) -> Result<(), PropertyError> {
        if self.initialized {
            Ok(())
        } else {
            Err(PropertyError::ManagerNotInitialized)
        }
    }

    /// Declares a property and returns its descriptor for configuration.
    ///
    /// The descriptor starts in the manager's global mode.
    pub fn add_property(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut PropertyDescriptor, PropertyError> {
        self.ensure_configurable()?;
        if self.lazy {
            return Err(PropertyError::EagerOnly {
                operation: "add_property",
            });
        }
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(PropertyError::DuplicateProperty { name });
        }
        let descriptor = PropertyDescriptor::scoped(name, self.mode, false);
        let index = self.insert(descriptor);
        Ok(&mut self.properties[index])
    }

    fn insert(&mut self, descriptor: PropertyDescriptor) -> usize {
        let index = self.properties.len();
        self.by_name.insert(descriptor.name().to_owned(), index);
        self.properties.push(descriptor);
        index
    }

    /// Registers names that initialization must supply. Lazy managers only.
    pub fn add_required_property_names<I>(&mut self, names: I) -> Result<(), PropertyError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        if !self.lazy {
            return Err(PropertyError::LazyOnly {
                operation: "add_required_property_names",
            });
        }
        self.ensure_configurable()?;
        for name in names {
            let name = name.into();
            if self.mode == Mode::R {
                return Err(PropertyError::RequiredOnReadonly { name });
            }
            if !self.required_names.contains(&name) {
                self.required_names.push(name);
            }
        }
        Ok(())
    }

    /// Installs the descriptor builder. Lazy managers only.
    ///
    /// The builder is called with a property name the first time that name is
    /// used and returns `None` for names that do not exist.
    pub fn set_builder(
        &mut self,
        builder: impl Fn(&str) -> Option<PropertyDescriptor> + 'static,
    ) -> Result<(), PropertyError> {
        if !self.lazy {
            return Err(PropertyError::LazyOnly {
                operation: "set_builder",
            });
        }
        self.ensure_configurable()?;
        self.builder = Some(Box::new(builder));
        Ok(())
    }

    /// Looks up a declared or already built property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.by_name.get(name).map(|&index| &self.properties[index])
    }

    /// Returns a declared property for further configuration.
    ///
    /// # Errors
    ///
    /// [`PropertyError::ManagerInitialized`] after initialization, and
    /// [`PropertyError::PropertyNotFound`] for unknown names.
    pub fn property_mut(&mut self, name: &str) -> Result<&mut PropertyDescriptor, PropertyError> {
        self.ensure_configurable()?;
        match self.by_name.get(name) {
            Some(&index) => Ok(&mut self.properties[index]),
            None => Err(PropertyError::PropertyNotFound {
                name: name.to_owned(),
            }),
        }
    }

    /// The declared or already built properties, in order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter()
    }

    /// The names initialization must supply, in declaration order.
    #[must_use]
    pub fn required_property_names(&self) -> Vec<&str> {
        if self.lazy {
            self.required_names.iter().map(String::as_str).collect()
        } else {
            self.properties
                .iter()
                .filter(|p| p.is_required())
                .map(PropertyDescriptor::name)
                .collect()
        }
    }

    fn is_required(&self, property: &PropertyDescriptor) -> bool {
        if self.lazy {
            self.required_names.iter().any(|n| n == property.name())
        } else {
            property.is_required()
        }
    }

    fn resolve(&mut self, name: &str) -> Result<usize, PropertyError> {
        if let Some(&index) = self.by_name.get(name) {
            return Ok(index);
        }
        if self.lazy
            && let Some(builder) = &self.builder
            && let Some(mut descriptor) = builder(name)
        {
            if descriptor.name() != name {
                return Err(PropertyError::BuilderNameMismatch {
                    requested: name.to_owned(),
                    built: descriptor.name().to_owned(),
                });
            }
            descriptor.adopt(self.mode, true)?;
            tracing::debug!(property = name, "built property on demand");
            return Ok(self.insert(descriptor));
        }
        Err(PropertyError::PropertyNotFound {
            name: name.to_owned(),
        })
    }

    fn check_write(&self, index: usize, initializing: bool) -> Result<(), PropertyError> {
        let property = &self.properties[index];
        let name = || property.name().to_owned();
        let mode = property.mode();
        let read_only = if initializing {
            !mode.accepts_initial_value()
        } else {
            !mode.is_writable()
        };
        if read_only {
            return Err(PropertyError::CannotSetReadonlyProperty { name: name() });
        }
        if mode.is_write_once() && property.has_been_written() {
            return Err(PropertyError::CannotSetWriteonceProperty { name: name() });
        }
        let lifecycle = property.lifecycle();
        if !lifecycle.allows_write(self.persisted) {
            return Err(if lifecycle == Lifecycle::Automatic {
                PropertyError::CannotSetAutomaticProperty { name: name() }
            } else {
                PropertyError::CannotSetImmutableProperty { name: name() }
            });
        }
        Ok(())
    }

    /// Supplies the initial values and freezes the property set.
    ///
    /// Every required property must be present in `values`; otherwise nothing
    /// changes and all missing names are reported. Values are then written in
    /// the order they appear in `values`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// - [`PropertyError::ManagerInitialized`] on a second call.
    /// - [`PropertyError::MissingBuilder`] for a lazy manager without builder.
    /// - [`PropertyError::MissingRequiredProperties`].
    /// - Per value: [`PropertyError::PropertyNotFound`],
    ///   [`PropertyError::CannotSetReadonlyProperty`], lifecycle errors, or
    ///   [`PropertyError::InvalidPropertyValue`].
    pub fn initialize(&mut self, values: PropertyValues) -> Result<(), PropertyError> {
        self.ensure_configurable()?;
        if self.lazy && self.builder.is_none() {
            return Err(PropertyError::MissingBuilder);
        }
        let missing: Vec<String> = self
            .required_property_names()
            .into_iter()
            .filter(|name| !values.contains(name))
            .map(str::to_owned)
            .collect();
        if !missing.is_empty() {
            return Err(PropertyError::MissingRequiredProperties { names: missing });
        }

        self.initialized = true;
        tracing::debug!(
            properties = self.properties.len(),
            values = values.len(),
            lazy = self.lazy,
            "initializing property manager"
        );
        for (name, value) in values {
            let index = self.resolve(&name)?;
            self.check_write(index, true)?;
            self.properties[index]
                .set_value(value, false)
                .map_err(PropertyError::at_manager)?;
        }
        Ok(())
    }

    /// Reads a property.
    pub fn get(&mut self, name: &str) -> Result<Value, PropertyError> {
        self.ensure_initialized()?;
        let index = self.resolve(name)?;
        let property = &mut self.properties[index];
        if !property.mode().is_readable() {
            return Err(PropertyError::CannotGetWriteonlyProperty {
                name: name.to_owned(),
            });
        }
        property.get_value(false).map_err(PropertyError::at_manager)
    }

    /// Like [`get`](Self::get), returning `None` on any failure.
    pub fn try_get(&mut self, name: &str) -> Option<Value> {
        self.get(name).ok()
    }

    /// Writes a property.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), PropertyError> {
        self.ensure_initialized()?;
        let index = self.resolve(name)?;
        self.check_write(index, false)?;
        self.properties[index]
            .set_value(value.into(), false)
            .map_err(PropertyError::at_manager)
    }

    /// Like [`set`](Self::set), returning whether the write succeeded.
    pub fn try_set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        self.set(name, value).is_ok()
    }

    /// Drops a property's value.
    ///
    /// Read-only and required properties cannot be unset, and a write-once
    /// property cannot be unset after its write.
    pub fn unset(&mut self, name: &str) -> Result<(), PropertyError> {
        self.ensure_initialized()?;
        let index = self.resolve(name)?;
        if self.is_required(&self.properties[index]) {
            return Err(PropertyError::CannotUnsetRequiredProperty {
                name: name.to_owned(),
            });
        }
        self.check_write(index, false)?;
        self.properties[index].unset();
        Ok(())
    }

    /// Returns `true` if the property exists, building it if needed.
    pub fn has(&mut self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// Returns `true` if the property exists, is readable, and reads as a
    /// non-null value.
    pub fn isset(&mut self, name: &str) -> bool {
        self.get(name).is_ok_and(|value| !value.is_null())
    }

    /// Reads every readable property that has a value, in order.
    ///
    /// Lazy managers only report properties built so far.
    pub fn get_all(&mut self) -> Result<PropertyValues, PropertyError> {
        self.ensure_initialized()?;
        let mut values = PropertyValues::new();
        for property in &mut self.properties {
            if !property.mode().is_readable() {
                continue;
            }
            match property.get_value(false) {
                Ok(value) => {
                    values.insert(property.name(), value);
                }
                Err(PropertyError::NoValueSet { .. }) => {}
                Err(err) => return Err(err.at_manager()),
            }
        }
        Ok(values)
    }
}

impl<K: fmt::Debug> fmt::Debug for PropertyManager<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyManager")
            .field("owner", &self.owner)
            .field("lazy", &self.lazy)
            .field("mode", &self.mode)
            .field("initialized", &self.initialized)
            .field("persisted", &self.persisted)
            .field("required_names", &self.required_names)
            .field("builder", &self.builder.is_some())
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}
