// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property descriptors: one field's configuration and value.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use tenet_type::{Context, TypeError, TypeUnit, Value};

use crate::accessor::Accessor;
use crate::error::PropertyError;
use crate::evaluator::Evaluator;
use crate::mode::Mode;

/// A zero-argument value source.
pub type Getter = Box<dyn Fn() -> Value>;

/// A one-argument value sink.
pub type Setter = Box<dyn Fn(Value)>;

/// How writes interact with the owner's persistence.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// No persistence restrictions.
    #[default]
    Normal,
    /// Generated on persistence: writes are rejected until the owner has been
    /// persisted.
    Automatic,
    /// Fixed by persistence: writes are rejected once the owner has been
    /// persisted.
    Immutable,
    /// Both: writes are always rejected.
    AutoImmutable,
}

impl Lifecycle {
    /// Returns `true` if a write is allowed given the persistence state.
    #[must_use]
    pub fn allows_write(self, persisted: bool) -> bool {
        match self {
            Self::Normal => true,
            Self::Automatic => persisted,
            Self::Immutable => !persisted,
            Self::AutoImmutable => false,
        }
    }
}

/// Whether incoming values are evaluated on write or on first read.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Laziness {
    /// Evaluate on write.
    #[default]
    Eager,
    /// Store raw on write, evaluate on first read.
    Lazy,
}

/// Where a descriptor is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyState {
    /// Freshly created.
    Unconfigured,
    /// Configured, no value accepted yet.
    Configured,
    /// A value was accepted. Configuration is frozen.
    Initialized,
}

#[derive(Debug)]
enum Slot {
    Empty,
    Pending(Value),
    Ready(Value),
}

enum DefaultSource {
    Value(Value),
    Getter(Getter),
}

/// The full configuration of one named property.
///
/// A descriptor carries the property's [`Mode`], [`Lifecycle`], [`Laziness`],
/// required-ness, value or getter/setter pair, default, and an optional
/// [`Evaluator`] that every incoming value is run through.
///
/// Configuration methods return `&mut Self` for chaining and fail once a value
/// has been accepted.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use tenet_property::{Mode, PropertyDescriptor};
/// use tenet_type::{Context, IntegerPrototype, Range, TypeUnit, Value};
///
/// let port = Arc::new(
///     TypeUnit::new(IntegerPrototype::new()).with_mutator(Range::between(1, 65535).unwrap()),
/// );
/// let mut descriptor = PropertyDescriptor::new("port");
/// descriptor
///     .set_mode(Mode::RPlus)
///     .unwrap()
///     .set_type(port, Context::Configuration)
///     .unwrap()
///     .set_default_value(80)
///     .unwrap();
/// assert!(!descriptor.is_required());
///
/// descriptor.set_value(Value::from("8080"), false).unwrap();
/// assert_eq!(descriptor.get_value(false).unwrap(), Value::from(8080));
/// assert!(descriptor.set_value(Value::from(0), false).is_err());
/// ```
pub struct PropertyDescriptor {
    name: String,
    mode: Mode,
    mode_explicit: bool,
    global: Mode,
    lazy_manager: bool,
    lifecycle: Lifecycle,
    laziness: Laziness,
    required: Option<bool>,
    slot: Slot,
    getter: Option<Getter>,
    setter: Option<Setter>,
    default: Option<DefaultSource>,
    evaluator: Option<Evaluator>,
    bound: Option<String>,
    configured: bool,
    initialized: bool,
}

impl PropertyDescriptor {
    /// Creates a standalone descriptor in mode [`Mode::Rw`].
    ///
    /// A manager adopting it checks the mode against its own lattice.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::scoped(name.into(), Mode::Rw, false)
    }

    pub(crate) fn scoped(name: String, global: Mode, lazy_manager: bool) -> Self {
        Self {
            name,
            mode: global,
            mode_explicit: false,
            global,
            lazy_manager,
            lifecycle: Lifecycle::Normal,
            laziness: Laziness::Eager,
            required: None,
            slot: Slot::Empty,
            getter: None,
            setter: None,
            default: None,
            evaluator: None,
            bound: None,
            configured: false,
            initialized: false,
        }
    }

    /// Moves a descriptor built elsewhere under a manager's global mode.
    ///
    /// Lazy managers take required names at the manager level, so a
    /// descriptor arriving there with a required override is rejected.
    pub(crate) fn adopt(&mut self, global: Mode, lazy_manager: bool) -> Result<(), PropertyError> {
        if lazy_manager && self.required.is_some() {
            return Err(PropertyError::EagerOnly {
                operation: "set_as_required",
            });
        }
        if self.mode_explicit {
            if !global.allows(self.mode) {
                return Err(self.mode_not_allowed(self.mode, global));
            }
        } else {
            self.mode = global;
        }
        self.global = global;
        self.lazy_manager = lazy_manager;
        Ok(())
    }

    fn mode_not_allowed(&self, mode: Mode, global: Mode) -> PropertyError {
        PropertyError::ModeNotAllowed {
            name: self.name.clone(),
            mode,
            global,
            allowed: global.allowed_modes(),
        }
    }

    fn configure(&mut self) -> Result<&mut Self, PropertyError> {
        if self.initialized {
            return Err(PropertyError::PropertyInitialized {
                name: self.name.clone(),
            });
        }
        self.configured = true;
        Ok(self)
    }

    /// Sets the access mode.
    ///
    /// # Errors
    ///
    /// [`PropertyError::ModeNotAllowed`] if the owning manager's global mode
    /// does not permit `mode`; the error lists the permitted modes.
    pub fn set_mode(&mut self, mode: Mode) -> Result<&mut Self, PropertyError> {
        if !self.global.allows(mode) {
            return Err(self.mode_not_allowed(mode, self.global));
        }
        let this = self.configure()?;
        this.mode = mode;
        this.mode_explicit = true;
        Ok(this)
    }

    /// Overrides whether initialization must supply a value.
    ///
    /// Not available on strictly read-only properties, nor in lazy managers,
    /// which take required names at the manager level.
    pub fn set_as_required(&mut self, required: bool) -> Result<&mut Self, PropertyError> {
        if self.lazy_manager {
            return Err(PropertyError::EagerOnly {
                operation: "set_as_required",
            });
        }
        if self.mode == Mode::R {
            return Err(PropertyError::RequiredOnReadonly {
                name: self.name.clone(),
            });
        }
        let this = self.configure()?;
        this.required = Some(required);
        Ok(this)
    }

    /// Marks the property as generated on persistence.
    pub fn set_as_automatic(&mut self) -> Result<&mut Self, PropertyError> {
        let this = self.configure()?;
        this.lifecycle = match this.lifecycle {
            Lifecycle::Immutable | Lifecycle::AutoImmutable => Lifecycle::AutoImmutable,
            Lifecycle::Normal | Lifecycle::Automatic => Lifecycle::Automatic,
        };
        Ok(this)
    }

    /// Marks the property as fixed once persisted.
    pub fn set_as_immutable(&mut self) -> Result<&mut Self, PropertyError> {
        let this = self.configure()?;
        this.lifecycle = match this.lifecycle {
            Lifecycle::Automatic | Lifecycle::AutoImmutable => Lifecycle::AutoImmutable,
            Lifecycle::Normal | Lifecycle::Immutable => Lifecycle::Immutable,
        };
        Ok(this)
    }

    /// Marks the property as never directly writable.
    pub fn set_as_auto_immutable(&mut self) -> Result<&mut Self, PropertyError> {
        let this = self.configure()?;
        this.lifecycle = Lifecycle::AutoImmutable;
        Ok(this)
    }

    /// Defers evaluation of written values until they are first read.
    /// Write-only modes are never read, so they keep evaluating on write.
    pub fn set_as_lazy(&mut self) -> Result<&mut Self, PropertyError> {
        let this = self.configure()?;
        this.laziness = Laziness::Lazy;
        Ok(this)
    }

    /// Evaluates incoming values with a coercive run of `unit`.
    pub fn set_type(
        &mut self,
        unit: impl Into<Arc<TypeUnit>>,
        context: Context,
    ) -> Result<&mut Self, PropertyError> {
        self.set_evaluator(Evaluator::Type {
            unit: unit.into(),
            context,
            strict: false,
        })
    }

    /// Evaluates incoming values with `predicate`.
    pub fn set_predicate(
        &mut self,
        predicate: impl Fn(&mut Value) -> Result<(), TypeError> + 'static,
    ) -> Result<&mut Self, PropertyError> {
        self.set_evaluator(Evaluator::Predicate(Box::new(predicate)))
    }

    /// Installs an evaluator, replacing any earlier one.
    pub fn set_evaluator(&mut self, evaluator: Evaluator) -> Result<&mut Self, PropertyError> {
        let this = self.configure()?;
        this.evaluator = Some(evaluator);
        Ok(this)
    }

    /// Sets a default value, replacing any default getter.
    pub fn set_default_value(
        &mut self,
        value: impl Into<Value>,
    ) -> Result<&mut Self, PropertyError> {
        let this = self.configure()?;
        this.default = Some(DefaultSource::Value(value.into()));
        Ok(this)
    }

    /// Sets a default getter, replacing any default value.
    pub fn set_default_getter(
        &mut self,
        getter: impl Fn() -> Value + 'static,
    ) -> Result<&mut Self, PropertyError> {
        let this = self.configure()?;
        this.default = Some(DefaultSource::Getter(Box::new(getter)));
        Ok(this)
    }

    /// Reads the value through `getter` instead of storing it.
    pub fn set_getter(
        &mut self,
        getter: impl Fn() -> Value + 'static,
    ) -> Result<&mut Self, PropertyError> {
        let this = self.configure()?;
        this.getter = Some(Box::new(getter));
        Ok(this)
    }

    /// Hands accepted values to `setter` instead of storing them.
    pub fn set_setter(
        &mut self,
        setter: impl Fn(Value) + 'static,
    ) -> Result<&mut Self, PropertyError> {
        let this = self.configure()?;
        this.setter = Some(Box::new(setter));
        Ok(this)
    }

    /// Binds the property to a field on the owner through `accessor`,
    /// installing a getter and setter pair.
    pub fn bind(&mut self, accessor: impl Accessor + 'static) -> Result<&mut Self, PropertyError> {
        let this = self.configure()?;
        let accessor = Rc::new(accessor);
        this.bound = Some(match accessor.scope() {
            Some(scope) => format!("{scope}::{}", accessor.field()),
            None => accessor.field().to_owned(),
        });
        let reader = Rc::clone(&accessor);
        this.getter = Some(Box::new(move || reader.get()));
        this.setter = Some(Box::new(move |value| accessor.set(value)));
        Ok(this)
    }

    fn evaluated(&self, value: Value) -> Result<Value, PropertyError> {
        let Some(evaluator) = &self.evaluator else {
            return Ok(value);
        };
        let mut out = value.clone();
        match evaluator.evaluate(&mut out) {
            Ok(()) => Ok(out),
            Err(error) => Err(PropertyError::InvalidValue {
                name: self.name.clone(),
                value,
                error,
            }),
        }
    }

    fn store(&mut self, value: Value) {
        if let Some(setter) = &self.setter {
            setter(value);
            self.slot = Slot::Empty;
        } else if self.mode.is_transient() {
            self.slot = Slot::Empty;
        } else {
            self.slot = Slot::Ready(value);
        }
        self.configured = true;
        self.initialized = true;
    }

    /// Writes a value.
    ///
    /// Lazy properties with a readable mode store `value` unevaluated unless
    /// `force` is set. Write-only modes are never read back, so they always
    /// evaluate on write. Otherwise the evaluator runs and the possibly
    /// normalized value is stored, or handed to the setter.
    ///
    /// `force` also lets the owner write an auto-immutable property, as when
    /// persistence generates its value. Access modes and the other
    /// persistence rules are enforced by the manager.
    ///
    /// # Errors
    ///
    /// - [`PropertyError::GetterWithoutSetter`] if a getter is bound without
    ///   a setter.
    /// - [`PropertyError::CannotSetImmutableProperty`] if the property is
    ///   auto-immutable and `force` is not set.
    /// - [`PropertyError::InvalidValue`] if the evaluator rejects `value`.
    pub fn set_value(&mut self, value: Value, force: bool) -> Result<(), PropertyError> {
        if self.getter.is_some() && self.setter.is_none() {
            return Err(PropertyError::GetterWithoutSetter {
                name: self.name.clone(),
            });
        }
        if self.lifecycle == Lifecycle::AutoImmutable && !force {
            return Err(PropertyError::CannotSetImmutableProperty {
                name: self.name.clone(),
            });
        }
        if self.laziness == Laziness::Lazy && !force && self.mode.is_readable() {
            tracing::trace!(property = %self.name, "stored pending value");
            self.slot = Slot::Pending(value);
            self.configured = true;
            return Ok(());
        }
        let value = self.evaluated(value)?;
        self.store(value);
        Ok(())
    }

    /// Evaluates a pending lazy value now. A value that fails evaluation
    /// stays pending.
    fn materialize(&mut self) -> Result<(), PropertyError> {
        if let Slot::Pending(raw) = &self.slot {
            let value = self.evaluated(raw.clone())?;
            tracing::trace!(property = %self.name, "materialized lazy value");
            self.store(value);
        }
        Ok(())
    }

    /// Reads the value.
    ///
    /// With `lazy` set, a pending value is returned raw. Otherwise it is
    /// evaluated once and cached. A bound getter is called and its result
    /// re-validated. Without a value the default is returned.
    ///
    /// # Errors
    ///
    /// - [`PropertyError::InvalidValue`] if evaluation fails.
    /// - [`PropertyError::NoValueSet`] if there is neither a value nor a default.
    pub fn get_value(&mut self, lazy: bool) -> Result<Value, PropertyError> {
        if let Slot::Pending(raw) = &self.slot {
            if lazy {
                return Ok(raw.clone());
            }
            self.materialize()?;
        }
        if let Some(getter) = &self.getter {
            return self.evaluated(getter());
        }
        match &self.slot {
            Slot::Ready(value) | Slot::Pending(value) => Ok(value.clone()),
            Slot::Empty if self.default.is_some() => self.get_default_value(),
            Slot::Empty => Err(PropertyError::NoValueSet {
                name: self.name.clone(),
            }),
        }
    }

    /// Returns the default, run through the evaluator.
    ///
    /// # Errors
    ///
    /// [`PropertyError::NoDefaultValueSet`] if no default is configured.
    pub fn get_default_value(&self) -> Result<Value, PropertyError> {
        let value = match &self.default {
            None => {
                return Err(PropertyError::NoDefaultValueSet {
                    name: self.name.clone(),
                });
            }
            Some(DefaultSource::Value(value)) => value.clone(),
            Some(DefaultSource::Getter(getter)) => getter(),
        };
        self.evaluated(value)
    }

    /// Drops the stored value. A bound setter receives `null`.
    pub fn unset(&mut self) {
        if let Some(setter) = &self.setter {
            setter(Value::Null);
        }
        self.slot = Slot::Empty;
    }

    /// The property name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The access mode.
    #[must_use]
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The persistence lifecycle.
    #[must_use]
    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether values are evaluated on write or first read.
    #[must_use]
    #[inline]
    pub fn laziness(&self) -> Laziness {
        self.laziness
    }

    /// Returns `true` for lazy properties.
    #[must_use]
    pub fn is_lazy(&self) -> bool {
        self.laziness == Laziness::Lazy
    }

    /// Returns `true` if initialization must supply a value.
    ///
    /// An explicit [`set_as_required`](Self::set_as_required) wins; otherwise
    /// a property is required exactly when it has no default. Strictly
    /// read-only properties never take initial values and are never required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.mode != Mode::R && self.required.unwrap_or(!self.has_default())
    }

    /// Returns `true` while a lazy value waits for its first read.
    #[must_use]
    pub fn is_lazy_pending(&self) -> bool {
        matches!(self.slot, Slot::Pending(_))
    }

    /// Returns `true` if a value is stored, evaluated or not.
    #[must_use]
    pub fn has_value(&self) -> bool {
        !matches!(self.slot, Slot::Empty)
    }

    /// Returns `true` if a getter is bound.
    #[must_use]
    pub fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    /// Returns `true` if a setter is bound.
    #[must_use]
    pub fn has_setter(&self) -> bool {
        self.setter.is_some()
    }

    /// Returns `true` if a default value is configured.
    #[must_use]
    pub fn has_default_value(&self) -> bool {
        matches!(self.default, Some(DefaultSource::Value(_)))
    }

    /// Returns `true` if a default getter is configured.
    #[must_use]
    pub fn has_default_getter(&self) -> bool {
        matches!(self.default, Some(DefaultSource::Getter(_)))
    }

    /// Returns `true` if either kind of default is configured.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Returns `true` once a value has been accepted.
    #[must_use]
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The lifecycle state.
    #[must_use]
    pub fn state(&self) -> PropertyState {
        if self.initialized {
            PropertyState::Initialized
        } else if self.configured {
            PropertyState::Configured
        } else {
            PropertyState::Unconfigured
        }
    }

    /// The evaluator, if any.
    #[must_use]
    pub fn evaluator(&self) -> Option<&Evaluator> {
        self.evaluator.as_ref()
    }

    /// The field bound with [`bind`](Self::bind), as `scope::field`.
    #[must_use]
    pub fn bound_field(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    /// Whether a write already happened, counting pending lazy values.
    pub(crate) fn has_been_written(&self) -> bool {
        self.initialized || self.is_lazy_pending()
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("lifecycle", &self.lifecycle)
            .field("laziness", &self.laziness)
            .field("required", &self.is_required())
            .field("slot", &self.slot)
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .field("default", &self.has_default())
            .field("evaluator", &self.evaluator)
            .field("bound", &self.bound)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use tenet_type::{IntegerPrototype, TypeErrorKind};

    use crate::accessor::FieldAccessor;

    fn integer() -> Arc<TypeUnit> {
        Arc::new(TypeUnit::new(IntegerPrototype::new()))
    }

    #[test]
    fn state_progression() {
        let mut descriptor = PropertyDescriptor::new("size");
        assert_eq!(descriptor.state(), PropertyState::Unconfigured);
        descriptor.set_type(integer(), Context::Interface).unwrap();
        assert_eq!(descriptor.state(), PropertyState::Configured);
        descriptor.set_value(Value::from("12"), false).unwrap();
        assert_eq!(descriptor.state(), PropertyState::Initialized);
        assert_eq!(descriptor.get_value(false).unwrap(), Value::from(12));

        assert!(matches!(
            descriptor.set_as_lazy(),
            Err(PropertyError::PropertyInitialized { .. })
        ));
    }

    #[test]
    fn rejected_value_leaves_state_alone() {
        let mut descriptor = PropertyDescriptor::new("size");
        descriptor.set_type(integer(), Context::Internal).unwrap();
        let err = descriptor.set_value(Value::from("12"), false).unwrap_err();
        match err {
            PropertyError::InvalidValue { name, value, error } => {
                assert_eq!(name, "size");
                assert_eq!(value, Value::from("12"));
                assert_eq!(error.kind(), TypeErrorKind::InvalidFormat);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!descriptor.is_initialized());
        assert!(!descriptor.has_value());
    }

    #[test]
    fn required_follows_default() {
        let mut descriptor = PropertyDescriptor::new("a");
        assert!(descriptor.is_required());
        descriptor.set_default_value(1).unwrap();
        assert!(!descriptor.is_required());
        descriptor.set_as_required(true).unwrap();
        assert!(descriptor.is_required());

        let mut descriptor = PropertyDescriptor::new("b");
        descriptor.set_as_required(false).unwrap();
        assert!(!descriptor.is_required());
    }

    #[test]
    fn required_is_rejected_on_read_only() {
        let mut descriptor = PropertyDescriptor::new("id");
        descriptor.set_mode(Mode::R).unwrap();
        assert!(!descriptor.is_required());
        assert!(matches!(
            descriptor.set_as_required(true),
            Err(PropertyError::RequiredOnReadonly { .. })
        ));
    }

    #[test]
    fn mode_outside_lattice() {
        let mut descriptor = PropertyDescriptor::scoped("a".into(), Mode::W, false);
        assert_eq!(descriptor.mode(), Mode::W);
        let err = descriptor.set_mode(Mode::Rw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "mode `rw` is not allowed for property `a` under `w`, allowed: w, w-, w--"
        );
        descriptor.set_mode(Mode::WOnce).unwrap();
    }

    #[test]
    fn adopt_checks_explicit_modes_only() {
        let mut implicit = PropertyDescriptor::new("a");
        implicit.adopt(Mode::RPlus, true).unwrap();
        assert_eq!(implicit.mode(), Mode::RPlus);

        let mut explicit = PropertyDescriptor::new("b");
        explicit.set_mode(Mode::W).unwrap();
        assert!(explicit.adopt(Mode::RPlus, true).is_err());
    }

    #[test]
    fn lifecycle_flags_combine() {
        let mut descriptor = PropertyDescriptor::new("created_at");
        descriptor.set_as_automatic().unwrap().set_as_immutable().unwrap();
        assert_eq!(descriptor.lifecycle(), Lifecycle::AutoImmutable);
        assert!(!Lifecycle::AutoImmutable.allows_write(true));
        assert!(!Lifecycle::Automatic.allows_write(false));
        assert!(Lifecycle::Automatic.allows_write(true));
        assert!(Lifecycle::Immutable.allows_write(false));
        assert!(!Lifecycle::Immutable.allows_write(true));
    }

    #[test]
    fn auto_immutable_takes_forced_writes_only() {
        let mut descriptor = PropertyDescriptor::new("created_at");
        descriptor.set_type(integer(), Context::Internal).unwrap();
        descriptor.set_as_auto_immutable().unwrap();
        assert!(matches!(
            descriptor.set_value(Value::from(1), false),
            Err(PropertyError::CannotSetImmutableProperty { name }) if name == "created_at"
        ));
        assert!(!descriptor.has_value());
        assert!(matches!(
            descriptor.get_value(false),
            Err(PropertyError::NoValueSet { .. })
        ));

        descriptor.set_value(Value::from(1), true).unwrap();
        assert_eq!(descriptor.get_value(false).unwrap(), Value::from(1));
    }

    #[test]
    fn lazy_value_is_evaluated_once() {
        let calls = Rc::new(Cell::new(0_usize));
        let mut descriptor = PropertyDescriptor::new("n");
        let counter = Rc::clone(&calls);
        descriptor
            .set_as_lazy()
            .unwrap()
            .set_predicate(move |value| {
                counter.set(counter.get() + 1);
                if let Value::Int(n) = value {
                    *n *= 2;
                }
                Ok(())
            })
            .unwrap();

        descriptor.set_value(Value::from(21), false).unwrap();
        assert_eq!(calls.get(), 0);
        assert!(descriptor.is_lazy_pending());
        assert_eq!(descriptor.get_value(true).unwrap(), Value::from(21));
        assert_eq!(calls.get(), 0);

        assert_eq!(descriptor.get_value(false).unwrap(), Value::from(42));
        assert_eq!(descriptor.get_value(false).unwrap(), Value::from(42));
        assert_eq!(calls.get(), 1);
        assert!(!descriptor.is_lazy_pending());

        descriptor.set_value(Value::from(1), true).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(descriptor.get_value(false).unwrap(), Value::from(2));
    }

    #[test]
    fn failed_lazy_evaluation_stays_pending() {
        let mut descriptor = PropertyDescriptor::new("n");
        descriptor
            .set_as_lazy()
            .unwrap()
            .set_type(integer(), Context::Internal)
            .unwrap();
        descriptor.set_value(Value::from("x"), false).unwrap();
        assert!(descriptor.get_value(false).is_err());
        assert!(descriptor.is_lazy_pending());
        assert!(!descriptor.is_initialized());
    }

    #[test]
    fn defaults_go_through_the_evaluator() {
        let mut descriptor = PropertyDescriptor::new("n");
        assert!(matches!(
            descriptor.get_default_value(),
            Err(PropertyError::NoDefaultValueSet { .. })
        ));
        assert!(matches!(
            descriptor.get_value(false),
            Err(PropertyError::NoValueSet { .. })
        ));

        descriptor
            .set_type(integer(), Context::Configuration)
            .unwrap()
            .set_default_getter(|| Value::from("0x10"))
            .unwrap();
        assert!(descriptor.has_default_getter());
        assert!(!descriptor.has_default_value());
        assert_eq!(descriptor.get_default_value().unwrap(), Value::from(16));
        assert_eq!(descriptor.get_value(false).unwrap(), Value::from(16));
    }

    #[test]
    fn getter_without_setter_rejects_values() {
        let mut descriptor = PropertyDescriptor::new("now");
        descriptor.set_getter(|| Value::from(7)).unwrap();
        assert_eq!(descriptor.get_value(false).unwrap(), Value::from(7));
        assert!(matches!(
            descriptor.set_value(Value::from(1), false),
            Err(PropertyError::GetterWithoutSetter { .. })
        ));
    }

    #[test]
    fn bound_field_round_trip() {
        let field = Rc::new(RefCell::new(Value::Null));
        let accessor = FieldAccessor::new(
            "port",
            {
                let field = Rc::clone(&field);
                move || field.borrow().clone()
            },
            {
                let field = Rc::clone(&field);
                move |value| *field.borrow_mut() = value
            },
        )
        .with_scope("Server");

        let mut descriptor = PropertyDescriptor::new("port");
        descriptor
            .bind(accessor)
            .unwrap()
            .set_type(integer(), Context::Interface)
            .unwrap();
        assert_eq!(descriptor.bound_field(), Some("Server::port"));

        descriptor.set_value(Value::from("443"), false).unwrap();
        assert_eq!(*field.borrow(), Value::from(443));
        assert!(!descriptor.has_value());
        assert_eq!(descriptor.get_value(false).unwrap(), Value::from(443));

        // Values written behind the descriptor's back are re-validated.
        *field.borrow_mut() = Value::from("oops");
        assert!(descriptor.get_value(false).is_err());

        descriptor.unset();
        assert!(field.borrow().is_null());
    }

    #[test]
    fn transient_values_are_not_retained() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut descriptor =
            PropertyDescriptor::scoped("secret".into(), Mode::WOnceTransient, false);
        let sink = Rc::clone(&seen);
        descriptor
            .set_as_lazy()
            .unwrap()
            .set_predicate(move |value| {
                sink.borrow_mut().push(value.clone());
                Ok(())
            })
            .unwrap();
        descriptor.set_value(Value::from("hunter2"), false).unwrap();
        assert_eq!(*seen.borrow(), [Value::from("hunter2")]);
        assert!(!descriptor.has_value());
        assert!(descriptor.is_initialized());
    }
}
