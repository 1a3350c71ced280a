// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building units and mutators by id.

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::context::NumericStrings;
use crate::error::ConfigError;
use crate::mutator::Mutator;
use crate::options::{OptionReader, Options};
use crate::prototype::TypePrototype;
use crate::prototypes::ClassPrototype;
use crate::unit::TypeUnit;

/// Builds a prototype from options. The factory is passed along so that
/// composite prototypes can build their element units.
pub type PrototypeConstructor =
    fn(&TypeFactory, &OptionReader<'_>) -> Result<Arc<dyn TypePrototype>, ConfigError>;

/// Builds a mutator from options.
pub type MutatorConstructor = fn(&OptionReader<'_>) -> Result<Arc<dyn Mutator>, ConfigError>;

/// A registry of prototype, mutator, and class constructors keyed by id.
///
/// This is the configuration-driven way to assemble [`TypeUnit`]s. Every
/// unit accepts the shared options `nullable`, `strict`, and
/// `numeric_strings` (`never`, `external`, or `always`).
///
/// # Example
///
/// ```rust
/// use tenet_type::{Context, Options, TypeFactory, Value};
///
/// let factory = TypeFactory::with_builtins();
/// let mut unit = factory
///     .build("integer", &Options::new().with("nullable", true))
///     .unwrap();
/// factory
///     .add_mutator(&mut unit, "range", &Options::new().with("min", 0).with("max", 2))
///     .unwrap();
///
/// assert!(unit.try_cast(Value::from(2), Context::Internal, false).is_some());
/// assert!(unit.try_cast(Value::from(3), Context::Internal, false).is_none());
/// assert!(unit.try_cast(Value::Null, Context::Internal, false).is_some());
/// ```
#[derive(Clone, Default)]
pub struct TypeFactory {
    prototypes: HashMap<&'static str, PrototypeConstructor>,
    mutators: HashMap<&'static str, MutatorConstructor>,
    classes: HashMap<&'static str, ClassPrototype>,
}

impl TypeFactory {
    /// Creates an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory with every built-in prototype and mutator registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut factory = Self::new();
        for (id, constructor) in crate::prototypes::builtins() {
            factory.register_prototype(id, constructor);
        }
        for (id, constructor) in crate::mutators::builtins() {
            factory.register_mutator(id, constructor);
        }
        factory
    }

    /// Registers a prototype constructor.
    ///
    /// # Panics
    ///
    /// Panics if a prototype with the same id is already registered.
    pub fn register_prototype(&mut self, id: &'static str, constructor: PrototypeConstructor) {
        assert!(
            !self.prototypes.contains_key(id),
            "prototype `{id}` is already registered"
        );
        self.prototypes.insert(id, constructor);
    }

    /// Registers a mutator constructor.
    ///
    /// # Panics
    ///
    /// Panics if a mutator with the same id is already registered.
    pub fn register_mutator(&mut self, id: &'static str, constructor: MutatorConstructor) {
        assert!(
            !self.mutators.contains_key(id),
            "mutator `{id}` is already registered"
        );
        self.mutators.insert(id, constructor);
    }

    /// Registers `T` as the class `name` for the `class` prototype.
    ///
    /// # Panics
    ///
    /// Panics if a class with the same name is already registered.
    pub fn register_class<T: 'static>(&mut self, name: &'static str) {
        self.register_class_prototype(name, ClassPrototype::of::<T>());
    }

    /// Registers a preconfigured class prototype under `name`.
    ///
    /// # Panics
    ///
    /// Panics if a class with the same name is already registered.
    pub fn register_class_prototype(&mut self, name: &'static str, prototype: ClassPrototype) {
        assert!(
            !self.classes.contains_key(name),
            "class `{name}` is already registered"
        );
        self.classes.insert(name, prototype.named(name));
    }

    /// Looks up a registered class.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassPrototype> {
        self.classes.get(name)
    }

    /// Returns `true` if a prototype is registered under `id`.
    #[must_use]
    pub fn has_prototype(&self, id: &str) -> bool {
        self.prototypes.contains_key(id)
    }

    /// Returns `true` if a mutator is registered under `id`.
    #[must_use]
    pub fn has_mutator(&self, id: &str) -> bool {
        self.mutators.contains_key(id)
    }

    /// The registered prototype ids, sorted.
    #[must_use]
    pub fn prototype_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.prototypes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// The registered mutator ids, sorted.
    #[must_use]
    pub fn mutator_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.mutators.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Builds a unit around the prototype registered as `id`.
    pub fn build(&self, id: &str, options: &Options) -> Result<TypeUnit, ConfigError> {
        let (&id, constructor) = self
            .prototypes
            .get_key_value(id)
            .ok_or_else(|| ConfigError::UnknownPrototype(id.to_owned()))?;
        let reader = options.reader(id);
        let prototype = constructor(self, &reader)?;
        let mut unit = TypeUnit::from_shared(prototype)
            .nullable(reader.bool("nullable")?.unwrap_or(false))
            .strict(reader.bool("strict")?.unwrap_or(false));
        if let Some(policy) = reader.str("numeric_strings")? {
            unit = unit.numeric_strings(match policy {
                "never" => NumericStrings::Never,
                "external" => NumericStrings::ExternalContexts,
                "always" => NumericStrings::Always,
                other => {
                    return Err(ConfigError::invalid(
                        id,
                        "numeric_strings",
                        format!("expected `never`, `external`, or `always`, got `{other}`"),
                    ));
                }
            });
        }
        tracing::debug!(prototype = id, options = options.len(), "built type unit");
        Ok(unit)
    }

    /// Builds the mutator registered as `id`.
    pub fn mutator(&self, id: &str, options: &Options) -> Result<Arc<dyn Mutator>, ConfigError> {
        let (&id, constructor) = self
            .mutators
            .get_key_value(id)
            .ok_or_else(|| ConfigError::UnknownMutator(id.to_owned()))?;
        constructor(&options.reader(id))
    }

    /// Builds the mutator registered as `id` and appends it to `unit`.
    pub fn add_mutator(
        &self,
        unit: &mut TypeUnit,
        id: &str,
        options: &Options,
    ) -> Result<(), ConfigError> {
        let mutator = self.mutator(id, options)?;
        tracing::trace!(mutator = mutator.id(), prototype = unit.prototype().id(), "added mutator");
        unit.push_mutator(mutator);
        Ok(())
    }
}

impl fmt::Debug for TypeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut classes: Vec<_> = self.classes.keys().copied().collect();
        classes.sort_unstable();
        f.debug_struct("TypeFactory")
            .field("prototypes", &self.prototype_ids())
            .field("mutators", &self.mutator_ids())
            .field("classes", &classes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use crate::context::Context;
    use crate::error::TypeErrorKind;
    use crate::value::Value;

    #[derive(Clone, Debug)]
    struct Connection;

    #[test]
    fn builtins_are_registered() {
        let factory = TypeFactory::with_builtins();
        assert_eq!(
            factory.prototype_ids(),
            ["any", "boolean", "class", "enum", "float", "integer", "list", "number", "string"]
        );
        assert_eq!(factory.mutator_ids().len(), 14);
        assert!(factory.has_mutator("power_of"));
    }

    #[test]
    fn unknown_ids() {
        let factory = TypeFactory::with_builtins();
        assert_eq!(
            factory.build("decimal", &Options::new()).unwrap_err(),
            ConfigError::UnknownPrototype("decimal".into())
        );
        let mut unit = factory.build("string", &Options::new()).unwrap();
        assert_eq!(
            factory
                .add_mutator(&mut unit, "uppercase", &Options::new())
                .unwrap_err(),
            ConfigError::UnknownMutator("uppercase".into())
        );
    }

    #[test]
    fn shared_options() {
        let factory = TypeFactory::with_builtins();
        let options = Options::new()
            .with("strict", true)
            .with("nullable", "yes")
            .with("numeric_strings", "always");
        let unit = factory.build("integer", &options).unwrap();
        assert!(unit.is_strict());
        assert!(unit.is_nullable());
        assert_eq!(unit.numeric_string_policy(), NumericStrings::Always);

        let options = Options::new().with("numeric_strings", "sometimes");
        assert!(factory.build("integer", &options).is_err());
    }

    #[test]
    fn mutator_configuration_errors_fail_fast() {
        let factory = TypeFactory::with_builtins();
        assert_eq!(
            factory.mutator("length", &Options::new()).unwrap_err(),
            ConfigError::MissingOption {
                component: "length",
                option: "length"
            }
        );
        assert!(factory.mutator("range", &Options::new().with("min", 3).with("max", 1)).is_err());
        assert!(
            factory
                .build("enum", &Options::new().with("values", Vec::<Value>::new()))
                .is_err()
        );
    }

    #[test]
    fn classes() {
        let mut factory = TypeFactory::with_builtins();
        factory.register_class::<Connection>("connection");
        let unit = factory
            .build("class", &Options::new().with("class", "connection"))
            .unwrap();
        assert!(unit.try_cast(Value::object(Connection), Context::Internal, true).is_some());
        let err = unit
            .process(&mut Value::from(1), Context::Internal, false)
            .unwrap_err();
        assert_eq!(err.kind(), TypeErrorKind::InvalidType);
        assert_eq!(err.to_string(), "the value must be a connection object");

        assert_eq!(
            factory
                .build("class", &Options::new().with("class", "socket"))
                .unwrap_err(),
            ConfigError::UnknownClass("socket".into())
        );
    }

    #[test]
    fn list_items_by_id() {
        let factory = TypeFactory::with_builtins();
        let unit = factory
            .build("list", &Options::new().with("items", "boolean"))
            .unwrap();
        assert_eq!(
            unit.try_cast(Value::from("yes, off"), Context::Interface, false),
            Some(Value::from(vec![true, false]))
        );
    }

    #[test]
    #[should_panic(expected = "mutator `trim` is already registered")]
    fn duplicate_registration_panics() {
        let mut factory = TypeFactory::with_builtins();
        factory.register_mutator("trim", |_| Err(ConfigError::UnknownMutator("trim".into())));
    }
}
