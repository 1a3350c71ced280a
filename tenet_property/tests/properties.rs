// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `tenet_property` crate.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use tenet_property::{
    ErrorClass, Mode, PropertyDescriptor, PropertyError, PropertyManager, PropertyState,
    PropertyValues,
};
use tenet_type::{
    Context, IntegerPrototype, LengthRange, Options, StringPrototype, TypeFactory, TypeUnit, Value,
};

fn expected_lattice(global: Mode) -> &'static [Mode] {
    use Mode::*;
    match global {
        R => &[R],
        RPlus => &[R, RPlus],
        Rw => &[R, RPlus, Rw, W, WOnce, WOnceTransient],
        W => &[W, WOnce, WOnceTransient],
        WOnce => &[WOnce, WOnceTransient],
        WOnceTransient => &[WOnceTransient],
    }
}

#[test]
fn mode_lattice_is_exhaustive() {
    for global in Mode::ALL {
        for requested in Mode::ALL {
            let mut manager = PropertyManager::new((), false, global);
            let descriptor = manager.add_property("p").unwrap();
            let result = descriptor.set_mode(requested).map(|d| d.mode());
            let allowed = expected_lattice(global);
            if allowed.contains(&requested) {
                assert_eq!(result.unwrap(), requested, "{global} -> {requested}");
            } else {
                match result {
                    Err(PropertyError::ModeNotAllowed {
                        allowed: reported,
                        ..
                    }) => assert_eq!(reported, allowed, "{global} -> {requested}"),
                    other => panic!("{global} -> {requested}: unexpected {other:?}"),
                }
            }
        }
    }
}

#[test]
fn requiredness_defaults_to_absence_of_default() {
    let mut manager = PropertyManager::new((), false, Mode::Rw);
    manager.add_property("plain").unwrap();
    manager
        .add_property("defaulted")
        .unwrap()
        .set_default_value("x")
        .unwrap();
    manager
        .add_property("optional")
        .unwrap()
        .set_as_required(false)
        .unwrap();
    manager
        .add_property("forced")
        .unwrap()
        .set_default_getter(|| Value::from(1))
        .unwrap()
        .set_as_required(true)
        .unwrap();

    assert_eq!(manager.required_property_names(), ["plain", "forced"]);
}

#[test]
fn missing_required_properties_change_nothing() {
    let mut manager = PropertyManager::new((), false, Mode::Rw);
    for name in ["a", "b", "c"] {
        manager.add_property(name).unwrap();
    }

    let err = manager
        .initialize(PropertyValues::new().with("b", 1))
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::Value);
    match err {
        PropertyError::MissingRequiredProperties { names } => assert_eq!(names, ["a", "c"]),
        other => panic!("unexpected {other:?}"),
    }
    assert!(!manager.is_initialized());
    for property in manager.properties() {
        assert_eq!(property.state(), PropertyState::Unconfigured);
        assert!(!property.has_value());
    }

    manager
        .initialize([("a", 1), ("b", 2), ("c", 3)].into_iter().collect())
        .unwrap();
    assert_eq!(manager.get("c").unwrap(), Value::from(3));
}

#[test]
fn write_once_rejects_second_set() {
    let mut manager = PropertyManager::new((), false, Mode::WOnce);
    manager
        .add_property("token")
        .unwrap()
        .set_default_value(Value::Null)
        .unwrap();
    manager.initialize(PropertyValues::new()).unwrap();

    manager.set("token", "v1").unwrap();
    let err = manager.set("token", "v2").unwrap_err();
    assert!(matches!(
        err,
        PropertyError::CannotSetWriteonceProperty { ref name } if name == "token"
    ));
    assert!(matches!(
        manager.get("token"),
        Err(PropertyError::CannotGetWriteonlyProperty { .. })
    ));
}

#[test]
fn initialization_counts_as_the_single_write() {
    let mut manager = PropertyManager::new((), false, Mode::Rw);
    manager
        .add_property("secret")
        .unwrap()
        .set_mode(Mode::WOnceTransient)
        .unwrap();
    manager
        .initialize(PropertyValues::new().with("secret", "s"))
        .unwrap();
    assert!(!manager.property("secret").unwrap().has_value());
    assert!(matches!(
        manager.set("secret", "t"),
        Err(PropertyError::CannotSetWriteonceProperty { .. })
    ));
}

#[test]
fn lazy_values_evaluate_once_through_the_manager() {
    let calls = Rc::new(Cell::new(0_usize));
    let mut manager = PropertyManager::new((), false, Mode::Rw);
    let counter = Rc::clone(&calls);
    manager
        .add_property("size")
        .unwrap()
        .set_as_lazy()
        .unwrap()
        .set_predicate(move |value| {
            counter.set(counter.get() + 1);
            match value {
                Value::Int(_) => Ok(()),
                other => Err(tenet_type::TypeError::invalid_type("an integer", other)),
            }
        })
        .unwrap();

    manager
        .initialize(PropertyValues::new().with("size", 4))
        .unwrap();
    assert_eq!(calls.get(), 0);
    assert!(manager.property("size").unwrap().is_lazy_pending());

    assert_eq!(manager.get("size").unwrap(), Value::from(4));
    assert_eq!(manager.get("size").unwrap(), Value::from(4));
    assert_eq!(calls.get(), 1);

    // A bad lazy value is only reported on the read.
    manager.set("size", "big").unwrap();
    assert_eq!(calls.get(), 1);
    let err = manager.get("size").unwrap_err();
    assert!(matches!(err, PropertyError::InvalidPropertyValue { .. }));
    assert!(manager.property("size").unwrap().is_lazy_pending());
}

#[test]
fn write_only_lazy_values_are_checked_on_write() {
    let written = Rc::new(RefCell::new(Vec::new()));
    let mut manager = PropertyManager::new((), false, Mode::Rw);
    {
        let written = Rc::clone(&written);
        manager
            .add_property("pin")
            .unwrap()
            .set_mode(Mode::W)
            .unwrap()
            .set_as_lazy()
            .unwrap()
            .set_predicate(|value| match value {
                Value::Int(_) => Ok(()),
                other => Err(tenet_type::TypeError::invalid_type("an integer", other)),
            })
            .unwrap()
            .set_setter(move |value| written.borrow_mut().push(value))
            .unwrap();
    }
    manager
        .initialize(PropertyValues::new().with("pin", 1234))
        .unwrap();
    assert_eq!(*written.borrow(), [Value::from(1234)]);

    let err = manager.set("pin", "not-an-int").unwrap_err();
    assert!(matches!(err, PropertyError::InvalidPropertyValue { ref name, .. } if name == "pin"));
    assert_eq!(written.borrow().len(), 1);

    manager.set("pin", 5).unwrap();
    assert_eq!(*written.borrow(), [Value::from(1234), Value::from(5)]);
    assert!(!manager.property("pin").unwrap().is_lazy_pending());
}

#[test]
fn write_once_lazy_values_fail_at_initialization() {
    let mut manager = PropertyManager::new((), false, Mode::WOnce);
    manager
        .add_property("seed")
        .unwrap()
        .set_as_lazy()
        .unwrap()
        .set_type(
            Arc::new(TypeUnit::new(IntegerPrototype::new())),
            Context::Internal,
        )
        .unwrap();
    let err = manager
        .initialize(PropertyValues::new().with("seed", "x"))
        .unwrap_err();
    assert!(matches!(err, PropertyError::InvalidPropertyValue { .. }));
    assert!(!manager.property("seed").unwrap().has_value());
}

#[test]
fn typed_properties_from_the_factory() {
    let factory = TypeFactory::with_builtins();
    let mut name = factory.build("string", &Options::new()).unwrap();
    name.add_mutator(&factory, "trim", &Options::new()).unwrap();
    let name = Arc::new(name.with_mutator(LengthRange::new(Some(1), Some(8)).unwrap()));
    let port = Arc::new(
        factory
            .build("integer", &Options::new().with("min", 1).with("max", 65535))
            .unwrap(),
    );

    let mut manager = PropertyManager::new("service", false, Mode::RPlus);
    manager
        .add_property("name")
        .unwrap()
        .set_type(name, Context::Interface)
        .unwrap();
    manager
        .add_property("port")
        .unwrap()
        .set_type(port, Context::Interface)
        .unwrap()
        .set_default_value(80)
        .unwrap();

    let err = manager
        .initialize(
            PropertyValues::new()
                .with("name", "  api  ")
                .with("port", "70000"),
        )
        .unwrap_err();
    match &err {
        PropertyError::InvalidPropertyValue { name, value, error } => {
            assert_eq!(name, "port");
            assert_eq!(value, &Value::from("70000"));
            assert_eq!(error.to_string(), "the value must be between 1 and 65535");
        }
        other => panic!("unexpected {other:?}"),
    }
    // Values before the failing one were written.
    assert_eq!(manager.get("name").unwrap(), Value::from("api"));
    assert_eq!(manager.get("port").unwrap(), Value::from(80));

    let all = manager.get_all().unwrap();
    assert_eq!(all.names().collect::<Vec<_>>(), ["name", "port"]);
}

#[test]
fn lazy_manager_with_required_names() {
    let built = Rc::new(RefCell::new(Vec::new()));
    let unit = Arc::new(TypeUnit::new(IntegerPrototype::new()));
    let mut manager = PropertyManager::new((), true, Mode::Rw);
    manager.add_required_property_names(["width"]).unwrap();
    {
        let built = Rc::clone(&built);
        manager
            .set_builder(move |name| {
                if !["width", "height"].contains(&name) {
                    return None;
                }
                built.borrow_mut().push(name.to_owned());
                let mut descriptor = PropertyDescriptor::new(name);
                descriptor
                    .set_type(Arc::clone(&unit), Context::Configuration)
                    .ok()?
                    .set_default_value(0)
                    .ok()?;
                Some(descriptor)
            })
            .unwrap();
    }

    assert!(matches!(
        manager.initialize(PropertyValues::new()),
        Err(PropertyError::MissingRequiredProperties { .. })
    ));
    assert!(built.borrow().is_empty());

    manager
        .initialize(PropertyValues::new().with("width", "1k"))
        .unwrap();
    assert_eq!(manager.get("width").unwrap(), Value::from(1000));
    assert_eq!(manager.get("height").unwrap(), Value::from(0));
    assert!(matches!(
        manager.get("depth"),
        Err(PropertyError::PropertyNotFound { .. })
    ));
    assert_eq!(*built.borrow(), ["width", "height"]);
    assert!(manager.isset("width"));
}

#[test]
fn lazy_managers_refuse_per_property_requiredness() {
    let mut manager = PropertyManager::new((), true, Mode::Rw);
    manager
        .set_builder(|name| {
            let mut descriptor = PropertyDescriptor::new(name);
            descriptor.set_as_required(true).ok()?;
            Some(descriptor)
        })
        .unwrap();
    assert!(!manager.has("width"));
    assert!(matches!(
        manager.initialize(PropertyValues::new().with("width", 3)),
        Err(PropertyError::EagerOnly {
            operation: "set_as_required"
        })
    ));

    let mut manager = PropertyManager::new((), true, Mode::Rw);
    manager
        .set_builder(|name| Some(PropertyDescriptor::new(name)))
        .unwrap();
    assert!(manager.has("width"));
    let err = manager
        .property_mut("width")
        .unwrap()
        .set_as_required(true)
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::Configuration);
    assert!(matches!(
        err,
        PropertyError::EagerOnly {
            operation: "set_as_required"
        }
    ));
}

#[test]
fn string_properties_reject_wrong_length() {
    let unit = Arc::new(
        TypeUnit::new(StringPrototype).with_mutator(LengthRange::new(Some(2), Some(4)).unwrap()),
    );
    let mut manager = PropertyManager::new((), false, Mode::Rw);
    manager
        .add_property("code")
        .unwrap()
        .set_type(unit, Context::Internal)
        .unwrap()
        .set_default_value("ab")
        .unwrap();
    manager.initialize(PropertyValues::new()).unwrap();
    assert!(!manager.try_set("code", "abcdef"));
    assert_eq!(manager.try_get("code"), Some(Value::from("ab")));
    assert!(manager.try_set("code", "abc"));
    assert_eq!(manager.try_get("code"), Some(Value::from("abc")));
}
