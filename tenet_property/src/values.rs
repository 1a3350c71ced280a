// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered name to value maps.

use alloc::string::String;
use alloc::vec::Vec;

use tenet_type::Value;

/// An ordered map of property names to values.
///
/// [`PropertyManager::initialize`](crate::PropertyManager::initialize) walks
/// its input in insertion order, so setters observe writes in the order the
/// caller listed them. Inserting an existing name replaces the value in place.
///
/// # Example
///
/// ```rust
/// use tenet_property::PropertyValues;
/// use tenet_type::Value;
///
/// let values = PropertyValues::new()
///     .with("host", "localhost")
///     .with("port", 80)
///     .with("host", "example.org");
/// let names: Vec<_> = values.names().collect();
/// assert_eq!(names, ["host", "port"]);
/// assert_eq!(values.get("host"), Some(&Value::from("example.org")));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyValues {
    entries: Vec<(String, Value)>,
}

impl PropertyValues {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the map with `name` set to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets `name` to `value`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => Some(core::mem::replace(&mut slot.1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Looks up a value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` if `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Removes `name`, keeping the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the number of entries.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for PropertyValues {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

impl IntoIterator for PropertyValues {
    type Item = (String, Value);
    type IntoIter = alloc::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::borrow::ToOwned;

    #[test]
    fn insert_replaces_in_place() {
        let mut values = PropertyValues::new().with("a", 1).with("b", 2);
        assert_eq!(values.insert("a", 3), Some(Value::from(1)));
        let entries: Vec<_> = values.into_iter().collect();
        assert_eq!(
            entries,
            [("a".to_owned(), Value::from(3)), ("b".to_owned(), Value::from(2))]
        );
    }

    #[test]
    fn remove_keeps_order() {
        let mut values: PropertyValues = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(values.remove("b"), Some(Value::from(2)));
        assert_eq!(values.remove("b"), None);
        assert_eq!(values.names().collect::<Vec<_>>(), ["a", "c"]);
        assert!(values.contains("c"));
        assert_eq!(values.len(), 2);
    }
}
