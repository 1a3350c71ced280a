// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trimming of leading and trailing characters.

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::vec::Vec;

use crate::error::{ConfigError, TypeError};
use crate::mutator::{Mutator, PRIORITY_TRIM};
use crate::options::OptionReader;
use crate::value::Value;

/// Which ends of a string [`Trim`] strips.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TrimSide {
    /// Both ends.
    #[default]
    Both,
    /// Leading characters only.
    Start,
    /// Trailing characters only.
    End,
}

/// Strips whitespace, or a custom set of characters, from strings.
///
/// Runs before other constraints. Values other than strings pass unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trim {
    side: TrimSide,
    chars: Option<Vec<char>>,
}

impl Trim {
    /// Trims whitespace from both ends.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses the side to trim.
    #[must_use]
    pub fn side(mut self, side: TrimSide) -> Self {
        self.side = side;
        self
    }

    /// Trims the characters of `chars` instead of whitespace.
    #[must_use]
    pub fn chars(mut self, chars: &str) -> Self {
        self.chars = Some(chars.chars().collect());
        self
    }

    /// Returns the trimmed form of `s`.
    #[must_use]
    pub fn apply<'a>(&self, s: &'a str) -> &'a str {
        match (&self.chars, self.side) {
            (None, TrimSide::Both) => s.trim(),
            (None, TrimSide::Start) => s.trim_start(),
            (None, TrimSide::End) => s.trim_end(),
            (Some(set), TrimSide::Both) => s.trim_matches(set.as_slice()),
            (Some(set), TrimSide::Start) => s.trim_start_matches(set.as_slice()),
            (Some(set), TrimSide::End) => s.trim_end_matches(set.as_slice()),
        }
    }

    /// Reads `side` (`both`, `start`, or `end`) and `chars`.
    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        let side = match r.str("side")? {
            None | Some("both") => TrimSide::Both,
            Some("start") => TrimSide::Start,
            Some("end") => TrimSide::End,
            Some(other) => {
                return Err(ConfigError::invalid(
                    r.component(),
                    "side",
                    format!("expected `both`, `start`, or `end`, got `{other}`"),
                ));
            }
        };
        let trim = Self::new().side(side);
        match r.str("chars")? {
            Some("") => Err(ConfigError::EmptyOption {
                component: r.component(),
                option: "chars",
            }),
            Some(chars) => Ok(trim.chars(chars)),
            None => Ok(trim),
        }
    }
}

impl Mutator for Trim {
    fn id(&self) -> &'static str {
        "trim"
    }

    fn priority(&self) -> i32 {
        PRIORITY_TRIM
    }

    fn process(&self, value: &mut Value) -> Result<(), TypeError> {
        if let Value::Str(s) = value {
            let trimmed = self.apply(s);
            if trimmed.len() != s.len() {
                *s = trimmed.to_owned();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use crate::options::Options;

    #[test]
    fn trims_whitespace() {
        let mut value = Value::from("  hello \t");
        Trim::new().process(&mut value).unwrap();
        assert_eq!(value, Value::from("hello"));

        let mut value = Value::from("  hello ");
        Trim::new().side(TrimSide::End).process(&mut value).unwrap();
        assert_eq!(value, Value::from("  hello"));
    }

    #[test]
    fn custom_characters() {
        let trim = Trim::new().chars("/.").side(TrimSide::Start);
        assert_eq!(trim.apply("./path/"), "path/");
        assert_eq!(Trim::new().chars("-").apply("--a-b--"), "a-b");
    }

    #[test]
    fn other_values_pass() {
        let mut value = Value::from(vec!["  a  "]);
        Trim::new().process(&mut value).unwrap();
        assert_eq!(value, Value::from(vec!["  a  "]));
    }

    #[test]
    fn configured_from_options() {
        let options = Options::new().with("side", "start").with("chars", "0");
        let trim = Trim::from_options(&options.reader("trim")).unwrap();
        assert_eq!(trim.apply("007"), "7");

        let options = Options::new().with("side", "middle");
        assert!(Trim::from_options(&options.reader("trim")).is_err());
    }
}
