// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wildcard allow and deny lists.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use tenet_text::{ExplanatoryText, InfoLevel};

use crate::error::{ConfigError, TypeError, TypeErrorKind};
use crate::mutator::Mutator;
use crate::options::OptionReader;
use crate::value::Value;

/// Matches strings against wildcard patterns.
///
/// `*` matches any run of characters (including none) and `?` matches exactly
/// one. A pattern starting with `!` denies matching strings; all other patterns
/// allow them. A string passes when it matches no deny pattern and, if any
/// allow pattern exists, at least one of them.
///
/// # Example
///
/// ```rust
/// use tenet_type::{Mutator, Patterns, Value};
///
/// let patterns = Patterns::new(["*.example.com", "!admin.*"]).unwrap();
/// assert!(patterns.process(&mut Value::from("www.example.com")).is_ok());
/// assert!(patterns.process(&mut Value::from("admin.example.com")).is_err());
/// assert!(patterns.process(&mut Value::from("example.org")).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patterns {
    allow: Vec<String>,
    deny: Vec<String>,
    case_insensitive: bool,
}

impl Patterns {
    /// Compiles a pattern list.
    ///
    /// Fails when the list or any pattern in it is empty.
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allow = Vec::new();
        let mut deny = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let (target, body) = match pattern.strip_prefix('!') {
                Some(body) => (&mut deny, body),
                None => (&mut allow, pattern),
            };
            if body.is_empty() {
                return Err(ConfigError::invalid(
                    "patterns",
                    "patterns",
                    "patterns must not be empty",
                ));
            }
            target.push(body.to_owned());
        }
        if allow.is_empty() && deny.is_empty() {
            return Err(ConfigError::EmptyOption {
                component: "patterns",
                option: "patterns",
            });
        }
        Ok(Self {
            allow,
            deny,
            case_insensitive: false,
        })
    }

    /// Ignores case when matching.
    #[must_use]
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Returns `true` if `text` passes the allow and deny lists.
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        let folded;
        let text = if self.case_insensitive {
            folded = text.to_lowercase();
            folded.as_str()
        } else {
            text
        };
        let matches = |pattern: &String| {
            if self.case_insensitive {
                wildcard_match(&pattern.to_lowercase(), text)
            } else {
                wildcard_match(pattern, text)
            }
        };
        !self.deny.iter().any(matches)
            && (self.allow.is_empty() || self.allow.iter().any(matches))
    }

    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        let patterns = r.require_str_list("patterns")?;
        Ok(Self::new(patterns)?.case_insensitive(r.bool("case_insensitive")?.unwrap_or(false)))
    }

    fn describe(&self) -> ExplanatoryText {
        if self.allow.is_empty() {
            ExplanatoryText::new("the value is not allowed")
                .with_variant(InfoLevel::Technical, "the value must not match {denied}")
                .with_param("denied", self.deny.clone())
        } else {
            ExplanatoryText::new("the value must match one of {allowed}")
                .with_param("allowed", self.allow.clone())
        }
    }
}

impl Mutator for Patterns {
    fn id(&self) -> &'static str {
        "patterns"
    }

    fn process(&self, value: &mut Value) -> Result<(), TypeError> {
        let Value::Str(s) = value else {
            return Err(TypeError::unsupported(self.id(), value));
        };
        if self.accepts(s) {
            Ok(())
        } else {
            Err(TypeError::with_text(TypeErrorKind::Constraint, self.describe()))
        }
    }

    fn explain(&self) -> Option<ExplanatoryText> {
        Some(self.describe())
    }
}

/// Matches `text` against a pattern with `*` and `?` wildcards.
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    // Position of the last `*` and the text position it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;
    while t < text.len() {
        match pattern.get(p) {
            Some(&'*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, tried)) => {
                    p = star + 1;
                    t = tried + 1;
                    backtrack = Some((star, tried + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use crate::options::Options;

    #[test]
    fn wildcards() {
        assert!(wildcard_match("*", ""));
        assert!(wildcard_match("a*c", "abbbc"));
        assert!(wildcard_match("a*c", "ac"));
        assert!(!wildcard_match("a*c", "ab"));
        assert!(wildcard_match("a?c", "abc"));
        assert!(!wildcard_match("a?c", "ac"));
        assert!(wildcard_match("*.rs", "lib.rs"));
        assert!(wildcard_match("é?", "éü"));
        assert!(!wildcard_match("", "x"));
        assert!(wildcard_match("a*b*c", "axxbyybzc"));
    }

    #[test]
    fn allow_list() {
        let patterns = Patterns::new(["red", "gr*"]).unwrap();
        assert!(patterns.accepts("red"));
        assert!(patterns.accepts("green"));
        assert!(!patterns.accepts("blue"));
        let err = patterns.process(&mut Value::from("blue")).unwrap_err();
        assert_eq!(err.to_string(), "the value must match one of red, gr*");
    }

    #[test]
    fn deny_only() {
        let patterns = Patterns::new(["!root", "!admin*"]).unwrap();
        assert!(patterns.accepts("alice"));
        assert!(!patterns.accepts("administrator"));
        let err = patterns.process(&mut Value::from("root")).unwrap_err();
        assert_eq!(err.to_string(), "the value is not allowed");
    }

    #[test]
    fn case_folding() {
        let patterns = Patterns::new(["*.PNG"]).unwrap();
        assert!(!patterns.accepts("a.png"));
        assert!(patterns.case_insensitive(true).accepts("a.png"));
    }

    #[test]
    fn rejects_empty_configuration() {
        assert!(Patterns::new(Vec::<&str>::new()).is_err());
        assert!(Patterns::new(["ok", "!"]).is_err());
        let options = Options::new().with("patterns", Vec::<Value>::new());
        assert_eq!(
            Patterns::from_options(&options.reader("patterns")),
            Err(ConfigError::EmptyOption {
                component: "patterns",
                option: "patterns"
            })
        );
    }
}
