// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shortening of overlong strings.

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;

use tenet_text::ExplanatoryText;

use crate::error::{ConfigError, TypeError};
use crate::mutator::{Mutator, PRIORITY_TRUNCATE};
use crate::options::OptionReader;
use crate::value::Value;

/// Where [`Truncate`] is allowed to cut.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TruncatePolicy {
    /// At the character limit.
    #[default]
    Hard,
    /// At the last word boundary before the limit.
    Word,
    /// After the last sentence end before the limit, else at a word boundary.
    Sentence,
}

/// Cuts strings down to a maximum number of characters.
///
/// An optional ellipsis is appended to shortened strings and counts towards
/// the limit. Truncation never fails; values other than strings pass
/// unchanged.
///
/// # Example
///
/// ```rust
/// use tenet_type::{Mutator, Truncate, TruncatePolicy, Value};
///
/// let truncate = Truncate::new(12, TruncatePolicy::Word, Some("...")).unwrap();
/// let mut value = Value::from("the quick brown fox");
/// truncate.process(&mut value).unwrap();
/// assert_eq!(value, Value::from("the quick..."));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Truncate {
    max: usize,
    policy: TruncatePolicy,
    ellipsis: Option<String>,
}

impl Truncate {
    /// Creates a truncation to `max` characters.
    ///
    /// Fails when `max` is zero or the ellipsis leaves no room for content.
    pub fn new(
        max: usize,
        policy: TruncatePolicy,
        ellipsis: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if max == 0 {
            return Err(ConfigError::invalid(
                "truncate",
                "max",
                "the limit must be positive",
            ));
        }
        let ellipsis = ellipsis.filter(|e| !e.is_empty());
        if let Some(e) = ellipsis
            && e.chars().count() >= max
        {
            return Err(ConfigError::invalid(
                "truncate",
                "ellipsis",
                format!("ellipsis {e:?} does not fit in {max} characters"),
            ));
        }
        Ok(Self {
            max,
            policy,
            ellipsis: ellipsis.map(str::to_owned),
        })
    }

    /// The character limit.
    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Returns `s` shortened to the limit, or `None` if it already fits.
    #[must_use]
    pub fn apply(&self, s: &str) -> Option<String> {
        if s.chars().count() <= self.max {
            return None;
        }
        let budget = self.max - self.ellipsis.as_deref().map_or(0, |e| e.chars().count());
        let cut = s.char_indices().nth(budget).map_or(s.len(), |(idx, _)| idx);
        let head = &s[..cut];
        let rest = &s[cut..];
        let kept = match self.policy {
            TruncatePolicy::Hard => head,
            TruncatePolicy::Word => cut_at_word(head, rest),
            TruncatePolicy::Sentence => {
                cut_at_sentence(head).unwrap_or_else(|| cut_at_word(head, rest))
            }
        };
        let mut out = String::with_capacity(kept.len() + 3);
        out.push_str(kept);
        if let Some(e) = &self.ellipsis {
            out.push_str(e);
        }
        Some(out)
    }

    /// Reads `max`, `policy` (`hard`, `word`, or `sentence`), and `ellipsis`.
    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        let max = r.require_count("max")?;
        let policy = match r.str("policy")? {
            None | Some("hard") => TruncatePolicy::Hard,
            Some("word") => TruncatePolicy::Word,
            Some("sentence") => TruncatePolicy::Sentence,
            Some(other) => {
                return Err(ConfigError::invalid(
                    r.component(),
                    "policy",
                    format!("expected `hard`, `word`, or `sentence`, got `{other}`"),
                ));
            }
        };
        Self::new(max, policy, r.str("ellipsis")?)
    }
}

/// Keeps whole words of `head`, given the text that follows it.
fn cut_at_word<'a>(head: &'a str, rest: &str) -> &'a str {
    if rest.starts_with(char::is_whitespace) {
        return head.trim_end();
    }
    match head.rfind(char::is_whitespace) {
        Some(idx) if !head[..idx].trim_end().is_empty() => head[..idx].trim_end(),
        // A single overlong word is cut hard.
        _ => head,
    }
}

fn cut_at_sentence(head: &str) -> Option<&str> {
    let idx = head.rfind(['.', '!', '?'])?;
    Some(&head[..=idx])
}

impl Mutator for Truncate {
    fn id(&self) -> &'static str {
        "truncate"
    }

    fn priority(&self) -> i32 {
        PRIORITY_TRUNCATE
    }

    fn process(&self, value: &mut Value) -> Result<(), TypeError> {
        if let Value::Str(s) = value
            && let Some(shortened) = self.apply(s)
        {
            tracing::trace!(max = self.max, from = s.len(), to = shortened.len(), "truncated");
            *s = shortened;
        }
        Ok(())
    }

    fn explain(&self) -> Option<ExplanatoryText> {
        Some(
            ExplanatoryText::new(
                "shortened to at most {max} character|shortened to at most {max} characters",
            )
            .with_param("max", self.max)
            .with_plural(i64::try_from(self.max).unwrap_or(i64::MAX)),
        )
    }
}
