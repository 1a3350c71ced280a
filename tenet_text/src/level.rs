// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Audience levels for explanatory messages.

use core::fmt;

/// The audience a message variant is written for.
///
/// Levels are ordered from the most general ([`InfoLevel::EndUser`]) to the
/// most specific ([`InfoLevel::Internal`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum InfoLevel {
    /// Wording for the person who supplied the value.
    #[default]
    EndUser,
    /// Wording for developers integrating against the system.
    Technical,
    /// Wording for maintainers; may mention internals.
    Internal,
}

impl InfoLevel {
    /// All levels, most general first.
    pub const ALL: [Self; 3] = [Self::EndUser, Self::Technical, Self::Internal];

    /// Returns the next more general level, or `None` for [`InfoLevel::EndUser`].
    #[must_use]
    #[inline]
    pub const fn more_general(self) -> Option<Self> {
        match self {
            Self::EndUser => None,
            Self::Technical => Some(Self::EndUser),
            Self::Internal => Some(Self::Technical),
        }
    }

    /// Returns a short lowercase name, useful as a structured log field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EndUser => "end_user",
            Self::Technical => "technical",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for InfoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_chain_ends_at_end_user() {
        assert_eq!(InfoLevel::Internal.more_general(), Some(InfoLevel::Technical));
        assert_eq!(InfoLevel::Technical.more_general(), Some(InfoLevel::EndUser));
        assert_eq!(InfoLevel::EndUser.more_general(), None);
    }

    #[test]
    fn ordering_is_general_to_specific() {
        assert!(InfoLevel::EndUser < InfoLevel::Technical);
        assert!(InfoLevel::Technical < InfoLevel::Internal);
        assert_eq!(InfoLevel::default(), InfoLevel::EndUser);
    }
}
