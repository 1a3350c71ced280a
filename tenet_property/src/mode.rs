// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property access modes and the mode lattice.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// The read/write capability of a property or a whole manager.
///
/// | Mode | Symbol | Read | Initial value | Later writes |
/// |---|---|---|---|---|
/// | [`Mode::R`] | `r` | yes | no | no |
/// | [`Mode::RPlus`] | `r+` | yes | yes | no |
/// | [`Mode::Rw`] | `rw` | yes | yes | yes |
/// | [`Mode::W`] | `w` | no | yes | yes |
/// | [`Mode::WOnce`] | `w-` | no | yes | once in total |
/// | [`Mode::WOnceTransient`] | `w--` | no | yes | once in total, nothing retained |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Strictly read-only.
    R,
    /// Read-only after initialization.
    RPlus,
    /// Readable and writable.
    #[default]
    Rw,
    /// Write-only.
    W,
    /// Write-only, written at most once.
    WOnce,
    /// Write-once, and the written value is handed on without being kept.
    WOnceTransient,
}

impl Mode {
    /// Every mode, from most to least readable.
    pub const ALL: [Self; 6] = [
        Self::R,
        Self::RPlus,
        Self::Rw,
        Self::W,
        Self::WOnce,
        Self::WOnceTransient,
    ];

    /// The short symbol used in configuration (`r`, `r+`, `rw`, `w`, `w-`, `w--`).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::R => "r",
            Self::RPlus => "r+",
            Self::Rw => "rw",
            Self::W => "w",
            Self::WOnce => "w-",
            Self::WOnceTransient => "w--",
        }
    }

    /// The per-property modes a manager in this global mode permits.
    #[must_use]
    pub const fn allowed_modes(self) -> &'static [Self] {
        match self {
            Self::R => &[Self::R],
            Self::RPlus => &[Self::R, Self::RPlus],
            Self::Rw => &Self::ALL,
            Self::W => &[Self::W, Self::WOnce, Self::WOnceTransient],
            Self::WOnce => &[Self::WOnce, Self::WOnceTransient],
            Self::WOnceTransient => &[Self::WOnceTransient],
        }
    }

    /// Returns `true` if a manager in this global mode permits `mode`.
    #[must_use]
    pub fn allows(self, mode: Self) -> bool {
        self.allowed_modes().contains(&mode)
    }

    /// Returns `true` if values can be read back.
    #[must_use]
    pub const fn is_readable(self) -> bool {
        matches!(self, Self::R | Self::RPlus | Self::Rw)
    }

    /// Returns `true` if a value may be supplied at initialization.
    #[must_use]
    pub const fn accepts_initial_value(self) -> bool {
        !matches!(self, Self::R)
    }

    /// Returns `true` if values may be written after initialization.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        !matches!(self, Self::R | Self::RPlus)
    }

    /// Returns `true` if at most one write is ever accepted.
    #[must_use]
    pub const fn is_write_once(self) -> bool {
        matches!(self, Self::WOnce | Self::WOnceTransient)
    }

    /// Returns `true` if written values are not retained.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::WOnceTransient)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A string did not name a [`Mode`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown property mode `{0}`, expected one of r, r+, rw, w, w-, w--")]
pub struct ParseModeError(String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.symbol() == s)
            .ok_or_else(|| ParseModeError(s.to_owned()))
    }
}

/// Formats a list of modes as `r, r+, rw`.
pub(crate) fn join_modes(modes: &[Mode]) -> String {
    modes
        .iter()
        .map(|m| m.symbol())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn symbols_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(mode.symbol().parse::<Mode>(), Ok(mode));
            assert_eq!(mode.to_string(), mode.symbol());
        }
        assert!("rw+".parse::<Mode>().is_err());
    }

    #[test]
    fn every_mode_allows_itself() {
        for mode in Mode::ALL {
            assert!(mode.allows(mode), "{mode} must allow itself");
        }
    }

    #[test]
    fn capability_split() {
        let readable: Vec<_> = Mode::ALL.into_iter().filter(|m| m.is_readable()).collect();
        assert_eq!(readable, [Mode::R, Mode::RPlus, Mode::Rw]);
        let once: Vec<_> = Mode::ALL.into_iter().filter(|m| m.is_write_once()).collect();
        assert_eq!(once, [Mode::WOnce, Mode::WOnceTransient]);
        assert!(!Mode::R.accepts_initial_value());
        assert!(Mode::RPlus.accepts_initial_value());
        assert!(!Mode::RPlus.is_writable());
    }

    #[test]
    fn join() {
        assert_eq!(join_modes(Mode::WOnce.allowed_modes()), "w-, w--");
    }
}
