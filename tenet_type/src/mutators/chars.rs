// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character class restrictions.

use alloc::{format, vec};

use bitflags::bitflags;
use tenet_text::{ExplanatoryText, InfoLevel};

use crate::error::{ConfigError, TypeError, TypeErrorKind};
use crate::mutator::Mutator;
use crate::options::OptionReader;
use crate::value::Value;

bitflags! {
    /// Character classes a string may be composed of.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct CharClass: u8 {
        /// Letters.
        const ALPHABETIC = 1 << 0;
        /// Decimal digits.
        const NUMERIC = 1 << 1;
        /// `0-9`, `a-f`, and `A-F`.
        const HEX_DIGIT = 1 << 2;
        /// Letters and digits.
        const ALPHANUMERIC = Self::ALPHABETIC.bits() | Self::NUMERIC.bits();
    }
}

impl CharClass {
    fn describe(self) -> &'static str {
        if self == Self::ALPHANUMERIC {
            "letters and digits"
        } else if self == Self::ALPHABETIC {
            "letters"
        } else if self == Self::NUMERIC {
            "digits"
        } else if self == Self::HEX_DIGIT {
            "hexadecimal digits"
        } else if self.contains(Self::ALPHABETIC) {
            "letters and digits"
        } else {
            "digits and hexadecimal digits"
        }
    }
}

/// Allows only characters from a [`CharClass`].
///
/// By default only ASCII characters qualify; [`Characters::unicode`] widens the
/// alphabetic and numeric classes to all of Unicode. Hexadecimal digits are
/// always ASCII.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Characters {
    class: CharClass,
    unicode: bool,
}

impl Characters {
    /// Allows characters from `class`.
    ///
    /// Fails when `class` is empty.
    pub fn new(class: CharClass) -> Result<Self, ConfigError> {
        if class.is_empty() {
            return Err(ConfigError::EmptyOption {
                component: "chars",
                option: "class",
            });
        }
        Ok(Self {
            class,
            unicode: false,
        })
    }

    /// Letters and digits.
    #[must_use]
    pub fn alphanumeric() -> Self {
        Self {
            class: CharClass::ALPHANUMERIC,
            unicode: false,
        }
    }

    /// Letters only.
    #[must_use]
    pub fn alphabetic() -> Self {
        Self {
            class: CharClass::ALPHABETIC,
            unicode: false,
        }
    }

    /// Digits only.
    #[must_use]
    pub fn numeric() -> Self {
        Self {
            class: CharClass::NUMERIC,
            unicode: false,
        }
    }

    /// Hexadecimal digits only.
    #[must_use]
    pub fn hex() -> Self {
        Self {
            class: CharClass::HEX_DIGIT,
            unicode: false,
        }
    }

    /// Extends letters and digits beyond ASCII.
    #[must_use]
    pub fn unicode(mut self, unicode: bool) -> Self {
        self.unicode = unicode;
        self
    }

    /// The allowed classes.
    #[must_use]
    pub fn class(&self) -> CharClass {
        self.class
    }

    /// Returns `true` if `c` is allowed.
    #[must_use]
    pub fn allows(&self, c: char) -> bool {
        let alphabetic = if self.unicode {
            c.is_alphabetic()
        } else {
            c.is_ascii_alphabetic()
        };
        let numeric = if self.unicode {
            c.is_numeric()
        } else {
            c.is_ascii_digit()
        };
        (self.class.contains(CharClass::ALPHABETIC) && alphabetic)
            || (self.class.contains(CharClass::NUMERIC) && numeric)
            || (self.class.contains(CharClass::HEX_DIGIT) && c.is_ascii_hexdigit())
    }

    /// Reads `class` (one name or a list of names) and `unicode`.
    pub(crate) fn from_options(r: &OptionReader<'_>) -> Result<Self, ConfigError> {
        let names = match r.options().get("class") {
            Some(Value::Str(name)) => vec![name.as_str()],
            _ => r.require_str_list("class")?,
        };
        let mut class = CharClass::empty();
        for name in names {
            class |= match name {
                "alphanumeric" => CharClass::ALPHANUMERIC,
                "alphabetic" => CharClass::ALPHABETIC,
                "numeric" => CharClass::NUMERIC,
                "hex" => CharClass::HEX_DIGIT,
                other => {
                    return Err(ConfigError::invalid(
                        r.component(),
                        "class",
                        format!("unknown character class `{other}`"),
                    ));
                }
            };
        }
        Ok(Self::new(class)?.unicode(r.bool("unicode")?.unwrap_or(false)))
    }

    fn describe(&self) -> ExplanatoryText {
        ExplanatoryText::new("only {allowed} are allowed")
            .with_variant(
                InfoLevel::Technical,
                "character {char} at position {position} is not allowed",
            )
            .with_param("allowed", self.class.describe())
    }
}

impl Mutator for Characters {
    fn id(&self) -> &'static str {
        "chars"
    }

    fn process(&self, value: &mut Value) -> Result<(), TypeError> {
        let Value::Str(s) = value else {
            return Err(TypeError::unsupported(self.id(), value));
        };
        match s.chars().enumerate().find(|&(_, c)| !self.allows(c)) {
            None => Ok(()),
            Some((position, c)) => Err(TypeError::with_text(
                TypeErrorKind::Constraint,
                self.describe()
                    .with_param("char", format!("{c:?}"))
                    .with_param("position", position),
            )),
        }
    }

    fn explain(&self) -> Option<ExplanatoryText> {
        Some(self.describe())
    }
}
