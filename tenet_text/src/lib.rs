// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tenet Text: explanatory messages for validation failures.
//!
//! An [`ExplanatoryText`] is an immutable message value with one template per
//! [`InfoLevel`], a set of named parameters, and an optional plural selector.
//! It is the leaf dependency of the rest of the workspace: whenever a value is
//! rejected, the rejection carries an `ExplanatoryText` describing why.
//!
//! ## Levels
//!
//! | Level | Audience |
//! |-------|----------|
//! | [`InfoLevel::EndUser`] | people filling in a form or a config file |
//! | [`InfoLevel::Technical`] | integrators and API consumers |
//! | [`InfoLevel::Internal`] | maintainers reading logs |
//!
//! Looking up a level that has no template walks towards the more general
//! levels until one is found. Every text has an end-user template.
//!
//! ## Rendering
//!
//! This crate never translates. A [`Renderer`] turns a text plus a level into
//! a display string; [`PlainRenderer`] only interpolates `{name}` placeholders
//! and picks plural forms, which is what tests and log lines need. Embedders
//! plug their own localization layer in behind the same trait.
//!
//! ```rust
//! use tenet_text::{ExplanatoryText, InfoLevel, PlainRenderer, Renderer};
//!
//! let text = ExplanatoryText::new("exactly {length} character required|exactly {length} characters required")
//!     .with_variant(InfoLevel::Technical, "length must equal {length}, got {actual}")
//!     .with_param("length", 10)
//!     .with_param("actual", 9)
//!     .with_plural(10);
//!
//! assert_eq!(
//!     PlainRenderer.render(&text, InfoLevel::EndUser),
//!     "exactly 10 characters required"
//! );
//! assert_eq!(
//!     PlainRenderer.render(&text, InfoLevel::Internal),
//!     "length must equal 10, got 9"
//! );
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod level;
mod param;
mod render;
mod text;

pub use level::InfoLevel;
pub use param::TextParam;
pub use render::{PlainRenderer, Renderer};
pub use text::ExplanatoryText;
