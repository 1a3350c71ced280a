// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering explanatory texts into display strings.

use alloc::string::String;
use core::fmt::Write;

use crate::level::InfoLevel;
use crate::param::TextParam;
use crate::text::ExplanatoryText;

/// Turns an [`ExplanatoryText`] into a display string for one audience level.
///
/// This is the seam where a localization layer plugs in. Implementations
/// receive the structured text (templates, parameters, plural selector) and
/// decide on wording and formatting.
pub trait Renderer {
    /// Renders `text` for `level`.
    fn render(&self, text: &ExplanatoryText, level: InfoLevel) -> String;

    /// Renders several fragments and joins them with `separator`.
    ///
    /// Used to attach non-fatal annotations to a primary message.
    fn render_joined<'a, I>(&self, texts: I, level: InfoLevel, separator: &str) -> String
    where
        I: IntoIterator<Item = &'a ExplanatoryText>,
        Self: Sized,
    {
        let mut out = String::new();
        for (i, text) in texts.into_iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(&self.render(text, level));
        }
        out
    }
}

/// A renderer that interpolates placeholders without translating.
///
/// - `{name}` is replaced with the parameter `name`; unknown names are kept
///   verbatim.
/// - `{{` and `}}` produce literal braces.
/// - `a|b` selects a plural form: `a` when the selector is `1` or `-1` (or
///   absent), `b` otherwise. Extra forms are ignored.
/// - Lists render as `, `-separated items, nested texts at the same level.
#[derive(Copy, Clone, Debug, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, text: &ExplanatoryText, level: InfoLevel) -> String {
        let template = select_plural_form(text.template(level), text.plural());
        let mut out = String::with_capacity(template.len());
        let mut chars = template.char_indices().peekable();
        while let Some((idx, ch)) = chars.next() {
            match ch {
                '{' if chars.peek().map(|&(_, c)| c) == Some('{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek().map(|&(_, c)| c) == Some('}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let rest = &template[idx + 1..];
                    if let Some(end) = rest.find('}') {
                        let name = &rest[..end];
                        match text.param(name) {
                            Some(param) => self.write_param(&mut out, param, level),
                            None => {
                                out.push('{');
                                out.push_str(name);
                                out.push('}');
                            }
                        }
                        // Skip the name and the closing brace.
                        for _ in 0..=name.chars().count() {
                            chars.next();
                        }
                    } else {
                        out.push('{');
                    }
                }
                _ => out.push(ch),
            }
        }
        out
    }
}

impl PlainRenderer {
    fn write_param(&self, out: &mut String, param: &TextParam, level: InfoLevel) {
        match param {
            TextParam::Text(s) => out.push_str(s),
            TextParam::Integer(n) => {
                let _ = write!(out, "{n}");
            }
            TextParam::Float(x) => {
                let _ = write!(out, "{x}");
            }
            TextParam::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            TextParam::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_param(out, item, level);
                }
            }
            TextParam::Nested(text) => out.push_str(&self.render(text, level)),
        }
    }
}

/// Picks the plural form of `template` for `selector`.
///
/// Bars inside `{...}` placeholders do not split forms.
fn select_plural_form(template: &str, selector: Option<i64>) -> &str {
    let mut forms = [template; 2];
    let mut count = 1;
    let mut depth = 0_usize;
    let mut start = 0;
    for (idx, ch) in template.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                if count == 1 {
                    forms[0] = &template[start..idx];
                    start = idx + 1;
                    forms[1] = &template[start..];
                    count = 2;
                } else {
                    forms[1] = &template[start..idx];
                    break;
                }
            }
            _ => {}
        }
    }
    if count == 1 {
        return template;
    }
    match selector {
        Some(n) if n.unsigned_abs() != 1 => forms[1],
        _ => forms[0],
    }
}
