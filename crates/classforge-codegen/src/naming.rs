//! Identifier sanitizing and naming rules for generated C#.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `user name` | [`sanitize`] | `user_name` |
//! | `2fa` | [`sanitize`] | `Prop_2fa` |
//! | `userName` | [`apply_naming_convention`] | `UserName` |
//! | `Items` | [`singularize`] | `Item` |
//! | `class` | [`escape_keyword`] | `@class` |

use classforge_core::{is_identifier_part, is_identifier_start, is_keyword};
use std::borrow::Cow;

/// Substituted for an empty JSON key.
pub const EMPTY_NAME: &str = "EmptyProperty";

/// Prepended to names whose first character cannot start an identifier,
/// such as a digit or a combining mark.
pub const NUMERIC_PREFIX: &str = "Prop_";

/// Appended to array property names that do not end in `s`.
pub const ITEM_SUFFIX: &str = "Item";

const NBSP_ENTITY: &str = "&nbsp;";

/// Characters allowed in a sanitized identifier.
#[must_use]
pub fn is_identifier_char(c: char) -> bool {
    is_identifier_part(c)
}

/// Convert an arbitrary JSON key into an identifier.
///
/// The result is never empty, contains only identifier characters, and
/// always starts with a character that can start an identifier. Other
/// numbers such as `²` or `½` are not identifier characters.
///
/// # Examples
///
/// ```
/// use classforge_codegen::naming::sanitize;
///
/// assert_eq!(sanitize(""), "EmptyProperty");
/// assert_eq!(sanitize("first   name"), "first_name");
/// assert_eq!(sanitize("a&nbsp;b"), "a_b");
/// assert_eq!(sanitize("price-$"), "price__");
/// assert_eq!(sanitize("1st"), "Prop_1st");
/// assert_eq!(sanitize("²nd"), "_nd");
/// ```
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return EMPTY_NAME.to_string();
    }

    let replaced = raw.replace(NBSP_ENTITY, "_");
    let mut result = String::with_capacity(replaced.len());
    let mut in_whitespace = false;

    for c in replaced.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                result.push('_');
            }
            in_whitespace = true;
            continue;
        }

        in_whitespace = false;
        result.push(if is_identifier_char(c) { c } else { '_' });
    }

    if result.chars().next().is_some_and(|c| !is_identifier_start(c)) {
        result.insert_str(0, NUMERIC_PREFIX);
    }

    result
}

/// Upper-case the first character when `enabled`. Nothing else changes.
///
/// A character whose upper case is more than one character, like `ß` or
/// `ΐ`, is kept as is.
///
/// # Examples
///
/// ```
/// use classforge_codegen::naming::apply_naming_convention;
///
/// assert_eq!(apply_naming_convention("user_name", true), "User_name");
/// assert_eq!(apply_naming_convention("userName", false), "userName");
/// ```
pub fn apply_naming_convention(name: &str, enabled: bool) -> String {
    if !enabled {
        return name.to_string();
    }

    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut upper = first.to_uppercase();
            let first = match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => first,
            };
            std::iter::once(first).chain(chars).collect()
        }
    }
}

/// Element class name for an array property.
///
/// Drops one trailing `s`; otherwise appends [`ITEM_SUFFIX`]. A name that
/// is exactly `s` keeps it and gets the suffix, so the result is never empty.
pub fn singularize(name: &str) -> String {
    match name.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{name}{ITEM_SUFFIX}"),
    }
}

/// Prefix reserved keywords with `@` so they can be used as identifiers.
pub fn escape_keyword(name: &str) -> Cow<'_, str> {
    if is_keyword(name) {
        Cow::Owned(format!("@{name}"))
    } else {
        Cow::Borrowed(name)
    }
}

#[cfg(test)]
#[path = "naming/naming_tests.rs"]
mod naming_tests;
