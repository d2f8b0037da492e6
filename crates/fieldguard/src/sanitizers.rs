//! Built-in sanitizers
//!
//! Each constructor returns a [`Sanitizer`]. Sanitizers compose strictly left
//! to right: each one sees only the previous one's output.

use crate::config::Locale;
use crate::error::RuleError;
use crate::html::{EntityEncoder, HtmlCleaner, HtmlEncoder, StripAllTags};
use crate::rules::{sanitizer_fn, Sanitizer};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// Pattern to match runs of whitespace
    static ref MULTI_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    /// SQL/script keywords, matched case-insensitively anywhere in the text
    static ref SQL_KEYWORDS: Regex = Regex::new(
        r"(?i)SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|EXECUTE|EXEC|UNION|JAVASCRIPT|SCRIPT|ONERROR|ONLOAD"
    ).unwrap();

    /// `-- line` and `/* block */` SQL comments
    static ref SQL_COMMENTS: Regex = Regex::new(r"(?s)/\*.*?\*/|--[^\r\n]*").unwrap();

    /// ASCII control characters other than `\t`, `\n` and `\r`
    static ref CONTROL_CHARS: Regex = Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").unwrap();
}

/// Strip leading and trailing whitespace
pub fn trim() -> impl Sanitizer {
    sanitizer_fn(|value: &str| value.trim().to_string())
}

pub fn to_lower_case() -> impl Sanitizer {
    to_lower_case_in(Locale::Root)
}

pub fn to_upper_case() -> impl Sanitizer {
    to_upper_case_in(Locale::Root)
}

pub fn to_lower_case_in(locale: Locale) -> impl Sanitizer {
    sanitizer_fn(move |value: &str| locale.to_lowercase(value))
}

pub fn to_upper_case_in(locale: Locale) -> impl Sanitizer {
    sanitizer_fn(move |value: &str| locale.to_uppercase(value))
}

/// Strip all markup with the default [`StripAllTags`] cleaner
pub fn remove_html() -> impl Sanitizer {
    remove_html_with(StripAllTags)
}

pub fn remove_html_with<C: HtmlCleaner>(cleaner: C) -> impl Sanitizer {
    sanitizer_fn(move |value: &str| cleaner.clean(value))
}

/// Encode for any HTML context
pub fn escape_html() -> impl Sanitizer {
    escape_html_with(EntityEncoder)
}

pub fn escape_html_with<E: HtmlEncoder>(encoder: E) -> impl Sanitizer {
    sanitizer_fn(move |value: &str| encoder.encode_for_html(value))
}

/// Encode for HTML element content
pub fn escape_xss() -> impl Sanitizer {
    escape_xss_with(EntityEncoder)
}

pub fn escape_xss_with<E: HtmlEncoder>(encoder: E) -> impl Sanitizer {
    sanitizer_fn(move |value: &str| encoder.encode_for_html_content(value))
}

/// Delete ASCII control characters, keeping `\r`, `\n` and `\t`
pub fn remove_non_printable() -> impl Sanitizer {
    sanitizer_fn(|value: &str| CONTROL_CHARS.replace_all(value, "").into_owned())
}

pub fn remove_non_alphanumeric() -> impl Sanitizer {
    sanitizer_fn(|value: &str| value.chars().filter(char::is_ascii_alphanumeric).collect())
}

pub fn remove_non_numeric() -> impl Sanitizer {
    sanitizer_fn(|value: &str| value.chars().filter(char::is_ascii_digit).collect())
}

pub fn remove_non_alpha() -> impl Sanitizer {
    sanitizer_fn(|value: &str| value.chars().filter(char::is_ascii_alphabetic).collect())
}

/// Collapse whitespace runs to a single space, then trim
pub fn normalize_whitespace() -> impl Sanitizer {
    sanitizer_fn(|value: &str| MULTI_WHITESPACE.replace_all(value.trim(), " ").into_owned())
}

/// Truncate to the first `max` characters
pub fn max_length(max: usize) -> impl Sanitizer {
    sanitizer_fn(move |value: &str| value.chars().take(max).collect())
}

/// Delete every match of `regex`
pub fn remove_pattern(regex: &str) -> Result<impl Sanitizer, RuleError> {
    replace_pattern(regex, "")
}

/// Replace every match of `regex`; `$1` / `${name}` refer to capture groups
pub fn replace_pattern(
    regex: &str,
    replacement: impl Into<String>,
) -> Result<impl Sanitizer, RuleError> {
    let regex = Regex::new(regex)?;
    let replacement = replacement.into();
    Ok(sanitizer_fn(move |value: &str| {
        regex.replace_all(value, replacement.as_str()).into_owned()
    }))
}

/// Remove SQL/script keywords wherever they occur, ignoring case
pub fn strip_sql_keywords() -> impl Sanitizer {
    sanitizer_fn(|value: &str| SQL_KEYWORDS.replace_all(value, "").into_owned())
}

/// Remove `--` line comments and `/* */` block comments
pub fn strip_sql_comments() -> impl Sanitizer {
    sanitizer_fn(|value: &str| SQL_COMMENTS.replace_all(value, "").into_owned())
}

/// Keep only characters that appear in `allowed`
pub fn allow_only(allowed: &str) -> impl Sanitizer {
    let allowed: HashSet<char> = allowed.chars().collect();
    sanitizer_fn(move |value: &str| value.chars().filter(|c| allowed.contains(c)).collect())
}

/// Remove every character that appears in `denied`
pub fn deny(denied: &str) -> impl Sanitizer {
    let denied: HashSet<char> = denied.chars().collect();
    sanitizer_fn(move |value: &str| value.chars().filter(|c| !denied.contains(c)).collect())
}
