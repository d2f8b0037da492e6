//! Built-in validators
//!
//! Every constructor returns a [`Validator`] closed over its parameters. Each
//! failure carries a `code` equal to the rule name (`"isEmail"`,
//! `"minLength"`, ...), a default message and the rejected value.
//!
//! Absent values pass every rule except `not_null`, `not_empty` and
//! `not_blank`; presence is policed only by those three.

use crate::date_pattern::DatePattern;
use crate::error::{RuleError, ValidationError};
use crate::rules::{validator_fn, Validator};
use crate::value::FieldValue;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv6Addr;
use url::Url;

lazy_static! {
    /// Local part of alnum/+/_ segments joined by single dots, then domain
    /// labels without leading or trailing hyphens and a 2+ letter TLD
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9+_]+(\.[A-Za-z0-9+_]+)*@[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$"
    ).unwrap();

    /// Canonical 8-4-4-4-12 grouping
    static ref UUID_REGEX: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    ).unwrap();

    /// Dotted quad, each octet 0-255
    static ref IPV4_REGEX: Regex = Regex::new(
        r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$"
    ).unwrap();

    static ref PHONE_REGEX: Regex = Regex::new(
        r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.()0-9]*[0-9]$"
    ).unwrap();

    static ref ALPHA_REGEX: Regex = Regex::new(r"^[a-zA-Z]+$").unwrap();
    static ref ALPHANUMERIC_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9]+$").unwrap();
    static ref NUMERIC_REGEX: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// Schemes accepted by `is_url`
const URL_SCHEMES: &[&str] = &["http", "https", "ftp", "file", "jar", "mailto"];

fn rejected(field: &str, message: impl Into<String>, code: &str, value: &FieldValue) -> ValidationError {
    ValidationError::new(field, message, code).with_rejected_value(value.clone())
}

/// Text validator: non-text values pass, text failing `is_valid` is rejected
fn text_rule<P>(code: &'static str, message: String, is_valid: P) -> impl Validator
where
    P: Fn(&str) -> bool + Send + Sync,
{
    validator_fn(move |field: &str, value: &FieldValue| match value {
        FieldValue::Text(s) if !is_valid(s) => Some(rejected(field, message.clone(), code, value)),
        _ => None,
    })
}

/// Numeric validator: non-numeric values pass
fn number_rule<P>(code: &'static str, message: String, is_valid: P) -> impl Validator
where
    P: Fn(f64) -> bool + Send + Sync,
{
    validator_fn(move |field: &str, value: &FieldValue| match value.as_f64() {
        Some(n) if !is_valid(n) => Some(rejected(field, message.clone(), code, value)),
        _ => None,
    })
}

fn date_rule<P>(code: &'static str, message: String, is_valid: P) -> impl Validator
where
    P: Fn(NaiveDate) -> bool + Send + Sync,
{
    validator_fn(move |field: &str, value: &FieldValue| match value.as_date() {
        Some(d) if !is_valid(d) => Some(rejected(field, message.clone(), code, value)),
        _ => None,
    })
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Fails when the value is absent
pub fn not_null() -> impl Validator {
    validator_fn(|field: &str, value: &FieldValue| {
        value
            .is_null()
            .then(|| ValidationError::new(field, "must not be null", "notNull"))
    })
}

/// Fails when the value is absent or empty text
pub fn not_empty() -> impl Validator {
    validator_fn(|field: &str, value: &FieldValue| match value {
        FieldValue::Null => Some(ValidationError::new(field, "must not be empty", "notEmpty")),
        FieldValue::Text(s) if s.is_empty() => {
            Some(rejected(field, "must not be empty", "notEmpty", value))
        }
        _ => None,
    })
}

/// Fails when the value is absent, empty, or only whitespace
pub fn not_blank() -> impl Validator {
    validator_fn(|field: &str, value: &FieldValue| match value {
        FieldValue::Null => Some(ValidationError::new(field, "must not be blank", "notBlank")),
        FieldValue::Text(s) if s.trim().is_empty() => {
            Some(rejected(field, "must not be blank", "notBlank", value))
        }
        _ => None,
    })
}

pub fn is_email() -> impl Validator {
    text_rule("isEmail", "must be a valid email".to_string(), |s| {
        EMAIL_REGEX.is_match(s)
    })
}

/// Absolute URL with a scheme from [`URL_SCHEMES`].
///
/// Characters a URI may not contain unescaped are rejected before parsing,
/// since the WHATWG parser would percent-encode them silently.
pub fn is_url() -> impl Validator {
    text_rule("isUrl", "must be a valid URL".to_string(), |s| {
        !s.chars().any(is_illegal_uri_char)
            && Url::parse(s)
                .map(|url| URL_SCHEMES.contains(&url.scheme()))
                .unwrap_or(false)
    })
}

fn is_illegal_uri_char(c: char) -> bool {
    c.is_whitespace() || c.is_control() || "<>\"{}|\\^`".contains(c)
}

pub fn is_uuid() -> impl Validator {
    text_rule("isUuid", "must be a valid UUID".to_string(), |s| {
        UUID_REGEX.is_match(s)
    })
}

/// Strict dotted-quad IPv4, or any IPv6 literal (optionally bracketed or
/// carrying a `%zone` suffix). Host names are never resolved.
pub fn is_ip_address() -> impl Validator {
    text_rule("isIpAddress", "must be a valid IP address".to_string(), |s| {
        IPV4_REGEX.is_match(s) || parse_ipv6(s).is_some()
    })
}

fn parse_ipv6(s: &str) -> Option<Ipv6Addr> {
    let literal = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(s);
    let address = match literal.split_once('%') {
        Some((address, zone)) if !zone.is_empty() => address,
        Some(_) => return None,
        None => literal,
    };
    address.parse().ok()
}

pub fn is_phone_number() -> impl Validator {
    text_rule("isPhoneNumber", "must be a valid phone number".to_string(), |s| {
        PHONE_REGEX.is_match(s)
    })
}

/// Length in characters must be at least `min`
pub fn min_length(min: usize) -> impl Validator {
    text_rule(
        "minLength",
        format!("must be at least {} characters", min),
        move |s| char_len(s) >= min,
    )
}

/// Length in characters must be at most `max`
pub fn max_length(max: usize) -> impl Validator {
    text_rule(
        "maxLength",
        format!("must be at most {} characters", max),
        move |s| char_len(s) <= max,
    )
}

pub fn length(min: usize, max: usize) -> impl Validator {
    text_rule(
        "length",
        format!("must be between {} and {} characters", min, max),
        move |s| (min..=max).contains(&char_len(s)),
    )
}

/// Numeric bound accepted by `min`, `max` and `range`
pub trait Bound: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_bound {
    ($($t:ty),*) => {
        $(impl Bound for $t {
            fn to_f64(self) -> f64 {
                self as f64
            }
        })*
    };
}

impl_bound!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Value must not be below `min`. NaN is never below a bound and passes.
pub fn min(min: impl Bound) -> impl Validator {
    let min = min.to_f64();
    number_rule("min", format!("must be at least {}", min), move |n| {
        n.is_nan() || n >= min
    })
}

/// Value must not be above `max`. NaN passes.
pub fn max(max: impl Bound) -> impl Validator {
    let max = max.to_f64();
    number_rule("max", format!("must be at most {}", max), move |n| {
        n.is_nan() || n <= max
    })
}

/// Inclusive numeric range. NaN passes.
pub fn range(min: impl Bound, max: impl Bound) -> impl Validator {
    let (min, max) = (min.to_f64(), max.to_f64());
    number_rule(
        "range",
        format!("must be between {} and {}", min, max),
        move |n| n.is_nan() || (n >= min && n <= max),
    )
}

/// The whole value must match `regex`.
///
/// The error carries no rejected value.
pub fn pattern(regex: &str) -> Result<impl Validator, RuleError> {
    let anchored = Regex::new(&format!("^(?:{})$", regex))?;
    let message = format!("must match pattern: {}", regex);
    Ok(validator_fn(move |field: &str, value: &FieldValue| match value {
        FieldValue::Text(s) if !anchored.is_match(s) => {
            Some(ValidationError::new(field, message.clone(), "pattern"))
        }
        _ => None,
    }))
}

pub fn is_alpha() -> impl Validator {
    text_rule(
        "isAlpha",
        "must contain only alphabetic characters".to_string(),
        |s| ALPHA_REGEX.is_match(s),
    )
}

pub fn is_alphanumeric() -> impl Validator {
    text_rule(
        "isAlphanumeric",
        "must contain only alphanumeric characters".to_string(),
        |s| ALPHANUMERIC_REGEX.is_match(s),
    )
}

pub fn is_numeric() -> impl Validator {
    text_rule(
        "isNumeric",
        "must contain only numeric characters".to_string(),
        |s| NUMERIC_REGEX.is_match(s),
    )
}

/// Text must parse as a calendar date under `pattern`.
///
/// `pattern` is either a letter pattern (`yyyy-MM-dd`) or a chrono format
/// string (`%Y-%m-%d`).
pub fn is_date(pattern: &str) -> Result<impl Validator, RuleError> {
    let compiled = DatePattern::new(pattern)?;
    Ok(text_rule(
        "isDate",
        format!("must be a valid date in format: {}", pattern),
        move |s| compiled.parse(s).is_some(),
    ))
}

/// Date must be strictly before `reference`
pub fn is_before(reference: NaiveDate) -> impl Validator {
    date_rule(
        "isBefore",
        format!("must be before {}", reference),
        move |d| d < reference,
    )
}

/// Date must be strictly after `reference`
pub fn is_after(reference: NaiveDate) -> impl Validator {
    date_rule(
        "isAfter",
        format!("must be after {}", reference),
        move |d| d > reference,
    )
}

fn describe(values: &[FieldValue]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Value must equal one of `allowed`
pub fn is_in<I, T>(allowed: I) -> impl Validator
where
    I: IntoIterator<Item = T>,
    T: Into<FieldValue>,
{
    let allowed: Vec<FieldValue> = allowed.into_iter().map(Into::into).collect();
    let message = format!("must be one of: {}", describe(&allowed));
    validator_fn(move |field: &str, value: &FieldValue| {
        if value.is_null() || allowed.contains(value) {
            None
        } else {
            Some(rejected(field, message.clone(), "isIn", value))
        }
    })
}

/// Value must not equal any of `disallowed`
pub fn is_not_in<I, T>(disallowed: I) -> impl Validator
where
    I: IntoIterator<Item = T>,
    T: Into<FieldValue>,
{
    let disallowed: Vec<FieldValue> = disallowed.into_iter().map(Into::into).collect();
    let message = format!("must not be one of: {}", describe(&disallowed));
    validator_fn(move |field: &str, value: &FieldValue| {
        if !value.is_null() && disallowed.contains(value) {
            Some(rejected(field, message.clone(), "isNotIn", value))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::from(s)
    }

    fn date(y: i32, m: u32, d: u32) -> FieldValue {
        FieldValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_not_null() {
        let rule = not_null();
        assert!(rule.validate("field", &text("value")).is_none());
        let error = rule.validate("field", &FieldValue::Null).unwrap();
        assert_eq!(error.code(), "notNull");
        assert_eq!(error.message(), "must not be null");
        assert!(error.rejected_value().is_none());
    }

    #[test]
    fn test_not_empty() {
        let rule = not_empty();
        assert!(rule.validate("field", &text("value")).is_none());
        assert!(rule.validate("field", &text(" ")).is_none());
        assert!(rule.validate("field", &text("")).is_some());
        assert!(rule.validate("field", &FieldValue::Null).is_some());
    }

    #[test]
    fn test_not_blank() {
        let rule = not_blank();
        assert!(rule.validate("field", &text("value")).is_none());
        assert!(rule.validate("field", &text("  x ")).is_none());
        assert!(rule.validate("field", &text("   ")).is_some());
        assert!(rule.validate("field", &text("")).is_some());
        assert!(rule.validate("field", &FieldValue::Null).is_some());
    }

    #[test]
    fn test_is_email() {
        let rule = is_email();
        for valid in ["user@example.com", "test.user@domain.co.uk", "a+b@test.com"] {
            assert!(rule.validate("email", &text(valid)).is_none(), "{}", valid);
        }
        for invalid in [
            "invalid",
            "user@",
            "@example.com",
            "user @example.com",
            "user@example..com",
            ".user@example.com",
            "user.@example.com",
            "user@-example.com",
            "user@example.c",
        ] {
            assert!(rule.validate("email", &text(invalid)).is_some(), "{}", invalid);
        }
    }

    #[test]
    fn test_is_url() {
        let rule = is_url();
        for valid in ["http://example.com", "https://test.org", "ftp://files.server.com"] {
            assert!(rule.validate("url", &text(valid)).is_none(), "{}", valid);
        }
        for invalid in [
            "not-a-url",
            "htp://wrong.com",
            "example.com",
            "https://example.com/a b",
            "http://example.com/<x>",
            "http://exa\"mple.com/",
            "http://example.com/{id}",
            "http://example.com/\u{0007}",
        ] {
            assert!(rule.validate("url", &text(invalid)).is_some(), "{}", invalid);
        }
    }

    #[test]
    fn test_is_uuid() {
        let rule = is_uuid();
        assert!(rule
            .validate("id", &text("123e4567-e89b-12d3-a456-426614174000"))
            .is_none());
        assert!(rule.validate("id", &text("not-a-uuid")).is_some());
        assert!(rule.validate("id", &text("123e4567-e89b-12d3-a456")).is_some());
    }

    #[test]
    fn test_is_ip_address() {
        let rule = is_ip_address();
        for valid in [
            "192.168.1.1",
            "0.0.0.0",
            "255.255.255.255",
            "2001:db8::1",
            "::1",
            "fe80::1",
            "fe80::1%eth0",
            "[::1]",
            "2001:0db8:0000:0000:0000:0000:0000:0001",
        ] {
            assert!(rule.validate("ip", &text(valid)).is_none(), "{}", valid);
        }
        for invalid in ["256.1.1.1", "192.168", "not-an-ip", "fe80::1%", "1.2.3.4.5"] {
            assert!(rule.validate("ip", &text(invalid)).is_some(), "{}", invalid);
        }
    }

    #[test]
    fn test_is_phone_number() {
        let rule = is_phone_number();
        for valid in ["1234567890", "+1-234-567-8900", "(123) 456-7890"] {
            assert!(rule.validate("phone", &text(valid)).is_none(), "{}", valid);
        }
        for invalid in ["phone", "123-", "+", "12a34"] {
            assert!(rule.validate("phone", &text(invalid)).is_some(), "{}", invalid);
        }
    }

    #[test]
    fn test_lengths() {
        let rule = min_length(5);
        assert!(rule.validate("field", &text("12345")).is_none());
        assert!(rule.validate("field", &text("1234")).is_some());

        let rule = max_length(5);
        assert!(rule.validate("field", &text("12345")).is_none());
        let error = rule.validate("field", &text("123456")).unwrap();
        assert_eq!(error.message(), "must be at most 5 characters");

        let rule = length(3, 5);
        assert!(rule.validate("field", &text("123")).is_none());
        assert!(rule.validate("field", &text("12345")).is_none());
        assert!(rule.validate("field", &text("12")).is_some());
        assert!(rule.validate("field", &text("123456")).is_some());

        // characters, not bytes
        assert!(max_length(3).validate("field", &text("äöü")).is_none());
    }

    #[test]
    fn test_numeric_bounds() {
        let rule = range(18, 120);
        assert!(rule.validate("age", &FieldValue::Int(18)).is_none());
        assert!(rule.validate("age", &FieldValue::Int(120)).is_none());
        assert!(rule.validate("age", &FieldValue::Int(17)).is_some());
        let error = rule.validate("age", &FieldValue::Int(121)).unwrap();
        assert_eq!(error.code(), "range");
        assert_eq!(error.message(), "must be between 18 and 120");
        assert_eq!(error.rejected_value(), Some(&FieldValue::Int(121)));

        assert!(min(10).validate("f", &FieldValue::Float(9.5)).is_some());
        assert!(min(10).validate("f", &FieldValue::Int(10)).is_none());
        assert!(max(10).validate("f", &FieldValue::Float(10.5)).is_some());
        assert_eq!(
            min(18).validate("f", &FieldValue::Int(15)).unwrap().message(),
            "must be at least 18"
        );

        // NaN is neither below nor above a bound
        assert!(min(0).validate("f", &FieldValue::Float(f64::NAN)).is_none());
        assert!(max(0).validate("f", &FieldValue::Float(f64::NAN)).is_none());
        assert!(range(0, 1).validate("f", &FieldValue::Float(f64::NAN)).is_none());

        let limit: u64 = 10;
        let size: usize = 3;
        let big: i64 = 5_000_000_000;
        assert!(max(limit).validate("f", &FieldValue::Int(11)).is_some());
        assert!(min(size).validate("f", &FieldValue::Int(3)).is_none());
        assert!(range(0i64, big).validate("f", &FieldValue::Int(4_999_999_999)).is_none());
    }

    #[test]
    fn test_pattern() {
        let rule = pattern("[A-Z]{3}").unwrap();
        assert!(rule.validate("field", &text("ABC")).is_none());
        assert!(rule.validate("field", &text("AB")).is_some());
        assert!(rule.validate("field", &text("abc")).is_some());
        let error = rule.validate("field", &text("ABCD")).unwrap();
        assert_eq!(error.message(), "must match pattern: [A-Z]{3}");
        assert!(error.rejected_value().is_none());

        assert!(pattern("(unclosed").is_err());
    }

    #[test]
    fn test_character_classes() {
        assert!(is_alpha().validate("f", &text("abcABC")).is_none());
        assert!(is_alpha().validate("f", &text("abc ")).is_some());
        assert!(is_alphanumeric().validate("f", &text("abc123")).is_none());
        assert!(is_alphanumeric().validate("f", &text("abc-123")).is_some());
        assert!(is_numeric().validate("f", &text("123")).is_none());
        assert!(is_numeric().validate("f", &text("12.3")).is_some());
        assert!(is_numeric().validate("f", &text("")).is_some());
    }

    #[test]
    fn test_is_date() {
        let rule = is_date("yyyy-MM-dd").unwrap();
        assert!(rule.validate("field", &text("2023-12-31")).is_none());
        assert!(rule.validate("field", &text("12/31/2023")).is_some());
        assert!(rule.validate("field", &text("not-a-date")).is_some());
        assert!(rule.validate("field", &text("2023-02-30")).is_some());
        assert!(rule.validate("field", &text("2023-1-5")).is_some());
        assert!(rule.validate("field", &text("23-01-05")).is_some());

        let rule = is_date("%d.%m.%Y").unwrap();
        assert!(rule.validate("field", &text("31.12.2023")).is_none());
    }

    #[test]
    fn test_date_comparisons() {
        let reference = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();

        let before = is_before(reference);
        assert!(before.validate("f", &date(2023, 12, 30)).is_none());
        assert!(before.validate("f", &date(2023, 12, 31)).is_some());
        assert!(before.validate("f", &date(2024, 1, 1)).is_some());

        let after = is_after(reference);
        assert!(after.validate("f", &date(2024, 1, 1)).is_none());
        assert!(after.validate("f", &date(2023, 12, 31)).is_some());
        assert_eq!(
            after.validate("f", &date(2023, 12, 30)).unwrap().message(),
            "must be after 2023-12-31"
        );
    }

    #[test]
    fn test_membership() {
        let rule = is_in(["red", "green", "blue"]);
        assert!(rule.validate("color", &text("red")).is_none());
        let error = rule.validate("color", &text("yellow")).unwrap();
        assert_eq!(error.message(), "must be one of: [red, green, blue]");

        let rule = is_not_in(["admin", "root"]);
        assert!(rule.validate("user", &text("user")).is_none());
        assert!(rule.validate("user", &text("admin")).is_some());
        assert_eq!(
            rule.validate("user", &text("root")).unwrap().code(),
            "isNotIn"
        );
    }

    #[test]
    fn test_absent_values_pass() {
        let null = FieldValue::Null;
        assert!(is_email().validate("f", &null).is_none());
        assert!(min_length(5).validate("f", &null).is_none());
        assert!(min(10).validate("f", &null).is_none());
        assert!(is_in([1, 2]).validate("f", &null).is_none());
        assert!(is_before(NaiveDate::MIN).validate("f", &null).is_none());
    }

    #[test]
    fn test_mismatched_kinds_pass() {
        assert!(min(10).validate("f", &text("5")).is_none());
        assert!(is_email().validate("f", &FieldValue::Int(5)).is_none());
    }
}
