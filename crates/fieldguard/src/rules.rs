//! Rule contracts
//!
//! A [`Sanitizer`] rewrites text; a [`Validator`] inspects a field value and
//! reports at most one error. Built-in rules live in [`crate::sanitizers`] and
//! [`crate::validators`]; custom rules wrap a closure with [`sanitizer_fn`] or
//! [`validator_fn`].

use crate::error::ValidationError;
use crate::value::FieldValue;
use std::sync::Arc;

/// Pure text-to-text transformation applied before validation
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, value: &str) -> String;

    /// Absent input stays absent.
    fn sanitize_optional(&self, value: Option<&str>) -> Option<String> {
        value.map(|v| self.sanitize(v))
    }
}

/// Check producing an optional error for one field.
///
/// Built-in validators other than `not_null`, `not_empty` and `not_blank`
/// treat [`FieldValue::Null`] as passing. A value of a kind the validator
/// does not understand (e.g. text given to `min`) also passes.
pub trait Validator: Send + Sync {
    fn validate(&self, field_name: &str, value: &FieldValue) -> Option<ValidationError>;
}

/// Sanitizer backed by a closure
pub struct SanitizerFn<F>(F);

/// Wrap a closure as a [`Sanitizer`]
pub fn sanitizer_fn<F>(f: F) -> SanitizerFn<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    SanitizerFn(f)
}

impl<F> Sanitizer for SanitizerFn<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn sanitize(&self, value: &str) -> String {
        (self.0)(value)
    }
}

/// Validator backed by a closure
pub struct ValidatorFn<F>(F);

/// Wrap a closure as a [`Validator`]
///
/// ```
/// use fieldguard::{validator_fn, FieldValue, ValidationError};
///
/// let no_admin = validator_fn(|field: &str, value: &FieldValue| {
///     match value.as_text() {
///         Some(s) if s.starts_with("admin") => Some(ValidationError::new(
///             field,
///             "Cannot start with 'admin'",
///             "custom.admin",
///         )),
///         _ => None,
///     }
/// });
/// # let _ = no_admin;
/// ```
pub fn validator_fn<F>(f: F) -> ValidatorFn<F>
where
    F: Fn(&str, &FieldValue) -> Option<ValidationError> + Send + Sync,
{
    ValidatorFn(f)
}

impl<F> Validator for ValidatorFn<F>
where
    F: Fn(&str, &FieldValue) -> Option<ValidationError> + Send + Sync,
{
    fn validate(&self, field_name: &str, value: &FieldValue) -> Option<ValidationError> {
        (self.0)(field_name, value)
    }
}

impl<S: Sanitizer + ?Sized> Sanitizer for &S {
    fn sanitize(&self, value: &str) -> String {
        (**self).sanitize(value)
    }
}

impl<S: Sanitizer + ?Sized> Sanitizer for Box<S> {
    fn sanitize(&self, value: &str) -> String {
        (**self).sanitize(value)
    }
}

impl<S: Sanitizer + ?Sized> Sanitizer for Arc<S> {
    fn sanitize(&self, value: &str) -> String {
        (**self).sanitize(value)
    }
}

impl<V: Validator + ?Sized> Validator for &V {
    fn validate(&self, field_name: &str, value: &FieldValue) -> Option<ValidationError> {
        (**self).validate(field_name, value)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, field_name: &str, value: &FieldValue) -> Option<ValidationError> {
        (**self).validate(field_name, value)
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, field_name: &str, value: &FieldValue) -> Option<ValidationError> {
        (**self).validate(field_name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitizer_fn_keeps_absent_input() {
        let shout = sanitizer_fn(|v: &str| v.to_uppercase());
        assert_eq!(shout.sanitize("hi"), "HI");
        assert_eq!(shout.sanitize_optional(None), None);
        assert_eq!(shout.sanitize_optional(Some("a")), Some("A".to_string()));
    }

    #[test]
    fn test_boxed_and_shared_rules() {
        let rule: Arc<dyn Validator> = Arc::new(validator_fn(|field: &str, value: &FieldValue| {
            value
                .is_null()
                .then(|| ValidationError::new(field, "missing", "custom.missing"))
        }));
        assert!(rule.validate("a", &FieldValue::Null).is_some());
        assert!((&rule).validate("a", &FieldValue::from("x")).is_none());
    }
}
