//! Per-field pipeline
//!
//! Rules run eagerly, at the moment they are added: a validator added after a
//! sanitizer sees the sanitized value, and a sanitizer added after a validator
//! does not change that validator's outcome.

use crate::config::{Locale, ValidatorConfig};
use crate::error::ValidationError;
use crate::rules::{Sanitizer, Validator};
use crate::sanitizers;
use crate::value::FieldValue;
use tracing::trace;

/// Accumulated state for one named value
#[derive(Debug, Clone)]
pub struct FieldPipeline {
    name: String,
    value: FieldValue,
    errors: Vec<ValidationError>,
    fail_fast: bool,
    locale: Locale,
}

impl FieldPipeline {
    pub(crate) fn new(name: String, value: FieldValue, config: &ValidatorConfig) -> Self {
        Self {
            name,
            value,
            errors: Vec::new(),
            fail_fast: config.fail_fast,
            locale: config.default_locale,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, after every sanitizer applied so far
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Run `rule` against the current value and record its error, if any.
    ///
    /// In fail-fast mode the rule is skipped once this field has an error.
    pub fn validate<V: Validator>(&mut self, rule: V) -> &mut Self {
        if self.fail_fast && self.has_errors() {
            trace!(field = %self.name, "skipping validator after earlier failure");
            return self;
        }
        if let Some(error) = rule.validate(&self.name, &self.value) {
            trace!(field = %self.name, code = error.code(), "validator failed");
            self.errors.push(error);
        }
        self
    }

    /// Replace the current value with `rule`'s output. Non-text values
    /// (including absent ones) are left untouched.
    pub fn sanitize<S: Sanitizer>(&mut self, rule: S) -> &mut Self {
        if let FieldValue::Text(text) = &self.value {
            self.value = FieldValue::Text(rule.sanitize(text));
        }
        self
    }

    /// Lowercase using the session's configured locale
    pub fn lowercase(&mut self) -> &mut Self {
        let locale = self.locale;
        self.sanitize(sanitizers::to_lower_case_in(locale))
    }

    /// Uppercase using the session's configured locale
    pub fn uppercase(&mut self) -> &mut Self {
        let locale = self.locale;
        self.sanitize(sanitizers::to_upper_case_in(locale))
    }

    pub(crate) fn into_parts(self) -> (String, FieldValue, Vec<ValidationError>) {
        (self.name, self.value, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators;

    fn pipeline(value: impl Into<FieldValue>, fail_fast: bool) -> FieldPipeline {
        let config = ValidatorConfig::builder().fail_fast(fail_fast).build();
        FieldPipeline::new("field".to_string(), value.into(), &config)
    }

    #[test]
    fn test_validator_sees_sanitized_value() {
        let mut field = pipeline("  ab  ", false);
        field
            .validate(validators::max_length(2))
            .sanitize(sanitizers::trim())
            .validate(validators::max_length(2));

        // only the first check saw the padded value
        assert_eq!(field.errors().len(), 1);
        assert_eq!(field.value(), &FieldValue::from("ab"));
    }

    #[test]
    fn test_sanitizers_skip_non_text() {
        let mut field = pipeline(42, false);
        field.sanitize(sanitizers::trim());
        assert_eq!(field.value(), &FieldValue::Int(42));

        let mut field = pipeline(FieldValue::Null, false);
        field.sanitize(sanitizers::trim());
        assert!(field.value().is_null());
    }

    #[test]
    fn test_collects_every_failure() {
        let mut field = pipeline("x", false);
        field
            .validate(validators::min_length(3))
            .validate(validators::is_numeric());
        assert_eq!(field.errors().len(), 2);
    }

    #[test]
    fn test_fail_fast_stops_after_first_failure() {
        let mut field = pipeline("x", true);
        field
            .validate(validators::not_blank())
            .validate(validators::min_length(3))
            .validate(validators::is_numeric());
        assert_eq!(field.errors().len(), 1);
        assert_eq!(field.errors()[0].code(), "minLength");
    }

    #[test]
    fn test_locale_shortcuts() {
        let config = ValidatorConfig::builder()
            .default_locale(Locale::Turkish)
            .build();
        let mut field = FieldPipeline::new("city".to_string(), "DİYARBAKIR".into(), &config);
        field.lowercase();
        assert_eq!(field.value(), &FieldValue::from("diyarbakır"));
        field.uppercase();
        assert_eq!(field.value(), &FieldValue::from("DİYARBAKIR"));
    }
}
