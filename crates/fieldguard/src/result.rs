//! Session outcome

use crate::error::ValidationError;
use crate::report::ValidationReport;
use crate::value::{FieldValue, FromFieldValue};
use serde::Serialize;
use std::collections::HashMap;

/// Errors and final sanitized values produced by one executed session
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    values: HashMap<String, FieldValue>,
}

impl ValidationResult {
    pub(crate) fn new(errors: Vec<ValidationError>, values: HashMap<String, FieldValue>) -> Self {
        Self { errors, values }
    }

    /// True iff no error was recorded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every error in the order it was recorded
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Errors whose field name is exactly `field_name`.
    ///
    /// A cross-field error is filed under the joined name (`"start,end"`), so
    /// it is not returned for either field individually.
    pub fn errors_for_field<'a>(
        &'a self,
        field_name: &'a str,
    ) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors
            .iter()
            .filter(move |error| error.field_name() == field_name)
    }

    pub fn values(&self) -> &HashMap<String, FieldValue> {
        &self.values
    }

    /// Final value for `name`; `None` if no such field was registered
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Typed access to a sanitized value.
    ///
    /// Returns `None` when the field is missing, absent, or holds a
    /// different kind than `T`.
    pub fn get<T: FromFieldValue>(&self, name: &str) -> Option<T> {
        self.value(name).and_then(T::from_field_value)
    }

    /// `"field: message"` pairs joined by `"; "`, empty when valid
    pub fn error_message(&self) -> String {
        self.errors
            .iter()
            .map(|error| format!("{}: {}", error.field_name(), error.message()))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Distinct field names that have at least one error, in first-seen order
    pub fn field_names_with_errors(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for error in &self.errors {
            if !names.contains(&error.field_name()) {
                names.push(error.field_name());
            }
        }
        names
    }

    /// Serializable summary stamped with a timestamp and correlation id
    pub fn report(&self) -> ValidationReport {
        ValidationReport::new(self)
    }
}
