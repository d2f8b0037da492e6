//! Validation session
//!
//! A session registers named values, runs each one through its own
//! [`FieldPipeline`], collects cross-field errors, and is consumed by
//! [`ValidationSession::execute`].
//!
//! ```
//! use fieldguard::{sanitizers, validators, ValidationSession};
//!
//! let mut session = ValidationSession::new();
//! session
//!     .field("email", "  USER@Example.com ")
//!     .sanitize(sanitizers::trim())
//!     .lowercase()
//!     .validate(validators::not_blank())
//!     .validate(validators::is_email());
//! session
//!     .field("age", 25)
//!     .validate(validators::range(18, 120));
//!
//! let result = session.execute().unwrap();
//! assert!(result.is_valid());
//! assert_eq!(result.get::<String>("email").as_deref(), Some("user@example.com"));
//! ```

use crate::config::ValidatorConfig;
use crate::error::{ValidationError, ValidationFailure};
use crate::pipeline::FieldPipeline;
use crate::result::ValidationResult;
use crate::value::FieldValue;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Collects field pipelines and cross-field errors until executed
#[derive(Debug, Clone, Default)]
pub struct ValidationSession {
    config: ValidatorConfig,
    fields: Vec<FieldPipeline>,
    cross_field_errors: Vec<ValidationError>,
}

impl ValidationSession {
    /// Session with the default configuration (collect every error)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Register a value and return its pipeline.
    ///
    /// Registering the same name twice creates a second pipeline; the later
    /// one's value wins in the result while both keep their errors.
    pub fn field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> &mut FieldPipeline {
        let name = name.into();
        let value = value.into();
        debug!(field = %name, kind = value.kind(), "registering field");

        let index = self.fields.len();
        self.fields
            .push(FieldPipeline::new(name, value, &self.config));
        &mut self.fields[index]
    }

    /// Record an error from a cross-field rule; `None` is ignored so rule
    /// output can be passed straight through.
    pub fn add_cross_field_error(&mut self, error: impl Into<Option<ValidationError>>) -> &mut Self {
        if let Some(error) = error.into() {
            debug!(field = error.field_name(), code = error.code(), "cross-field error");
            self.cross_field_errors.push(error);
        }
        self
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// True if any field or cross-field rule has failed so far
    pub fn has_errors(&self) -> bool {
        !self.cross_field_errors.is_empty() || self.fields.iter().any(FieldPipeline::has_errors)
    }

    /// Consume the session and build its result.
    ///
    /// Field errors come first in registration order, then cross-field
    /// errors. In fail-fast mode an invalid result is returned as
    /// [`ValidationFailure`] instead.
    pub fn execute(self) -> Result<ValidationResult, ValidationFailure> {
        let field_count = self.fields.len();
        let mut errors = Vec::new();
        let mut values = HashMap::with_capacity(field_count);

        for field in self.fields {
            let (name, value, field_errors) = field.into_parts();
            errors.extend(field_errors);
            values.insert(name, value);
        }
        errors.extend(self.cross_field_errors);

        let result = ValidationResult::new(errors, values);
        debug!(
            fields = field_count,
            errors = result.error_count(),
            "validation session executed"
        );

        if self.config.fail_fast && !result.is_valid() {
            warn!(errors = %result.error_message(), "fail-fast validation failed");
            return Err(ValidationFailure::new(result));
        }

        Ok(result)
    }
}
