//! Serializable summary of a [`ValidationResult`]
//!
//! ```json
//! {
//!   "valid": false,
//!   "message": "Validation failed for 2 fields",
//!   "errors": [
//!     {"field_name": "email", "message": "must be a valid email", "code": "isEmail", "rejected_value": "nope"},
//!     {"field_name": "age", "message": "must be at least 18", "code": "min", "rejected_value": 12}
//!   ],
//!   "values": {"email": "nope", "age": 12},
//!   "timestamp": "2026-02-20T10:30:00Z",
//!   "correlation_id": "uuid-here"
//! }
//! ```

use crate::error::ValidationError;
use crate::result::ValidationResult;
use crate::value::FieldValue;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub message: String,
    pub errors: Vec<ValidationError>,
    pub values: HashMap<String, FieldValue>,
    pub timestamp: String,
    pub correlation_id: String,
}

impl ValidationReport {
    pub fn new(result: &ValidationResult) -> Self {
        let fields = result.field_names_with_errors();
        let message = match fields.as_slice() {
            [] => "Validation passed".to_string(),
            [field] => format!("Validation failed for field '{}'", field),
            _ => format!("Validation failed for {} fields", fields.len()),
        };

        Self {
            valid: result.is_valid(),
            message,
            errors: result.errors().to_vec(),
            values: result.values().clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            correlation_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
