//! Cross-field rules
//!
//! These produce errors the caller records with
//! [`crate::ValidationSession::add_cross_field_error`].

use crate::error::ValidationError;
use chrono::NaiveDate;

/// Require `start` to fall strictly before `end`.
///
/// Passes when either date is absent. The error's field name is both names
/// joined by a comma.
pub fn date_order(
    start_field: &str,
    start: Option<NaiveDate>,
    end_field: &str,
    end: Option<NaiveDate>,
) -> Option<ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start >= end => Some(ValidationError::new(
            format!("{},{}", start_field, end_field),
            format!("{} must be before {}", start_field, end_field),
            "dateOrder",
        )),
        _ => None,
    }
}
