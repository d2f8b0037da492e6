//! Types that describe their own validation
//!
//! Implement [`Validatable::register`] for a form or request type; the
//! provided methods build a session, register the fields and execute it.

use crate::config::ValidatorConfig;
use crate::error::ValidationFailure;
use crate::result::ValidationResult;
use crate::session::ValidationSession;

/// A type whose fields can be registered with a [`ValidationSession`]
pub trait Validatable {
    /// Register every field, its sanitizers and validators, and any
    /// cross-field errors.
    fn register(&self, session: &mut ValidationSession);

    /// Validate with the default configuration
    fn validate(&self) -> Result<ValidationResult, ValidationFailure> {
        self.validate_with(ValidatorConfig::default())
    }

    fn validate_with(&self, config: ValidatorConfig) -> Result<ValidationResult, ValidationFailure> {
        let mut session = ValidationSession::with_config(config);
        self.register(&mut session);
        session.execute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sanitizers, validators};

    struct Signup {
        username: String,
        age: i64,
    }

    impl Validatable for Signup {
        fn register(&self, session: &mut ValidationSession) {
            session
                .field("username", &self.username)
                .sanitize(sanitizers::trim())
                .validate(validators::min_length(3));
            session.field("age", self.age).validate(validators::min(18));
        }
    }

    #[test]
    fn test_validate_collects_errors() {
        let form = Signup {
            username: " ab ".to_string(),
            age: 16,
        };
        let result = form.validate().unwrap();
        assert_eq!(result.field_names_with_errors(), vec!["username", "age"]);
        assert_eq!(result.get::<String>("username").as_deref(), Some("ab"));
    }

    #[test]
    fn test_validate_with_fail_fast() {
        let form = Signup {
            username: "alice".to_string(),
            age: 16,
        };
        let config = ValidatorConfig::builder().fail_fast(true).build();
        let failure = form.validate_with(config).unwrap_err();
        assert_eq!(failure.result().errors()[0].code(), "min");
    }
}
