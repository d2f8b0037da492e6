//! Field validation and sanitization
//!
//! Register named values with a [`ValidationSession`], chain sanitizers and
//! validators onto each field, then execute the session to get a
//! [`ValidationResult`] holding every error and the final sanitized values.
//!
//! ## Rules
//!
//! - **Sanitizers** ([`sanitizers`]) rewrite text: trim, case folding, HTML
//!   removal and escaping, character filtering, truncation, SQL keyword and
//!   comment stripping.
//! - **Validators** ([`validators`]) report at most one error per check:
//!   presence, format (email, URL, UUID, IP, phone, date), length, numeric
//!   range, regex, allow/deny lists.
//! - **Cross-field rules** ([`cross`]) compare several values and feed
//!   [`ValidationSession::add_cross_field_error`].
//!
//! Rules run in the order they are added. A validator sees the value produced
//! by every sanitizer added before it.
//!
//! ## Usage
//!
//! ```
//! use fieldguard::{sanitizers, validators, ValidationSession, ValidatorConfig};
//!
//! let mut session = ValidationSession::with_config(ValidatorConfig::default());
//! session
//!     .field("username", "  JohnDoe123  ")
//!     .sanitize(sanitizers::trim())
//!     .validate(validators::length(3, 20))
//!     .validate(validators::is_alphanumeric());
//! session
//!     .field("bio", "<script>alert('x')</script>Hi <b>there</b>")
//!     .sanitize(sanitizers::remove_html());
//!
//! let result = session.execute().unwrap();
//! assert!(result.is_valid());
//! assert_eq!(result.get::<String>("username").as_deref(), Some("JohnDoe123"));
//! assert_eq!(result.get::<String>("bio").as_deref(), Some("Hi there"));
//! ```
//!
//! ## Fail-fast
//!
//! With `fail_fast` set, a field stops running validators after its first
//! error and `execute()` returns [`ValidationFailure`] for an invalid result.
//! Without it every error is collected and `execute()` always succeeds.

pub mod chain;
pub mod config;
pub mod cross;
pub mod date_pattern;
pub mod error;
pub mod html;
pub mod pipeline;
pub mod report;
pub mod result;
pub mod rules;
pub mod sanitizers;
pub mod session;
pub mod validatable;
pub mod validators;
pub mod value;

pub use chain::SanitizerChain;
pub use config::{Locale, ValidatorConfig, ValidatorConfigBuilder};
pub use error::{ConfigError, RuleError, ValidationError, ValidationFailure};
pub use html::{EntityEncoder, HtmlCleaner, HtmlEncoder, StripAllTags};
pub use pipeline::FieldPipeline;
pub use report::ValidationReport;
pub use result::ValidationResult;
pub use rules::{sanitizer_fn, validator_fn, Sanitizer, Validator};
pub use session::ValidationSession;
pub use validatable::Validatable;
pub use value::{FieldValue, FromFieldValue};
