//! Reusable sanitizer chains
//!
//! A [`SanitizerChain`] bundles an ordered list of sanitizers so the same
//! clean-up can run outside a session, or be handed to
//! [`crate::FieldPipeline::sanitize`] as a single rule.
//!
//! ```
//! use fieldguard::SanitizerChain;
//!
//! let slug = SanitizerChain::new()
//!     .trim()
//!     .to_lower_case()
//!     .replace_pattern(r"\s+", "-")
//!     .unwrap()
//!     .allow_only("abcdefghijklmnopqrstuvwxyz0123456789-");
//!
//! assert_eq!(slug.run("  Hello World!  "), "hello-world");
//! ```

use crate::config::Locale;
use crate::error::RuleError;
use crate::rules::Sanitizer;
use crate::sanitizers;

/// Ordered sanitizers applied left to right
#[derive(Default)]
pub struct SanitizerChain {
    rules: Vec<Box<dyn Sanitizer>>,
    locale: Locale,
}

impl SanitizerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locale used by `to_lower_case` / `to_upper_case` added after this call
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Append any sanitizer
    pub fn then<S: Sanitizer + 'static>(mut self, rule: S) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn trim(self) -> Self {
        self.then(sanitizers::trim())
    }

    pub fn to_lower_case(self) -> Self {
        let locale = self.locale;
        self.then(sanitizers::to_lower_case_in(locale))
    }

    pub fn to_upper_case(self) -> Self {
        let locale = self.locale;
        self.then(sanitizers::to_upper_case_in(locale))
    }

    pub fn remove_html(self) -> Self {
        self.then(sanitizers::remove_html())
    }

    pub fn escape_html(self) -> Self {
        self.then(sanitizers::escape_html())
    }

    pub fn escape_xss(self) -> Self {
        self.then(sanitizers::escape_xss())
    }

    pub fn remove_non_printable(self) -> Self {
        self.then(sanitizers::remove_non_printable())
    }

    pub fn remove_non_alphanumeric(self) -> Self {
        self.then(sanitizers::remove_non_alphanumeric())
    }

    pub fn remove_non_numeric(self) -> Self {
        self.then(sanitizers::remove_non_numeric())
    }

    pub fn remove_non_alpha(self) -> Self {
        self.then(sanitizers::remove_non_alpha())
    }

    pub fn normalize_whitespace(self) -> Self {
        self.then(sanitizers::normalize_whitespace())
    }

    pub fn max_length(self, max: usize) -> Self {
        self.then(sanitizers::max_length(max))
    }

    pub fn remove_pattern(self, regex: &str) -> Result<Self, RuleError> {
        Ok(self.then(sanitizers::remove_pattern(regex)?))
    }

    pub fn replace_pattern(self, regex: &str, replacement: &str) -> Result<Self, RuleError> {
        Ok(self.then(sanitizers::replace_pattern(regex, replacement.to_string())?))
    }

    pub fn strip_sql_keywords(self) -> Self {
        self.then(sanitizers::strip_sql_keywords())
    }

    pub fn strip_sql_comments(self) -> Self {
        self.then(sanitizers::strip_sql_comments())
    }

    pub fn allow_only(self, allowed: &str) -> Self {
        self.then(sanitizers::allow_only(allowed))
    }

    pub fn deny(self, denied: &str) -> Self {
        self.then(sanitizers::deny(denied))
    }

    /// Apply every rule in order
    pub fn run(&self, value: &str) -> String {
        let mut value = value.to_string();
        for rule in &self.rules {
            value = rule.sanitize(&value);
        }
        value
    }

    pub fn run_optional(&self, value: Option<&str>) -> Option<String> {
        value.map(|v| self.run(v))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Sanitizer for SanitizerChain {
    fn sanitize(&self, value: &str) -> String {
        self.run(value)
    }
}

impl std::fmt::Debug for SanitizerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanitizerChain")
            .field("rules", &self.rules.len())
            .field("locale", &self.locale)
            .finish()
    }
}
