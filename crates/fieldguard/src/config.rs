//! Validator configuration
//!
//! Configuration can be built in code, read from `FIELDGUARD_*` environment
//! variables, or loaded from a TOML document:
//!
//! ```toml
//! fail_fast = true
//! message_prefix = "validation.error."
//! default_locale = "tr-TR"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const ENV_FAIL_FAST: &str = "FIELDGUARD_FAIL_FAST";
const ENV_MESSAGE_PREFIX: &str = "FIELDGUARD_MESSAGE_PREFIX";
const ENV_LOCALE: &str = "FIELDGUARD_LOCALE";

/// Locale used for case conversion.
///
/// Only the Turkic languages fold differently from the Unicode defaults
/// (dotted and dotless i), so every other language tag maps to `Root`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    #[default]
    Root,
    Turkish,
    Azerbaijani,
}

impl Locale {
    pub fn to_lowercase(self, value: &str) -> String {
        match self {
            Locale::Root => value.to_lowercase(),
            Locale::Turkish | Locale::Azerbaijani => {
                let mut out = String::with_capacity(value.len());
                let mut chars = value.chars().peekable();
                while let Some(c) = chars.next() {
                    match c {
                        // I followed by a combining dot above is a decomposed İ
                        'I' if chars.peek() == Some(&'\u{0307}') => {
                            chars.next();
                            out.push('i');
                        }
                        'I' => out.push('ı'),
                        'İ' => out.push('i'),
                        _ => out.extend(c.to_lowercase()),
                    }
                }
                out
            }
        }
    }

    pub fn to_uppercase(self, value: &str) -> String {
        match self {
            Locale::Root => value.to_uppercase(),
            Locale::Turkish | Locale::Azerbaijani => {
                let mut out = String::with_capacity(value.len());
                for c in value.chars() {
                    match c {
                        'i' => out.push('İ'),
                        _ => out.extend(c.to_uppercase()),
                    }
                }
                out
            }
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::Root => "root",
            Locale::Turkish => "tr",
            Locale::Azerbaijani => "az",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    /// Parse a language tag such as `"tr-TR"`, `"en_US"` or `"root"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        let language = tag.split(['-', '_']).next().unwrap_or_default();

        if language.len() < 2
            || language.len() > 8
            || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ConfigError::InvalidLocale(s.to_string()));
        }

        Ok(match language {
            "tr" => Locale::Turkish,
            "az" => Locale::Azerbaijani,
            _ => Locale::Root,
        })
    }
}

impl TryFrom<String> for Locale {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag().to_string()
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Skip further validators of a field once it has an error, and make
    /// `execute()` fail when the result is invalid
    pub fail_fast: bool,
    /// Reserved for callers that prefix messages; the core does not read it
    pub message_prefix: String,
    /// Locale for the pipeline's case-conversion shortcuts
    pub default_locale: Locale,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            message_prefix: String::new(),
            default_locale: Locale::Root,
        }
    }
}

impl ValidatorConfig {
    pub fn builder() -> ValidatorConfigBuilder {
        ValidatorConfigBuilder::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            "Validator configuration loaded: fail_fast={}, locale={}",
            config.fail_fast, config.default_locale
        );
        Ok(config)
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_FAIL_FAST) {
            config.fail_fast = parse_bool(ENV_FAIL_FAST, &raw)?;
        }
        if let Some(prefix) = lookup(ENV_MESSAGE_PREFIX) {
            config.message_prefix = prefix;
        }
        if let Some(raw) = lookup(ENV_LOCALE) {
            config.default_locale = raw.parse()?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML document; missing keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        debug!(
            "Validator configuration parsed: fail_fast={}, locale={}",
            config.fail_fast, config.default_locale
        );
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Builder for [`ValidatorConfig`]
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfigBuilder {
    config: ValidatorConfig,
}

impl ValidatorConfigBuilder {
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.config.fail_fast = fail_fast;
        self
    }

    pub fn message_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.message_prefix = prefix.into();
        self
    }

    pub fn default_locale(mut self, locale: Locale) -> Self {
        self.config.default_locale = locale;
        self
    }

    pub fn build(self) -> ValidatorConfig {
        self.config
    }
}
