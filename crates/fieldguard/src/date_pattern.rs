//! Date patterns
//!
//! `is_date` accepts either a chrono format string (anything containing `%`)
//! or a letter pattern in the `yyyy-MM-dd` style. Letter patterns fix the
//! width of numeric fields (`MM` is exactly two digits, `yyyy` at least
//! four), which chrono's own directives do not enforce, so a translated
//! pattern also carries an anchored regex of the expected shape.

use crate::error::RuleError;
use chrono::NaiveDate;
use regex::Regex;

/// A compiled date pattern
#[derive(Debug, Clone)]
pub struct DatePattern {
    format: String,
    shape: Option<Regex>,
}

impl DatePattern {
    /// Compile `pattern`; `%` formats are used as-is and carry no shape.
    ///
    /// Text between single quotes is literal; `''` is a literal quote.
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        if pattern.contains('%') {
            return Ok(Self {
                format: pattern.to_string(),
                shape: None,
            });
        }

        let chars: Vec<char> = pattern.chars().collect();
        let mut format = String::with_capacity(pattern.len() * 2);
        let mut shape = String::from("^");
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\'' {
                if chars.get(i + 1) == Some(&'\'') {
                    format.push('\'');
                    shape.push('\'');
                    i += 2;
                    continue;
                }
                let end = chars[i + 1..]
                    .iter()
                    .position(|&q| q == '\'')
                    .ok_or_else(|| invalid(pattern, "unterminated quote"))?;
                let literal: String = chars[i + 1..i + 1 + end].iter().collect();
                format.push_str(&literal);
                shape.push_str(&regex::escape(&literal));
                i += end + 2;
                continue;
            }

            if !c.is_ascii_alphabetic() {
                format.push(c);
                shape.push_str(&regex::escape(&c.to_string()));
                i += 1;
                continue;
            }

            let run = chars[i..].iter().take_while(|&&x| x == c).count();
            let (directive, width) = match (c, run) {
                ('y' | 'u', 1) => ("%Y", r"\d+".to_string()),
                ('y' | 'u', 2) => ("%y", r"\d{2}".to_string()),
                ('y' | 'u', n) => ("%Y", format!(r"\d{{{},}}", n)),
                ('M', 1) => ("%m", r"\d{1,2}".to_string()),
                ('M', 2) => ("%m", r"\d{2}".to_string()),
                ('M', 3) => ("%b", r"\p{L}+".to_string()),
                ('M', _) => ("%B", r"\p{L}+".to_string()),
                ('d', 1) => ("%d", r"\d{1,2}".to_string()),
                ('d', 2) => ("%d", r"\d{2}".to_string()),
                ('D', 1) => ("%j", r"\d{1,3}".to_string()),
                ('D', 2) => ("%j", r"\d{2,3}".to_string()),
                ('D', _) => ("%j", r"\d{3}".to_string()),
                ('E', 1..=3) => ("%a", r"\p{L}+".to_string()),
                ('E', _) => ("%A", r"\p{L}+".to_string()),
                ('H', 1) => ("%H", r"\d{1,2}".to_string()),
                ('H', 2) => ("%H", r"\d{2}".to_string()),
                ('h', 1) => ("%I", r"\d{1,2}".to_string()),
                ('h', 2) => ("%I", r"\d{2}".to_string()),
                ('m', 1) => ("%M", r"\d{1,2}".to_string()),
                ('m', 2) => ("%M", r"\d{2}".to_string()),
                ('s', 1) => ("%S", r"\d{1,2}".to_string()),
                ('s', 2) => ("%S", r"\d{2}".to_string()),
                ('a', 1) => ("%p", r"\p{L}+".to_string()),
                _ => {
                    return Err(invalid(
                        pattern,
                        &format!("unsupported pattern letter '{}'", c),
                    ))
                }
            };
            format.push_str(directive);
            shape.push_str(&width);
            i += run;
        }

        shape.push('$');
        Ok(Self {
            format,
            shape: Some(Regex::new(&shape)?),
        })
    }

    /// The chrono format string
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Parse `value` strictly: field widths must match and the date must exist
    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        if let Some(shape) = &self.shape {
            if !shape.is_match(value) {
                return None;
            }
        }
        NaiveDate::parse_from_str(value, &self.format).ok()
    }
}

fn invalid(pattern: &str, reason: &str) -> RuleError {
    RuleError::InvalidDatePattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    }
}
