//! HTML collaborators
//!
//! `remove_html`, `escape_html` and `escape_xss` delegate to these traits so a
//! host application can plug in its own HTML cleaner or encoder. The defaults
//! strip every tag and encode the characters that are meaningful in HTML.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Elements whose content is dropped along with the markup. An unclosed
    /// element swallows the rest of the input.
    static ref UNSAFE_ELEMENTS: Vec<Regex> = [
        "script", "style", "iframe", "object", "embed", "noscript", "template", "title",
    ]
    .iter()
    .map(|tag| {
        Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?(?:</{tag}\s*>|\z)")).unwrap()
    })
    .collect();

    /// HTML comments
    static ref COMMENT_PATTERN: Regex = Regex::new(r"(?s)<!--.*?(?:-->|\z)").unwrap();

    /// Opening, closing and self-closing tags, doctype and processing instructions
    static ref TAG_PATTERN: Regex = Regex::new(r"</?[A-Za-z!?][^>]*>").unwrap();
}

/// Removes markup from a string, keeping text content
pub trait HtmlCleaner: Send + Sync {
    fn clean(&self, html: &str) -> String;
}

/// Encodes text for embedding in an HTML document
pub trait HtmlEncoder: Send + Sync {
    /// Encode for any HTML context, including quoted attribute values
    fn encode_for_html(&self, text: &str) -> String;

    /// Encode for element content only
    fn encode_for_html_content(&self, text: &str) -> String;
}

/// Default cleaner: no tag is allowed.
///
/// Passes repeat until the text stops changing, so markup reassembled by an
/// earlier removal is stripped too. Angle brackets left over afterwards are
/// entity-encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripAllTags;

impl StripAllTags {
    /// Remove comments and unsafe elements with their content
    fn strip_unsafe(text: &str) -> String {
        let mut out = COMMENT_PATTERN.replace_all(text, "").into_owned();
        for element in UNSAFE_ELEMENTS.iter() {
            out = element.replace_all(&out, "").into_owned();
        }
        out
    }
}

impl HtmlCleaner for StripAllTags {
    fn clean(&self, html: &str) -> String {
        // every replacement removes a non-empty match, so this terminates
        let mut text = html.to_string();
        loop {
            let stripped = Self::strip_unsafe(&text);
            if stripped != text {
                text = stripped;
                continue;
            }
            let untagged = TAG_PATTERN.replace_all(&text, "").into_owned();
            if untagged == text {
                break;
            }
            text = untagged;
        }
        text.replace('<', "&lt;").replace('>', "&gt;")
    }
}

/// Default encoder using named and numeric character references
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityEncoder;

impl HtmlEncoder for EntityEncoder {
    fn encode_for_html(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#x27;"),
                _ => out.push(c),
            }
        }
        out
    }

    fn encode_for_html_content(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                _ => out.push(c),
            }
        }
        out
    }
}
