//! Utility Functions
//!
//! Identifier checks and string escaping shared by the metadata loader and
//! the emitter.

use once_cell::sync::Lazy;
use regex::Regex;

static LEGAL_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_$][0-9a-zA-Z_$]*$").expect("valid identifier regex"));

/// Whether `input` can be emitted as a bare identifier.
pub fn is_legal_identifier(input: &str) -> bool {
    LEGAL_IDENTIFIER_RE.is_match(input)
}

/// Quote `input` as a single-quoted string literal.
pub fn escape_string(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len() + 2);
    escaped.push('\'');
    for ch in input.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped.push('\'');
    escaped
}

/// Quote `input` only when it is not a legal identifier (object keys).
pub fn escape_identifier(input: &str) -> String {
    if is_legal_identifier(input) {
        input.to_string()
    } else {
        escape_string(input)
    }
}
