//! Tag definitions
//!
//! Only the properties the template parser acts on: void elements never have
//! children or a closing tag.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ]
    .into_iter()
    .collect()
});

pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(tag_name.to_ascii_lowercase().as_str())
}

/// Tag names compare case-insensitively, as in HTML.
pub fn tag_names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
