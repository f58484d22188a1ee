//! ML Parser Tokens
//!
//! Offsets are absolute byte offsets into the template source.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrValue {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<name`
    TagOpenStart { name: String, start: usize, end: usize },
    /// `name` or `name="value"` inside an open tag
    Attr {
        name: String,
        start: usize,
        name_end: usize,
        end: usize,
        value: Option<AttrValue>,
    },
    /// `>` or `/>`
    TagOpenEnd { self_closing: bool, end: usize },
    /// `</name>`
    TagClose { name: String, start: usize, end: usize },
    /// Literal text, verbatim
    Text { value: String, start: usize, end: usize },
    /// `{{ expression }}`; `expr_start` is where the inner text begins
    Interpolation {
        expression: String,
        expr_start: usize,
        start: usize,
        end: usize,
    },
}
