//! Template AST
//!
//! Ordered tree produced by the template parser. Every binding keeps its raw
//! expression text and source span for error reporting.

use serde::{Deserialize, Serialize};

use crate::expression_parser::ast::ASTWithSource;
use crate::parse_util::{ParseSourceFile, ParseSourceSpan};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Text(Text),
    Interpolation(Interpolation),
    Element(Element),
}

impl Node {
    pub fn source_span(&self) -> &ParseSourceSpan {
        match self {
            Node::Text(n) => &n.source_span,
            Node::Interpolation(n) => &n.source_span,
            Node::Element(n) => &n.source_span,
        }
    }
}

/// Literal text, kept verbatim including whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

/// `{{ expression }}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpolation {
    pub expression: ASTWithSource,
    pub source_span: ParseSourceSpan,
}

/// A plain `name="value"` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
    pub source_span: ParseSourceSpan,
}

/// `(name)="handler"` or `on-name="handler"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBinding {
    pub name: String,
    pub handler: ASTWithSource,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
}

/// `[name]="value"` or `bind-name="value"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyBinding {
    pub name: String,
    pub value: ASTWithSource,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub event_bindings: Vec<EventBinding>,
    pub property_bindings: Vec<PropertyBinding>,
    pub children: Vec<Node>,
    pub source_span: ParseSourceSpan,
    pub start_source_span: ParseSourceSpan,
    pub end_source_span: Option<ParseSourceSpan>,
}

/// A parsed template: root nodes plus the source they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub nodes: Vec<Node>,
    pub file: ParseSourceFile,
}

