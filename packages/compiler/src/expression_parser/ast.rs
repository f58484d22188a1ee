//! Binding Expression AST
//!
//! Node types for the restricted binding grammar: member reads, calls with
//! static arguments, literal primitives and the `$event` sentinel.

use serde::{Deserialize, Serialize};

use crate::parse_util::ParseSourceSpan;

/// The reserved identifier standing for the triggering runtime event.
pub const EVENT_SENTINEL: &str = "$event";

/// Span relative to the start of the expression text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }
}

/// Visitor pattern for AST traversal
pub trait AstVisitor {
    type Result;

    fn visit_implicit_receiver(&mut self, ast: &ImplicitReceiver) -> Self::Result;
    fn visit_event_sentinel(&mut self, ast: &EventSentinel) -> Self::Result;
    fn visit_property_read(&mut self, ast: &PropertyRead) -> Self::Result;
    fn visit_call(&mut self, ast: &Call) -> Self::Result;
    fn visit_literal_primitive(&mut self, ast: &LiteralPrimitive) -> Self::Result;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AST {
    ImplicitReceiver(ImplicitReceiver),
    EventSentinel(EventSentinel),
    PropertyRead(PropertyRead),
    Call(Call),
    LiteralPrimitive(LiteralPrimitive),
}

impl AST {
    pub fn span(&self) -> ParseSpan {
        match self {
            AST::ImplicitReceiver(n) => n.span,
            AST::EventSentinel(n) => n.span,
            AST::PropertyRead(n) => n.span,
            AST::Call(n) => n.span,
            AST::LiteralPrimitive(n) => n.span,
        }
    }

    pub fn source_span(&self) -> ParseSourceSpan {
        match self {
            AST::ImplicitReceiver(n) => n.source_span,
            AST::EventSentinel(n) => n.source_span,
            AST::PropertyRead(n) => n.source_span,
            AST::Call(n) => n.source_span,
            AST::LiteralPrimitive(n) => n.source_span,
        }
    }

    pub fn visit<V: AstVisitor>(&self, visitor: &mut V) -> V::Result {
        match self {
            AST::ImplicitReceiver(n) => visitor.visit_implicit_receiver(n),
            AST::EventSentinel(n) => visitor.visit_event_sentinel(n),
            AST::PropertyRead(n) => visitor.visit_property_read(n),
            AST::Call(n) => visitor.visit_call(n),
            AST::LiteralPrimitive(n) => visitor.visit_literal_primitive(n),
        }
    }

    /// Root of a member chain: either a component member read off the implicit
    /// receiver, or the event sentinel.
    pub fn head(&self) -> Option<Head<'_>> {
        match self {
            AST::EventSentinel(n) => Some(Head::Sentinel(n)),
            AST::PropertyRead(read) => match read.receiver.as_ref() {
                AST::ImplicitReceiver(_) => Some(Head::Member(read)),
                receiver => receiver.head(),
            },
            AST::Call(call) => call.receiver.head(),
            _ => None,
        }
    }

    /// Dotted names from the head to this node, e.g. `["user", "name"]`.
    pub fn member_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut node = self;
        loop {
            match node {
                AST::PropertyRead(read) => {
                    path.push(read.name.as_str());
                    node = read.receiver.as_ref();
                }
                AST::Call(call) => node = call.receiver.as_ref(),
                AST::EventSentinel(_) => {
                    path.push(EVENT_SENTINEL);
                    break;
                }
                _ => break,
            }
        }
        path.reverse();
        path
    }
}

/// Head of a member chain.
#[derive(Debug, Clone, Copy)]
pub enum Head<'a> {
    Member(&'a PropertyRead),
    Sentinel(&'a EventSentinel),
}

/// Implicit receiver (the component instance)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplicitReceiver {
    pub span: ParseSpan,
    pub source_span: ParseSourceSpan,
}

/// `$event`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSentinel {
    pub span: ParseSpan,
    pub source_span: ParseSourceSpan,
}

/// `receiver.name`; with an implicit receiver this is a bare identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRead {
    pub span: ParseSpan,
    pub source_span: ParseSourceSpan,
    pub name_span: ParseSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
}

impl PropertyRead {
    pub fn is_bare(&self) -> bool {
        matches!(self.receiver.as_ref(), AST::ImplicitReceiver(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub span: ParseSpan,
    pub source_span: ParseSourceSpan,
    pub receiver: Box<AST>,
    pub args: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralPrimitive {
    pub span: ParseSpan,
    pub source_span: ParseSourceSpan,
    pub value: LiteralValue,
}

/// A parsed expression together with the raw text it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ASTWithSource {
    pub ast: AST,
    pub source: String,
    pub source_span: ParseSourceSpan,
}

impl ASTWithSource {
    pub fn new(ast: AST, source: String, source_span: ParseSourceSpan) -> Self {
        ASTWithSource {
            ast,
            source,
            source_span,
        }
    }
}
