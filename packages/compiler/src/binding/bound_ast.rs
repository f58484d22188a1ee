//! Resolved template
//!
//! Bindings whose expressions have been linked to symbol table entries.
//! Bound expressions borrow their descriptors from the symbol table; both are
//! owned by the compilation unit.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::expression_parser::ast::{LiteralValue, AST};
use crate::metadata::MemberDescriptor;
use crate::parse_util::ParseSourceSpan;

/// The three kinds of dynamic binding. Each becomes one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingKind {
    Event,
    Interpolation,
    Property,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Event => write!(f, "event"),
            BindingKind::Interpolation => write!(f, "interpolation"),
            BindingKind::Property => write!(f, "property"),
        }
    }
}

/// Property written for interpolations.
pub const TEXT_CONTENT: &str = "textContent";

/// Child-index path from the template root to a node, plus the property a
/// slot writes. Event targets have no property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetPath {
    pub nodes: Vec<usize>,
    pub property: Option<String>,
}

impl TargetPath {
    pub fn node(nodes: Vec<usize>) -> Self {
        TargetPath { nodes, property: None }
    }

    pub fn property(nodes: Vec<usize>, property: &str) -> Self {
        TargetPath {
            nodes,
            property: Some(property.to_string()),
        }
    }

    /// The same node without the property part.
    pub fn element(&self) -> TargetPath {
        TargetPath::node(self.nodes.clone())
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<String> = self.nodes.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", nodes.join("."))?;
        if let Some(property) = &self.property {
            write!(f, ":{}", property)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTemplate<'t> {
    pub bindings: Vec<BoundBinding<'t>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundBinding<'t> {
    pub kind: BindingKind,
    pub target: TargetPath,
    /// Declared event name, event bindings only.
    pub event_name: Option<String>,
    pub expression: BoundExpression<'t>,
    pub source_span: ParseSourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundExpression<'t> {
    pub ast: AST,
    pub source: String,
    pub member: &'t MemberDescriptor,
    /// Property path read off the member, e.g. `["name"]` for `user.name`.
    pub path: Vec<String>,
    pub call: Option<BoundCall<'t>>,
    /// Span of the head identifier.
    pub span: ParseSourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundCall<'t> {
    pub args: Vec<BoundArgument<'t>>,
    pub span: ParseSourceSpan,
}

impl<'t> BoundCall<'t> {
    /// Arguments supplied at the call site, the event sentinel included.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundArgument<'t> {
    Member {
        member: &'t MemberDescriptor,
        path: Vec<String>,
        span: ParseSourceSpan,
    },
    Event {
        path: Vec<String>,
    },
    Literal(LiteralValue),
}

impl<'t> BoundExpression<'t> {
    /// Every member referenced by this expression with the span it is
    /// referenced at: the head first, then member arguments.
    pub fn referenced_members(&self) -> Vec<(&'t MemberDescriptor, ParseSourceSpan)> {
        let mut members = vec![(self.member, self.span)];
        if let Some(call) = &self.call {
            for arg in &call.args {
                if let BoundArgument::Member { member, span, .. } = arg {
                    members.push((*member, *span));
                }
            }
        }
        members
    }
}
