//! Component Metadata
//!
//! The typed projection of a [`ComponentDecl`](super::ComponentDecl) that the
//! later phases consume. Visibility and closure-ness are plain data here; the
//! validator decides what is allowed.

use serde::{Deserialize, Serialize};

pub use super::decl::{MemberKind, ProviderStrategy, ReturnKind, Visibility};
use crate::parse_util::ParseLocation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    pub kind: MemberKind,
    pub visibility: Visibility,
    pub parameters: Vec<String>,
    pub returns: ReturnKind,
    pub initial: Option<serde_json::Value>,
    /// Declaration order within the component.
    pub index: usize,
}

impl MemberDescriptor {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_method(&self) -> bool {
        self.kind == MemberKind::Method
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// A factory reference as the code generator will see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactoryReference {
    /// A named function reachable without any enclosing scope.
    TopLevel { name: String },
    /// Anything that would capture enclosing variables: inline closures and
    /// functions declared in a nested scope.
    Closure { description: String },
}

impl FactoryReference {
    pub fn is_exportable(&self) -> bool {
        matches!(self, FactoryReference::TopLevel { .. })
    }

    pub fn describe(&self) -> &str {
        match self {
            FactoryReference::TopLevel { name } => name,
            FactoryReference::Closure { description } => description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    pub token: String,
    pub strategy: ProviderStrategy,
    pub class_name: Option<String>,
    pub factory: Option<FactoryReference>,
    pub position: ParseLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMetadata {
    pub name: String,
    pub members: Vec<MemberDescriptor>,
    pub providers: Vec<ProviderMetadata>,
}
