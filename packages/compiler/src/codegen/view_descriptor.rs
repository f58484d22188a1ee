//! View Descriptor
//!
//! The generated artifact: one slot per dynamic binding in template order,
//! and the factory table for the component's providers. Immutable once
//! generated.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::binding::{BindingKind, TargetPath};
use crate::config::CompilationMode;
use crate::expression_parser::ast::LiteralValue;
use crate::metadata::ReturnKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDescriptor {
    pub component: String,
    pub mode: CompilationMode,
    /// Identifier the component instance is bound to in the statements.
    pub context_name: String,
    pub slots: Vec<Slot>,
    pub factories: IndexMap<String, FactoryEntry>,
}

impl ViewDescriptor {
    pub fn slots_of_kind(&self, kind: BindingKind) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(move |slot| slot.kind == kind)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub index: usize,
    pub kind: BindingKind,
    pub target: TargetPath,
    /// Declared event name, event slots only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub event_name: Option<String>,
    /// Binding expression as written in the template.
    pub source: String,
    pub op: SlotOp,
    pub statement: String,
}

/// What a slot evaluates against the component instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum SlotOp {
    /// Read a member, then walk `path` off the result.
    Read { member: String, path: Vec<String> },
    /// Call a method with static arguments.
    Invoke {
        method: String,
        args: Vec<ArgOp>,
        returns: ReturnKind,
    },
}

impl SlotOp {
    pub fn member(&self) -> &str {
        match self {
            SlotOp::Read { member, .. } => member,
            SlotOp::Invoke { method, .. } => method,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "arg", rename_all = "camelCase")]
pub enum ArgOp {
    Member { member: String, path: Vec<String> },
    Event { path: Vec<String> },
    Literal { value: LiteralValue },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FactoryKind {
    /// A named top-level function, referenced directly.
    Function { name: String },
    /// A class instantiated by a generated arrow function.
    Class {
        #[serde(rename = "className")]
        class_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryEntry {
    pub token: String,
    #[serde(flatten)]
    pub kind: FactoryKind,
    /// The table entry's value as emitted, e.g. `createLogger` or
    /// `() => new HttpClient()`.
    pub expression: String,
}
