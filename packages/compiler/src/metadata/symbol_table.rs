//! Symbol Table
//!
//! Read-only lookup from member name to its descriptor, built once per
//! component and shared by every binding of that component.

use indexmap::IndexMap;

use super::api::{ComponentMetadata, MemberDescriptor};

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable {
    component: String,
    members: IndexMap<String, MemberDescriptor>,
}

impl SymbolTable {
    /// The loader guarantees member names are unique.
    pub fn build(metadata: &ComponentMetadata) -> Self {
        let members = metadata
            .members
            .iter()
            .map(|member| (member.name.clone(), member.clone()))
            .collect();
        SymbolTable {
            component: metadata.name.clone(),
            members,
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.get(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members.values()
    }
}
