//! Component metadata: the declaration surface, its typed projection and the
//! symbol table built from it.

pub mod api;
pub mod decl;
pub mod loader;
pub mod symbol_table;

pub use api::*;
pub use decl::{ComponentDecl, FactoryDecl, MemberDecl, ProviderDecl};
pub use loader::load;
pub use symbol_table::SymbolTable;

/// A declaration that cannot be projected into metadata.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("component {component} declares member `{name}` more than once")]
    DuplicateMember { component: String, name: String },
    #[error("component {component} declares member `{name}`, which is not a valid identifier")]
    InvalidMemberName { component: String, name: String },
    #[error("class provider `{token}` does not name a class")]
    MissingClass { token: String },
    #[error("factory provider `{token}` does not reference a factory")]
    MissingFactory { token: String },
    #[error("invalid component declaration: {0}")]
    Json(#[from] serde_json::Error),
}
