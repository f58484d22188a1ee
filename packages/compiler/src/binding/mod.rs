//! Binding: links template expressions to component members and checks the
//! static rules over the result.

pub mod bound_ast;
pub mod resolver;
pub mod validator;

pub use bound_ast::*;
pub use resolver::{resolve, resolve_collecting, ResolveError, ResolveErrorKind};
pub use validator::{validate, ValidationError};
