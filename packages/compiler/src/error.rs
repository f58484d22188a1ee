//! Compiler errors
//!
//! What a failed compilation unit returns. Parse and metadata failures stop
//! the unit outright; resolution and validation failures arrive together as
//! one ordered diagnostic list.

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::metadata::MetadataError;
use crate::parse_util::{ParseError, ParseLocation};

#[derive(Debug, thiserror::Error)]
pub enum CompilerError {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Metadata(#[from] MetadataError),
    #[error("{component}: {} error(s) in template", diagnostics.len())]
    Diagnostics {
        component: String,
        diagnostics: Vec<Diagnostic>,
    },
}

impl CompilerError {
    /// The failure as user-facing diagnostics, in reporting order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            CompilerError::Parse(err) => vec![Diagnostic::template(
                DiagnosticKind::from(err.kind),
                err.msg.clone(),
                err.span.start,
            )],
            CompilerError::Metadata(err) => vec![Diagnostic::component(
                DiagnosticKind::InvalidComponentDecl,
                err.to_string(),
                ParseLocation::START,
            )],
            CompilerError::Diagnostics { diagnostics, .. } => diagnostics.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompilerError>;
