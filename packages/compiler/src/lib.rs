#![deny(clippy::all)]

//! View Compiler
//!
//! Ahead-of-time compiler from declarative templates to statically resolved
//! view descriptors.

// Core modules
pub mod chars;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod parse_util;
pub mod util;

// Parser modules
pub mod expression_parser;
pub mod ml_parser;

// Compilation modules
pub mod binding;
pub mod codegen;
pub mod metadata;
pub mod output;

// Reference runtime
pub mod runtime;

// Re-exports
pub use compiler::{compile, compile_batch, CompilationUnit};
pub use config::{CompilationMode, CompilerConfig};
pub use diagnostics::{format_diagnostics, Diagnostic, DiagnosticKind};
pub use error::{CompilerError, Result};
pub use codegen::ViewDescriptor;
