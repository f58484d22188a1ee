//! Output Module
//!
//! The output AST generated code is built from, and the emitter that renders
//! it as JavaScript-shaped text.

pub mod emitter;
pub mod output_ast;

pub use emitter::{emit_expression, emit_statements, EmitterVisitorContext, JsEmitterVisitor};
