/**
 * Expression Parser Module
 *
 * Lexer, parser and serializer for binding expressions.
 */
pub mod ast;
pub mod lexer;
pub mod parser;
pub mod serializer;

pub use ast::*;
pub use lexer::Lexer;
pub use parser::{ExpressionError, ParseFlags, Parser};
pub use serializer::serialize;
