//! ML Parser Module
//!
//! Template markup parsing: `{{ interpolation }}`, `[property]="binding"` and
//! `(event)="handler"` on top of a minimal HTML tree builder.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod tags;
pub mod tokens;

pub use ast::*;
pub use parser::{parse_template, ParseOptions, Parser};
