//! Logging
//!
//! Level-filtered logger the compilation pipeline reports its progress to.

pub mod console_logger;
pub mod logger;

pub use console_logger::ConsoleLogger;
pub use logger::{LogLevel, Logger, MemoryLogger, NullLogger};
