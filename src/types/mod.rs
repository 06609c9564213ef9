//! Core types for the analyzer.

mod config;
mod declaration;
mod source;

pub use config::ParserConfig;
pub use declaration::{Class, Declaration, Definition, Field, Fields, SourceLocation};
pub use source::ParseInput;
