//! Syntax tree engine.
//!
//! This module provides:
//! - Tree-sitter front ends for C and C++
//! - A cursor model over the syntax tree with Clang-style kinds and USRs
//! - Declared types with pointer, array and function introspection
//! - Lazy depth-first walks over cursors
//! - The [`Parser`] that dispatches cursors to observers

mod cursor;
mod cursor_type;
mod languages;
mod parser;
mod translation_unit;
mod walker;

pub use cursor::{AccessSpecifier, Cursor};
pub use cursor_type::{CursorType, TypeKind};
pub use languages::{CursorKind, Language};
pub use parser::Parser;
pub use translation_unit::TranslationUnit;
pub use walker::CursorWalk;
