//! clanalyze library
//!
//! Parses C and C++ sources into a cursor model and reports declarations
//! to registered observers. Class definitions are expanded into their
//! data members and delivered as [`Class`] values.
//!
//! ```no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use clanalyze::prelude::*;
//!
//! let mut parser = Parser::new();
//! let collector = Rc::new(RefCell::new(DefinitionCollector::new()));
//! parser.add_observer(collector.clone())?;
//! parser.parse(ParseInput::from_path("shapes.cpp"))?;
//!
//! for definition in collector.borrow().definitions() {
//!     println!("{}", definition.declaration().usr());
//! }
//! # Ok::<(), clanalyze::Error>(())
//! ```

pub mod ast_engine;
pub mod error;
pub mod observers;
pub mod types;

pub use ast_engine::{
    AccessSpecifier, Cursor, CursorKind, CursorType, CursorWalk, Language, Parser, TranslationUnit,
    TypeKind,
};
pub use error::{Error, Result};
pub use observers::{
    ClassExpander, CursorDumper, CursorObserver, DefinitionCollector, DefinitionObserver, Observer,
    ObserverRef, ProcessKinds,
};
pub use types::{Class, Declaration, Definition, Field, Fields, ParseInput, ParserConfig, SourceLocation};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::ast_engine::{Cursor, CursorKind, CursorType, Parser, TypeKind};
    pub use crate::error::{Error, Result};
    pub use crate::observers::*;
    pub use crate::types::*;
}

/// File name reported for sources read from a stream.
pub const DEFAULT_STREAM_FILENAME: &str = "INPUT.C";
