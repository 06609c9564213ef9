//! The parser: walks translation units and notifies observers.
//!
//! Create a [`Parser`], register observers, then parse sources. Cursors
//! from the top-level walk are offered to cursor observers; the built-in
//! observers turn some of them into [`Definition`]s and hand those to
//! definition observers. Everything runs synchronously on the caller's
//! stack and the first observer error aborts the parse.
//!
//! Observer lists are plain vectors. Registration needs `&mut Parser` and
//! parsing borrows it shared, so observers cannot be added or removed while
//! a parse is running.

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io::Read;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::ast_engine::{Cursor, CursorKind, CursorWalk, TranslationUnit};
use crate::error::{Error, Result};
use crate::observers::{ClassExpander, ObserverRef};
use crate::types::{Definition, ParseInput, ParserConfig};

/// Interface for parsing C language files.
pub struct Parser {
    config: ParserConfig,
    cursor_observers: Vec<ObserverRef>,
    definition_observers: Vec<ObserverRef>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Cursor kinds the top-level walk descends into.
    pub const EXPAND_KINDS: &'static [CursorKind] =
        &[CursorKind::TranslationUnit, CursorKind::Namespace];

    /// Create a parser with default configuration and the built-in observers.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with the given configuration and the built-in observers.
    pub fn with_config(config: ParserConfig) -> Self {
        let class_expander: ObserverRef = Rc::new(RefCell::new(ClassExpander::new()));

        Self {
            config,
            cursor_observers: vec![class_expander],
            definition_observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Register an observer.
    ///
    /// The observer is added to the cursor list, the definition list, or
    /// both, depending on which capabilities it exposes. An observer with
    /// neither is rejected.
    pub fn add_observer(&mut self, observer: ObserverRef) -> Result<()> {
        let (is_cursor, is_definition) = {
            let mut inner = observer.try_borrow_mut().map_err(|_| Error::ObserverBusy)?;
            (
                inner.as_cursor_observer().is_some(),
                inner.as_definition_observer().is_some(),
            )
        };

        if !is_cursor && !is_definition {
            return Err(Error::UnrecognizedObserver);
        }

        if is_cursor {
            self.cursor_observers.push(Rc::clone(&observer));
        }
        if is_definition {
            self.definition_observers.push(observer);
        }

        debug!(cursor = is_cursor, definition = is_definition, "Registered observer");
        Ok(())
    }

    /// Remove an observer. Removing one that is not registered does nothing.
    pub fn remove_observer(&mut self, observer: &ObserverRef) {
        self.cursor_observers.retain(|o| !same_observer(o, observer));
        self.definition_observers.retain(|o| !same_observer(o, observer));
    }

    pub fn cursor_observer_count(&self) -> usize {
        self.cursor_observers.len()
    }

    pub fn definition_observer_count(&self) -> usize {
        self.definition_observers.len()
    }

    /// Parse a source and send results to observers.
    ///
    /// Exactly one source must be given. Parsing from literal text is
    /// reserved and rejected.
    pub fn parse(&self, input: ParseInput) -> Result<()> {
        match input.source_count() {
            0 => return Err(Error::NoSource),
            1 => {}
            n => return Err(Error::MultipleSources(n)),
        }

        let ParseInput {
            filename,
            reader,
            content,
            args,
        } = input;

        if content.is_some() {
            return Err(Error::UnsupportedInput("Parsing from strings"));
        }

        let (filename, source) = match (filename, reader) {
            (Some(path), None) => {
                if !path.exists() {
                    return Err(Error::PathNotFound(path));
                }
                let filename = path.display().to_string();
                let source = decode_source(&filename, fs::read(&path)?);
                (filename, source)
            }
            (None, Some(mut reader)) => {
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes)?;
                let filename = self.config.stream_filename.clone();
                let source = decode_source(&filename, bytes);
                (filename, source)
            }
            _ => return Err(Error::NoSource),
        };

        let tu = TranslationUnit::parse(filename, source, args, &self.config)?;
        self.parse_translation_unit(&tu)
    }

    /// Walk an already parsed translation unit and notify observers.
    pub fn parse_translation_unit(&self, tu: &TranslationUnit) -> Result<()> {
        let root = tu.cursor(self);
        if root.kind() != CursorKind::TranslationUnit {
            return Err(Error::FrontEnd {
                filename: tu.filename().to_string(),
                reason: format!("root node is {}", root.node().kind()),
            });
        }

        info!(filename = %tu.filename(), language = %tu.language(), "Parsing translation unit");

        let mut visited = 0usize;
        for (cursor, _level) in self.emit_toplevel_cursors(root) {
            visited += 1;
            self.dispatch_cursor(&cursor)?;
        }

        info!(filename = %tu.filename(), cursors = visited, "Finished translation unit");
        Ok(())
    }

    fn dispatch_cursor(&self, cursor: &Cursor<'_>) -> Result<()> {
        let kind = cursor.kind();

        for observer in &self.cursor_observers {
            let mut observer = observer.try_borrow_mut().map_err(|_| Error::ObserverBusy)?;
            if let Some(observer) = observer.as_cursor_observer() {
                if observer.process_kinds().matches(kind) {
                    observer
                        .process_cursor(cursor)
                        .map_err(Error::from_observer)?;
                }
            }
        }

        Ok(())
    }

    /// Walk `root` and the contents of scope-introducing cursors below it.
    ///
    /// The root is yielded at level 0, followed by its children at the same
    /// level. Only [`Self::EXPAND_KINDS`] are descended into: such a child is
    /// walked as a root of its own one level deeper, so it is yielded at
    /// both levels.
    pub fn emit_toplevel_cursors<'a>(&self, root: Cursor<'a>) -> CursorWalk<'a> {
        CursorWalk::toplevel(root, 0)
    }

    /// Walk every descendant of `cursor`, direct children at level 0.
    pub fn emit_child_cursors<'a>(&self, cursor: &Cursor<'a>) -> CursorWalk<'a> {
        CursorWalk::children(cursor, 0)
    }

    /// Notify definition observers of a finished definition.
    ///
    /// Called by the built-in cursor observers which derive higher-level
    /// objects from the syntax tree.
    pub fn notify_definition_observers(&self, definition: &Definition) -> Result<()> {
        for observer in &self.definition_observers {
            let mut observer = observer.try_borrow_mut().map_err(|_| Error::ObserverBusy)?;
            if let Some(observer) = observer.as_definition_observer() {
                match definition {
                    Definition::Class(class) => observer.process_class_definition(class),
                }
                .map_err(Error::from_observer)?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("config", &self.config)
            .field("cursor_observers", &self.cursor_observers.len())
            .field("definition_observers", &self.definition_observers.len())
            .finish()
    }
}

/// Decode source bytes. Sequences that are not valid UTF-8 (legacy
/// encodings in comments and strings) are replaced, so offsets after the
/// first one may drift from the file's byte offsets.
fn decode_source(filename: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(err) => {
            warn!(
                filename = %filename,
                offset = err.utf8_error().valid_up_to(),
                "Source is not valid UTF-8, replacing invalid bytes"
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

fn same_observer(a: &ObserverRef, b: &ObserverRef) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}
