//! Observer traits.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast_engine::{Cursor, CursorKind};
use crate::types::Class;

/// Shared handle to a registered observer.
///
/// The parser keeps a clone of the handle in each list the observer belongs
/// to, and the caller keeps its own to read results back after parsing.
pub type ObserverRef = Rc<RefCell<dyn Observer>>;

/// The cursor kinds a [`CursorObserver`] wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessKinds {
    /// Every cursor of the top-level walk.
    All,
    /// Only cursors of these kinds.
    Only(&'static [CursorKind]),
}

impl ProcessKinds {
    pub fn matches(&self, kind: CursorKind) -> bool {
        match self {
            ProcessKinds::All => true,
            ProcessKinds::Only(kinds) => kinds.contains(&kind),
        }
    }
}

/// Anything that can be registered with a [`Parser`](crate::Parser).
///
/// An observer exposes one or both capabilities by overriding the matching
/// accessor. One that exposes neither is rejected at registration.
pub trait Observer {
    fn as_cursor_observer(&mut self) -> Option<&mut dyn CursorObserver> {
        None
    }

    fn as_definition_observer(&mut self) -> Option<&mut dyn DefinitionObserver> {
        None
    }
}

/// Receives raw cursors from the top-level walk.
pub trait CursorObserver {
    /// Restrict the cursors this observer is called for.
    fn process_kinds(&self) -> ProcessKinds {
        ProcessKinds::All
    }

    /// Process one cursor.
    ///
    /// The cursor is only valid for the duration of the call. Returning an
    /// error aborts the parse.
    fn process_cursor(&mut self, cursor: &Cursor<'_>) -> anyhow::Result<()>;
}

/// Receives completed definitions.
pub trait DefinitionObserver {
    /// Called once per class definition, after all of its fields are known.
    fn process_class_definition(&mut self, class: &Class) -> anyhow::Result<()> {
        let _ = class;
        Ok(())
    }
}
