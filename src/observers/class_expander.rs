//! Built-in observer that expands class definitions.

use tracing::{debug, trace, warn};

use crate::ast_engine::{Cursor, CursorKind};
use crate::observers::{CursorObserver, Observer, ProcessKinds};
use crate::types::{Class, Definition, Field};

/// Turns `class` cursors into [`Class`] definitions.
///
/// Direct data members become fields; static members, methods, nested
/// types and their members do not. Forward declarations are skipped.
/// `struct` and `union` definitions are not expanded.
///
/// Only fields at nesting level 0 of the child walk are taken, unlike a
/// depth-agnostic walk that would also collect the fields of nested records.
#[derive(Debug, Default)]
pub struct ClassExpander;

impl ClassExpander {
    pub fn new() -> Self {
        Self
    }

    fn expand(cursor: &Cursor<'_>) -> Class {
        let mut class = Class::from_cursor(cursor);

        for (child, level) in cursor.parser().emit_child_cursors(cursor) {
            if level != 0 || child.kind() != CursorKind::FieldDecl {
                continue;
            }

            let field = Field::from_cursor(&child);
            if let Some(previous) = class.insert_field(field) {
                warn!(
                    class = %class.usr(),
                    field = %previous.name(),
                    previous = %previous.start_location(),
                    "Duplicate field name, keeping the last declaration"
                );
            }
        }

        class
    }
}

impl CursorObserver for ClassExpander {
    fn process_kinds(&self) -> ProcessKinds {
        ProcessKinds::Only(&[CursorKind::ClassDecl])
    }

    fn process_cursor(&mut self, cursor: &Cursor<'_>) -> anyhow::Result<()> {
        if !cursor.is_definition() {
            trace!(usr = %cursor.usr(), "Skipping class declaration without a body");
            return Ok(());
        }

        let class = Self::expand(cursor);
        debug!(
            usr = %class.usr(),
            fields = class.fields().len(),
            location = %class.start_location(),
            "Expanded class definition"
        );

        cursor
            .parser()
            .notify_definition_observers(&Definition::Class(class))?;
        Ok(())
    }
}

impl Observer for ClassExpander {
    fn as_cursor_observer(&mut self) -> Option<&mut dyn CursorObserver> {
        Some(self)
    }
}
