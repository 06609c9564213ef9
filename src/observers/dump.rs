//! Cursor observer that writes cursor dumps.

use std::io::Write;

use crate::ast_engine::Cursor;
use crate::observers::{CursorObserver, Observer, ProcessKinds};

/// Writes [`Cursor::dump`] output for each cursor it receives, separated by
/// blank lines.
#[derive(Debug)]
pub struct CursorDumper<W: Write> {
    out: W,
    kinds: ProcessKinds,
    dumped: usize,
}

impl<W: Write> CursorDumper<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            kinds: ProcessKinds::All,
            dumped: 0,
        }
    }

    /// Only dump cursors of the given kinds.
    pub fn with_kinds(mut self, kinds: ProcessKinds) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn dumped(&self) -> usize {
        self.dumped
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CursorObserver for CursorDumper<W> {
    fn process_kinds(&self) -> ProcessKinds {
        self.kinds
    }

    fn process_cursor(&mut self, cursor: &Cursor<'_>) -> anyhow::Result<()> {
        if self.dumped > 0 {
            writeln!(self.out)?;
        }
        cursor.dump(&mut self.out)?;
        self.dumped += 1;
        Ok(())
    }
}

impl<W: Write> Observer for CursorDumper<W> {
    fn as_cursor_observer(&mut self) -> Option<&mut dyn CursorObserver> {
        Some(self)
    }
}
