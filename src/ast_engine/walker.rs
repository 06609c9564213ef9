//! Depth-first cursor walks.
//!
//! Both walks are preorder and lazy, yielding `(cursor, level)` pairs. A
//! consumer notices that the children of a cursor are exhausted when the
//! level decreases. Each walk owns its own stack, so walks over different
//! roots never share state and calling a walk again restarts it.
//!
//! The top-level walk treats every scope it expands as a new root: the scope
//! is yielded among its siblings at `level`, then once more at `level + 1`
//! as the root of its own contents.

use std::vec::IntoIter;

use crate::ast_engine::{Cursor, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkMode {
    /// Descend only into [`Parser::EXPAND_KINDS`].
    TopLevel,
    /// Descend into everything.
    Children,
}

/// Lazy iterator over `(cursor, level)` pairs.
pub struct CursorWalk<'a> {
    mode: WalkMode,
    /// Root waiting to be yielded before its children.
    pending: Option<(Cursor<'a>, usize)>,
    stack: Vec<(IntoIter<Cursor<'a>>, usize)>,
}

impl<'a> CursorWalk<'a> {
    /// Yield `root` itself, then its children at the root's level. Each
    /// scope-introducing child is walked the same way one level deeper.
    pub(crate) fn toplevel(root: Cursor<'a>, level: usize) -> Self {
        Self {
            mode: WalkMode::TopLevel,
            pending: Some((root, level)),
            stack: Vec::new(),
        }
    }

    /// Yield every descendant of `root`, its direct children at `level`.
    pub(crate) fn children(root: &Cursor<'a>, level: usize) -> Self {
        Self {
            mode: WalkMode::Children,
            pending: None,
            stack: vec![(root.children().into_iter(), level)],
        }
    }

}

impl<'a> Iterator for CursorWalk<'a> {
    type Item = (Cursor<'a>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((root, level)) = self.pending.take() {
            self.stack.push((root.children().into_iter(), level));
            return Some((root, level));
        }

        loop {
            let (children, level) = self.stack.last_mut()?;
            let level = *level;

            match children.next() {
                Some(child) => {
                    match self.mode {
                        WalkMode::TopLevel => {
                            if Parser::EXPAND_KINDS.contains(&child.kind()) {
                                self.pending = Some((child, level + 1));
                            }
                        }
                        WalkMode::Children => {
                            self.stack.push((child.children().into_iter(), level + 1));
                        }
                    }
                    return Some((child, level));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
