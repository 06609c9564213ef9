//! Observers notified while a translation unit is walked.

mod base;
mod class_expander;
mod collector;
mod dump;

pub use base::{CursorObserver, DefinitionObserver, Observer, ObserverRef, ProcessKinds};
pub use class_expander::ClassExpander;
pub use collector::DefinitionCollector;
pub use dump::CursorDumper;
