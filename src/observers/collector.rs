//! Definition observer that keeps everything it is given.

use crate::observers::{DefinitionObserver, Observer};
use crate::types::{Class, Definition};

/// Collects definitions in the order they are reported.
#[derive(Debug, Default)]
pub struct DefinitionCollector {
    definitions: Vec<Definition>,
}

impl DefinitionCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Take the collected definitions, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Definition> {
        std::mem::take(&mut self.definitions)
    }
}

impl DefinitionObserver for DefinitionCollector {
    fn process_class_definition(&mut self, class: &Class) -> anyhow::Result<()> {
        self.definitions.push(Definition::Class(class.clone()));
        Ok(())
    }
}

impl Observer for DefinitionCollector {
    fn as_definition_observer(&mut self) -> Option<&mut dyn DefinitionObserver> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast_engine::Parser;
    use crate::types::ParseInput;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_collects_in_report_order() {
        let mut parser = Parser::new();
        let collector = Rc::new(RefCell::new(DefinitionCollector::new()));
        parser.add_observer(collector.clone()).unwrap();

        parser
            .parse(ParseInput::from_reader(
                "class B { int b; };\nclass A { int a; };".as_bytes(),
            ))
            .unwrap();

        let mut collector = collector.borrow_mut();
        let usrs: Vec<_> = collector
            .definitions()
            .iter()
            .map(|d| d.declaration().usr().to_string())
            .collect();
        assert_eq!(usrs, vec!["c:@S@B", "c:@S@A"]);

        let taken = collector.take();
        assert_eq!(taken.len(), 2);
        assert!(collector.is_empty());
    }
}
