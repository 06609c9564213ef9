//! Translation units produced by the tree-sitter front end.

use std::fmt;

use tracing::{debug, warn};
use tree_sitter::{Node, Tree};

use crate::ast_engine::{Cursor, Language, Parser};
use crate::error::{Error, Result};
use crate::types::ParserConfig;

/// One parsed source file.
///
/// Owns the source text and the syntax tree. Cursors borrow from it, so it
/// must outlive every cursor produced while it is being dispatched.
pub struct TranslationUnit {
    filename: String,
    language: Language,
    source: String,
    args: Vec<String>,
    tree: Tree,
}

impl TranslationUnit {
    /// Parse source text into a translation unit.
    ///
    /// The language comes from `args` (`-x`, `-std=`), then the file name,
    /// then the configured default.
    pub fn parse(
        filename: impl Into<String>,
        source: impl Into<String>,
        args: Vec<String>,
        config: &ParserConfig,
    ) -> Result<Self> {
        let filename = filename.into();
        let source = source.into();
        let language = Language::detect(&filename, &args, config.default_language);

        debug!(filename = %filename, language = %language, args = ?args, "Selected front-end language");

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&language.tree_sitter_language())
            .map_err(|e| Error::FrontEnd {
                filename: filename.clone(),
                reason: e.to_string(),
            })?;

        let tree = parser
            .parse(source.as_bytes(), None)
            .ok_or_else(|| Error::FrontEnd {
                filename: filename.clone(),
                reason: "no syntax tree was produced".to_string(),
            })?;

        let tu = Self {
            filename,
            language,
            source,
            args,
            tree,
        };

        let errors = tu.syntax_errors();
        if let Some(first) = errors.first() {
            if config.reject_syntax_errors {
                return Err(Error::FrontEnd {
                    filename: tu.filename,
                    reason: format!("{} syntax errors, first: {}", errors.len(), first),
                });
            }
            warn!(filename = %tu.filename, errors = errors.len(), first = %first, "Translation unit contains syntax errors");
        }

        Ok(tu)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Front-end arguments the unit was parsed with.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The root cursor, bound to the parser that will dispatch it.
    pub fn cursor<'a>(&'a self, parser: &'a Parser) -> Cursor<'a> {
        Cursor::new(self.root_node(), None, self, parser)
    }

    /// Source text of a node.
    pub(crate) fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    /// Check for parse errors in the tree.
    pub fn syntax_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        fn visit_for_errors(node: Node<'_>, errors: &mut Vec<String>) {
            if node.is_error() || node.is_missing() {
                let pos = node.start_position();
                errors.push(format!(
                    "Parse error at line {}, column {}",
                    pos.row + 1,
                    pos.column + 1
                ));
            }

            if !node.has_error() {
                return;
            }

            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                visit_for_errors(child, errors);
            }
        }

        visit_for_errors(self.root_node(), &mut errors);
        errors
    }
}

impl fmt::Debug for TranslationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationUnit")
            .field("filename", &self.filename)
            .field("language", &self.language)
            .field("args", &self.args)
            .field("bytes", &self.source.len())
            .finish()
    }
}
