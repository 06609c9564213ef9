//! Input sources for a parse.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

/// The source handed to [`Parser::parse`](crate::ast_engine::Parser::parse).
///
/// Exactly one of `filename`, `reader` or `content` must be set. The parser
/// validates this, so the builder accepts any combination.
#[derive(Default)]
pub struct ParseInput {
    /// Path of a file to load source from
    pub filename: Option<PathBuf>,

    /// Stream to load source from
    pub reader: Option<Box<dyn Read>>,

    /// Literal source text (reserved, not yet supported)
    pub content: Option<String>,

    /// Arguments that would be passed to a compiler to build this source
    pub args: Vec<String>,
}

impl ParseInput {
    /// Create an input with no source set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Input loaded from a file path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new().with_filename(path)
    }

    /// Input loaded from a stream.
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Self::new().with_reader(reader)
    }

    pub fn with_filename(mut self, path: impl Into<PathBuf>) -> Self {
        self.filename = Some(path.into());
        self
    }

    pub fn with_reader(mut self, reader: impl Read + 'static) -> Self {
        self.reader = Some(Box::new(reader));
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Number of sources that have been set.
    pub fn source_count(&self) -> usize {
        [
            self.filename.is_some(),
            self.reader.is_some(),
            self.content.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

impl fmt::Debug for ParseInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseInput")
            .field("filename", &self.filename)
            .field("reader", &self.reader.as_ref().map(|_| "<stream>"))
            .field("content", &self.content.as_ref().map(String::len))
            .field("args", &self.args)
            .finish()
    }
}
