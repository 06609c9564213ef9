//! Configuration types for parsing.

use serde::{Deserialize, Serialize};

use crate::ast_engine::Language;
use crate::DEFAULT_STREAM_FILENAME;

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Language used when neither the front-end arguments nor the file
    /// name decide it
    pub default_language: Language,

    /// Name given to sources read from a stream
    pub stream_filename: String,

    /// Treat syntax errors in the tree as a front-end failure
    pub reject_syntax_errors: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_language: Language::Cpp,
            stream_filename: DEFAULT_STREAM_FILENAME.to_string(),
            reject_syntax_errors: false,
        }
    }
}

impl ParserConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            default_language: std::env::var("CLANALYZE_DEFAULT_LANGUAGE")
                .ok()
                .and_then(|s| Language::from_name(&s))
                .unwrap_or(Language::Cpp),
            stream_filename: std::env::var("CLANALYZE_STREAM_FILENAME")
                .unwrap_or_else(|_| DEFAULT_STREAM_FILENAME.to_string()),
            reject_syntax_errors: std::env::var("CLANALYZE_REJECT_SYNTAX_ERRORS")
                .ok()
                .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Set the default language.
    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    /// Set the stream file name.
    pub fn with_stream_filename(mut self, filename: &str) -> Self {
        self.stream_filename = filename.to_string();
        self
    }

    /// Reject trees containing syntax errors.
    pub fn rejecting_syntax_errors(mut self) -> Self {
        self.reject_syntax_errors = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.default_language, Language::Cpp);
        assert_eq!(config.stream_filename, "INPUT.C");
        assert!(!config.reject_syntax_errors);
    }

    #[test]
    fn test_builders() {
        let config = ParserConfig::default()
            .with_default_language(Language::C)
            .with_stream_filename("stdin.c")
            .rejecting_syntax_errors();

        assert_eq!(config.default_language, Language::C);
        assert_eq!(config.stream_filename, "stdin.c");
        assert!(config.reject_syntax_errors);
    }
}
