//! Error types for parsing and observer dispatch.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`Parser::parse`](crate::ast_engine::Parser::parse).
///
/// Every variant aborts the current parse. Nothing is retried and the engine
/// is left ready for the next call.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No sources given to parse()")]
    NoSource,

    #[error("Multiple sources given to parse(): {0}")]
    MultipleSources(usize),

    #[error("Passed filename does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("{0} is not yet supported")]
    UnsupportedInput(&'static str),

    #[error("Front end failed to parse {filename}: {reason}")]
    FrontEnd { filename: String, reason: String },

    #[error("Observer instance is not a recognized type")]
    UnrecognizedObserver,

    #[error("Observer is already handling a notification")]
    ObserverBusy,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Observer(anyhow::Error),
}

impl Error {
    /// Whether the caller broke the input contract of `parse`.
    pub fn is_input_contract(&self) -> bool {
        matches!(
            self,
            Error::NoSource | Error::MultipleSources(_) | Error::PathNotFound(_)
        )
    }

    /// Wrap an observer failure.
    ///
    /// Crate errors raised inside an observer (for example by a nested
    /// notification) come back out as their original variant.
    pub(crate) fn from_observer(err: anyhow::Error) -> Self {
        match err.downcast::<Error>() {
            Ok(inner) => inner,
            Err(err) => Error::Observer(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_contract_classification() {
        assert!(Error::NoSource.is_input_contract());
        assert!(Error::MultipleSources(2).is_input_contract());
        assert!(Error::PathNotFound(PathBuf::from("missing.cpp")).is_input_contract());
        assert!(!Error::UnsupportedInput("Parsing from strings").is_input_contract());
        assert!(!Error::ObserverBusy.is_input_contract());
    }

    #[test]
    fn test_observer_error_unwraps_crate_errors() {
        let nested = anyhow::Error::from(Error::ObserverBusy);
        assert!(matches!(Error::from_observer(nested), Error::ObserverBusy));

        let foreign = anyhow::anyhow!("observer exploded");
        let err = Error::from_observer(foreign);
        assert!(matches!(err, Error::Observer(_)));
        assert_eq!(err.to_string(), "observer exploded");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::PathNotFound(PathBuf::from("nope.cpp")).to_string(),
            "Passed filename does not exist: nope.cpp"
        );
        assert_eq!(
            Error::UnsupportedInput("Parsing from strings").to_string(),
            "Parsing from strings is not yet supported"
        );
    }
}
