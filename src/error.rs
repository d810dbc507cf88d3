//! Error types for corefmd.

use thiserror::Error;

/// Result type for corefmd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for corefmd operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (trees, CoNLL files, word lists).
    #[error("Parse error: {0}")]
    Parse(String),

    /// A sentence lacks an annotation layer the pipeline depends on.
    /// Aborts the whole document.
    #[error("Missing annotation: sentence {sentence} has no {annotation}")]
    MissingAnnotation {
        /// 0-based sentence position in the document.
        sentence: usize,
        /// Name of the missing layer.
        annotation: &'static str,
    },

    /// Unsupported language or mode, bad pattern, bad config file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a missing annotation error.
    pub fn missing_annotation(sentence: usize, annotation: &'static str) -> Self {
        Error::MissingAnnotation {
            sentence,
            annotation,
        }
    }
}

impl From<corefmd_core::Error> for Error {
    fn from(err: corefmd_core::Error) -> Self {
        match err {
            corefmd_core::Error::InvalidInput(msg) => Error::InvalidInput(msg),
            corefmd_core::Error::Io(e) => Error::Io(e),
            corefmd_core::Error::Parse(msg) => Error::Parse(msg),
            corefmd_core::Error::MissingAnnotation {
                sentence,
                annotation,
            } => Error::MissingAnnotation {
                sentence,
                annotation,
            },
            other => Error::InvalidInput(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Config(format!("invalid pattern: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_keep_their_kind() {
        let err: Error = corefmd_core::Error::missing_annotation(3, "parse tree").into();
        assert!(matches!(
            err,
            Error::MissingAnnotation {
                sentence: 3,
                annotation: "parse tree"
            }
        ));
        let err: Error = corefmd_core::Error::parse("bad").into();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_regex_errors_are_config_errors() {
        let err: Error = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
