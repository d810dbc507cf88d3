//! Error types for corefmd-core.

use thiserror::Error;

/// Result type for corefmd-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for corefmd-core operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (bracketed trees, annotation records).
    #[error("Parse error: {0}")]
    Parse(String),

    /// A sentence lacks an annotation layer the pipeline depends on.
    #[error("Missing annotation: sentence {sentence} has no {annotation}")]
    MissingAnnotation {
        /// 0-based sentence position in the document.
        sentence: usize,
        /// Name of the missing layer ("tokens", "parse tree", ...).
        annotation: &'static str,
    },
}

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a missing annotation error.
    #[must_use]
    pub fn missing_annotation(sentence: usize, annotation: &'static str) -> Self {
        Self::MissingAnnotation {
            sentence,
            annotation,
        }
    }
}
