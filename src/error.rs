//! Domain-specific error types for json-vecsim

use thiserror::Error;

use crate::json::JsonKind;

/// Failures detected while turning JSON into vectors or while combining two vectors.
///
/// The rendered messages are surfaced to query users as-is, so they are fixed strings;
/// the structured fields are for callers that want to match on detail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorError {
    #[error("Invalid JSON Array: an array of numbers were expected")]
    InvalidShape { found: JsonKind },

    #[error("Invalid JSON Array: an array of numbers were expected")]
    InvalidElement { index: usize, found: JsonKind },

    #[error("Invalid vectors: two arrays of the same length were expected")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid vectors: two non-zero length arrays were expected")]
    EmptyVector,
}

impl VectorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VectorError::InvalidShape { .. } => ErrorKind::InvalidShape,
            VectorError::InvalidElement { .. } => ErrorKind::InvalidElement,
            VectorError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            VectorError::EmptyVector => ErrorKind::EmptyVector,
        }
    }
}

/// Coarse classification of every error this crate can surface.
///
/// A null input is not an error: evaluation returns `Ok(None)` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidShape,
    InvalidElement,
    LengthMismatch,
    EmptyVector,
    UpstreamEvaluation,
    InvalidArguments,
}

/// Main error type for function construction and per-row evaluation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },

    #[error(
        "Incorrect parameter count in the call to native function '{function}': expected {expected}, got {actual}"
    )]
    WrongArgumentCount {
        function: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Incorrect argument type to function '{function}': argument {position} is {found}, JSON was expected")]
    IncorrectArgumentType {
        function: &'static str,
        position: usize,
        found: &'static str,
    },

    #[error("{context}: {source}")]
    Vector {
        context: &'static str,
        #[source]
        source: VectorError,
    },

    /// Argument evaluation failed outside this crate; carried through untouched.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownFunction { .. }
            | Error::WrongArgumentCount { .. }
            | Error::IncorrectArgumentType { .. } => ErrorKind::InvalidArguments,
            Error::Vector { source, .. } => source.kind(),
            Error::Upstream(_) => ErrorKind::UpstreamEvaluation,
        }
    }

    /// The underlying vector failure, if this error wraps one.
    pub fn vector_error(&self) -> Option<&VectorError> {
        match self {
            Error::Vector { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for json-vecsim operations
pub type Result<T> = std::result::Result<T, Error>;
