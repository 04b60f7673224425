//! Error types for webrag.
//!
//! This module defines a unified error enum covering every failure
//! category in the pipeline: bad input, missing credentials, transport
//! failures against external endpoints, empty model results, and an
//! unreachable vector store.

use thiserror::Error;

/// Unified error type for webrag.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller supplied an unusable argument (empty URL, zero chunk size)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No API credential is configured for a model endpoint
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// A network call to an external endpoint failed
    #[error("Transport failure: {0}")]
    Transport(String),

    /// A model or store call succeeded but yielded nothing usable
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// The vector store endpoint is unreachable
    #[error("Vector store unavailable: {0}")]
    StoreUnavailable(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
