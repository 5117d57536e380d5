//! Error types for the Scout CLI.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application, including configuration, I/O, LLM, search, and prompt
//! errors.

use thiserror::Error;

/// Unified error type for the Scout CLI.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
///
/// Note the taxonomy split: `Search` errors exist at the search-client
/// layer but are always recovered by the retriever (an empty retrieval is a
/// normal outcome); `Llm` errors from the structured classification and
/// synthesis calls are fatal to the current question and surface here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider errors (including malformed structured output)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Search provider errors
    #[error("Search error: {0}")]
    Search(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
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
