//! Full-text provider error types.

use thiserror::Error;

/// Result type for full-text provider operations.
pub type Result<T> = std::result::Result<T, FullTextError>;

/// Full-text-provider-related errors.
///
/// None of these are fatal to a search; the resolver logs them and falls
/// back to traditional retrieval.
#[derive(Error, Debug)]
pub enum FullTextError {
    #[error("full-text search is not available")]
    Unavailable,

    #[error("full-text provider error: {0}")]
    Provider(String),
}

impl From<reqwest::Error> for FullTextError {
    fn from(err: reqwest::Error) -> Self {
        FullTextError::Provider(err.to_string())
    }
}
