//! Tag index error types.

use thiserror::Error;

/// Result type for tag index operations.
pub type Result<T> = std::result::Result<T, TagError>;

/// Tag-index-related errors.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}
