//! Metadata store error types.

use thiserror::Error;

/// Result type for metadata store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Metadata-store-related errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}
