//! HTTP server error types.

use thiserror::Error;

/// Errors raised while bringing up or running the HTTP server.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    BindFailed {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Internal(#[from] std::io::Error),
}
