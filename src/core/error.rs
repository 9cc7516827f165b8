//! Top-level fault taxonomy for search resolution.

use thiserror::Error;

use crate::fulltext::FullTextError;
use crate::store::StoreError;
use crate::tags::TagError;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, SearchFault>;

/// Faults a search resolution can surface to its caller.
///
/// Only [`SearchFault::Authentication`] is a hard failure; every other
/// condition the engine encounters is either absorbed (item skipped,
/// provider fallback) or wrapped in [`SearchFault::Execution`] when no
/// degraded answer remains possible.
#[derive(Error, Debug)]
pub enum SearchFault {
    #[error("no authenticated user for this request")]
    Authentication,

    #[error("metadata store fault: {0}")]
    Store(#[from] StoreError),

    #[error("tag index fault: {0}")]
    Tags(#[from] TagError),

    #[error("search execution failed: {0}")]
    Execution(String),
}

impl SearchFault {
    /// Wrap an unexpected retrieval-path fault.
    pub fn execution(err: impl std::fmt::Display) -> Self {
        SearchFault::Execution(err.to_string())
    }
}

impl From<FullTextError> for SearchFault {
    fn from(err: FullTextError) -> Self {
        // A full-text fault only reaches here when fallback was already
        // exhausted; at that point it is an execution fault like any other.
        SearchFault::Execution(err.to_string())
    }
}
