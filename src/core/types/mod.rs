//! Core domain types shared across the engine.

pub mod item;
pub mod query;
pub mod result;

pub use item::{ItemId, ItemRecord, DIRECTORY_MIMETYPE};
pub use query::{
    FileTypeCategory, QueryShape, SearchQuery, TagOperator, UserContext, DEFAULT_LIMIT, MAX_LIMIT,
    MIN_LIMIT,
};
pub use result::{ResultEnvelope, ResultRecord, ResultTag, SearchPath, TagRecord};
