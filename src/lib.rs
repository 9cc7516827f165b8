//! filescout: search resolution over a cloud file catalog.
//!
//! - Query normalization and shape classification (`core`)
//! - Tag index access and in-process tag filtering ([`tags`])
//! - Metadata store scans ([`store`])
//! - Optional external full-text retrieval with fallback ([`fulltext`])
//! - The resolver itself ([`resolver`])
//! - An HTTP surface speaking the camelCase wire envelope ([`server`])

pub mod config;
pub mod core;
pub mod db;
pub mod fulltext;
pub mod logging;
pub mod resolver;
pub mod server;
pub mod store;
pub mod tags;

pub use crate::config::AppConfig;
pub use crate::core::error::{Result, SearchFault};
pub use crate::core::types::{
    FileTypeCategory, ResultEnvelope, ResultRecord, SearchPath, SearchQuery, TagOperator,
    UserContext,
};
pub use crate::resolver::SearchResolver;
