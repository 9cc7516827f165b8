//! Retrieval paths.
//!
//! Each path turns one query shape into an ordered candidate id list,
//! bounded by the resolver's fetch ceiling. Paths never paginate or
//! filter beyond their own predicate; that is the resolver's job.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::core::types::{ItemId, SearchQuery, TagOperator, UserContext};
use crate::fulltext::{FullTextError, FullTextProvider, FullTextRequest};
use crate::store::{MetadataStore, StoreError};
use crate::tags::{TagError, TagIndex};

/// Faults a retrieval path can raise.
#[derive(Error, Debug)]
pub enum PathError {
    #[error(transparent)]
    FullText(#[from] FullTextError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Tags(#[from] TagError),
}

pub type Result<T> = std::result::Result<T, PathError>;

/// Ranking metadata carried over from a content-index hit.
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    pub score: Option<f32>,
    pub excerpt: Option<String>,
}

/// Ordered candidate ids plus any per-item annotations.
#[derive(Debug, Default)]
pub struct Candidates {
    pub ids: Vec<ItemId>,
    pub annotations: HashMap<ItemId, Annotation>,
}

impl Candidates {
    fn from_ids(ids: Vec<ItemId>) -> Self {
        Self {
            ids,
            annotations: HashMap::new(),
        }
    }
}

/// A strategy for producing candidates for one query shape.
#[async_trait]
pub trait RetrievalPath: Send + Sync {
    async fn candidates(
        &self,
        user: &UserContext,
        query: &SearchQuery,
        ceiling: usize,
    ) -> Result<Candidates>;
}

/// Content-index retrieval on the filename term, optionally embedding
/// tag names as ranking hints.
pub struct FullTextPath {
    provider: Arc<dyn FullTextProvider>,
    with_tag_hints: bool,
}

impl FullTextPath {
    pub fn new(provider: Arc<dyn FullTextProvider>, with_tag_hints: bool) -> Self {
        Self {
            provider,
            with_tag_hints,
        }
    }
}

#[async_trait]
impl RetrievalPath for FullTextPath {
    async fn candidates(
        &self,
        user: &UserContext,
        query: &SearchQuery,
        ceiling: usize,
    ) -> Result<Candidates> {
        let request = FullTextRequest {
            term: query.filename.clone(),
            tag_hints: if self.with_tag_hints {
                query.tags.clone()
            } else {
                Vec::new()
            },
            limit: ceiling,
            offset: 0,
        };

        let hits = self.provider.search(user, &request).await?;
        if hits.is_empty() {
            // Distinguishable from a provider fault so the resolver can
            // record the fallback the same way for both.
            return Err(PathError::FullText(FullTextError::Provider(
                "no content-index hits".to_string(),
            )));
        }

        let mut candidates = Candidates::default();
        for hit in hits {
            candidates.ids.push(hit.item);
            candidates.annotations.insert(
                hit.item,
                Annotation {
                    score: hit.score,
                    excerpt: hit.excerpt,
                },
            );
        }
        Ok(candidates)
    }
}

/// Filename substring scan against the metadata store.
pub struct NameScanPath {
    store: Arc<dyn MetadataStore>,
}

impl NameScanPath {
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RetrievalPath for NameScanPath {
    async fn candidates(
        &self,
        user: &UserContext,
        query: &SearchQuery,
        ceiling: usize,
    ) -> Result<Candidates> {
        let ids = self
            .store
            .by_name_substring(user, &query.filename, ceiling, 0)
            .await?;
        Ok(Candidates::from_ids(ids))
    }
}

/// Mime-pattern scan for a file-type category.
pub struct TypeScanPath {
    store: Arc<dyn MetadataStore>,
}

impl TypeScanPath {
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RetrievalPath for TypeScanPath {
    async fn candidates(
        &self,
        user: &UserContext,
        query: &SearchQuery,
        ceiling: usize,
    ) -> Result<Candidates> {
        let ids = self
            .store
            .by_mime_patterns(user, query.file_type.mime_patterns(), ceiling, 0)
            .await?;
        Ok(Candidates::from_ids(ids))
    }
}

/// Recency listing for queries with no criteria at all.
pub struct RecencyScanPath {
    store: Arc<dyn MetadataStore>,
}

impl RecencyScanPath {
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RetrievalPath for RecencyScanPath {
    async fn candidates(
        &self,
        user: &UserContext,
        query: &SearchQuery,
        ceiling: usize,
    ) -> Result<Candidates> {
        let _ = query;
        let ids = self.store.recent(user, ceiling, 0).await?;
        Ok(Candidates::from_ids(ids))
    }
}

/// Tag-only retrieval through the tag index.
pub struct TagLookupPath {
    tags: Arc<dyn TagIndex>,
}

impl TagLookupPath {
    pub fn new(tags: Arc<dyn TagIndex>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl RetrievalPath for TagLookupPath {
    async fn candidates(
        &self,
        user: &UserContext,
        query: &SearchQuery,
        _ceiling: usize,
    ) -> Result<Candidates> {
        let _ = user;
        let mut tag_ids = Vec::with_capacity(query.tags.len());
        for name in &query.tags {
            match self.tags.resolve_tag_id(name).await? {
                Some(id) => tag_ids.push(id),
                None => {
                    // An unknown tag under AND can never be satisfied;
                    // under OR it simply contributes nothing.
                    if query.tag_operator == TagOperator::And {
                        debug!(tag = %name, "unknown tag short-circuits AND query");
                        return Ok(Candidates::default());
                    }
                    debug!(tag = %name, "skipping unknown tag in OR query");
                }
            }
        }

        if tag_ids.is_empty() {
            return Ok(Candidates::default());
        }

        let ids = self.tags.ids_for_tags(&tag_ids, query.tag_operator).await?;
        Ok(Candidates::from_ids(ids))
    }
}
