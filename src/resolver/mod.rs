//! Search resolution.
//!
//! One entry point, [`SearchResolver::resolve`], which:
//! - classifies the normalized query into a shape
//! - attempts full-text retrieval when eligible, falling back to the
//!   metadata store on any provider fault or empty hit set
//! - deduplicates candidates, re-applies tag and type constraints
//!   in-process, paginates, and assembles the uniform envelope

pub mod formatter;
pub mod paths;


use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::core::error::{Result, SearchFault};
use crate::core::types::{
    ItemId, QueryShape, ResultEnvelope, SearchPath, SearchQuery, TagRecord, UserContext,
};
use crate::fulltext::FullTextProvider;
use crate::store::MetadataStore;
use crate::tags::{filter, TagIndex};

use formatter::ResultFormatter;
use paths::{
    Candidates, FullTextPath, NameScanPath, PathError, RecencyScanPath, RetrievalPath,
    TagLookupPath, TypeScanPath,
};

/// Outcome of the full-text attempt for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FullTextState {
    /// Full text was never eligible for this query.
    NotAttempted,
    /// The provider produced the candidate set.
    Succeeded,
    /// The provider was attempted and the request fell back.
    FailedFallback,
}

/// The engine: owns the retrieval collaborators and resolves queries
/// into envelopes.
pub struct SearchResolver {
    store: Arc<dyn MetadataStore>,
    tags: Arc<dyn TagIndex>,
    fulltext: Arc<dyn FullTextProvider>,
    formatter: ResultFormatter,
    fetch_ceiling: usize,
}

impl SearchResolver {
    pub fn new(
        store: Arc<dyn MetadataStore>,
        tags: Arc<dyn TagIndex>,
        fulltext: Arc<dyn FullTextProvider>,
        fetch_ceiling: usize,
    ) -> Self {
        let formatter = ResultFormatter::new(tags.clone());
        Self {
            store,
            tags,
            fulltext,
            formatter,
            fetch_ceiling,
        }
    }

    /// Resolve one query for one user into a result envelope.
    ///
    /// Faults below the store level are absorbed: a full-text failure
    /// falls back, a missing record is skipped, a tag decoration failure
    /// leaves results untagged. Only store and tag index faults on the
    /// final path propagate.
    pub async fn resolve(
        &self,
        user: &UserContext,
        query: SearchQuery,
    ) -> Result<ResultEnvelope> {
        let span = info_span!(
            "search",
            request_id = %Uuid::now_v7(),
            user = %user.user_id,
        );
        self.resolve_inner(user, query).instrument(span).await
    }

    async fn resolve_inner(
        &self,
        user: &UserContext,
        query: SearchQuery,
    ) -> Result<ResultEnvelope> {
        let started = Instant::now();

        // Queries arriving through the library API may have been built by
        // hand; normalize again so the invariants hold unconditionally.
        let query = SearchQuery::normalized(
            &query.filename,
            query.tags,
            query.tag_operator,
            query.file_type,
            query.limit as i64,
            query.offset as i64,
            query.use_full_text,
        );
        let shape = query.shape();

        let mut state = FullTextState::NotAttempted;
        let mut candidates = Candidates::default();

        let fulltext_eligible = matches!(shape, QueryShape::NameAndTags | QueryShape::NameOnly)
            && query.use_full_text
            && self.fulltext.is_available();

        if fulltext_eligible {
            let path = FullTextPath::new(
                self.fulltext.clone(),
                shape == QueryShape::NameAndTags,
            );
            match path.candidates(user, &query, self.fetch_ceiling).await {
                Ok(found) => {
                    state = FullTextState::Succeeded;
                    candidates = found;
                }
                Err(err) => {
                    warn!(error = %err, "full-text retrieval failed, falling back");
                    state = FullTextState::FailedFallback;
                }
            }
        }

        if state != FullTextState::Succeeded {
            let path: Box<dyn RetrievalPath> = match shape {
                QueryShape::NameAndTags | QueryShape::NameOnly => {
                    Box::new(NameScanPath::new(self.store.clone()))
                }
                QueryShape::TagsOnly => Box::new(TagLookupPath::new(self.tags.clone())),
                QueryShape::TypeOnly => Box::new(TypeScanPath::new(self.store.clone())),
                QueryShape::Empty => Box::new(RecencyScanPath::new(self.store.clone())),
            };
            candidates = path
                .candidates(user, &query, self.fetch_ceiling)
                .await
                .map_err(engine_fault)?;
        }

        // Union paths and the provider may repeat an id; keep the first
        // occurrence so path order survives.
        let mut seen = HashSet::with_capacity(candidates.ids.len());
        let deduped: Vec<ItemId> = candidates
            .ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();
        let annotations = candidates.annotations;

        let records = self
            .store
            .fetch_items(user, &deduped)
            .await?
            .into_iter()
            .map(|record| (record.id, record))
            .collect::<HashMap<_, _>>();

        // The tag-only path already enforced tags natively; every other
        // path needs the constraint re-applied here. Same for the type
        // category outside the type-only path.
        let need_tag_filter = query.has_tags() && shape != QueryShape::TagsOnly;
        let need_type_filter = query.file_type.is_set() && shape != QueryShape::TypeOnly;

        let prefetched_tags: Option<HashMap<ItemId, Vec<TagRecord>>> = if need_tag_filter {
            Some(self.tags.tags_for_items(&deduped).await?)
        } else {
            None
        };

        let filtered: Vec<ItemId> = deduped
            .into_iter()
            .filter(|id| {
                let Some(record) = records.get(id) else {
                    debug!(item = id, "candidate without a metadata record skipped");
                    return false;
                };
                if !record.is_file() {
                    return false;
                }
                if need_type_filter && !query.file_type.matches(&record.mimetype) {
                    return false;
                }
                if let Some(map) = &prefetched_tags {
                    let names: HashSet<&str> = map
                        .get(id)
                        .map(|list| list.iter().map(|t| t.name.as_str()).collect())
                        .unwrap_or_default();
                    if !filter::matches(&names, &query.tags, query.tag_operator) {
                        return false;
                    }
                }
                true
            })
            .collect();

        let total = filtered.len();
        let page: &[ItemId] = if query.offset >= total {
            &[]
        } else {
            let end = query.offset.saturating_add(query.limit).min(total);
            &filtered[query.offset..end]
        };

        let items = self
            .formatter
            .format_page(page, &records, prefetched_tags.as_ref(), &annotations)
            .await;

        let envelope = ResultEnvelope {
            success: true,
            items,
            total_count: total,
            limit: query.limit,
            offset: query.offset,
            search_path: match state {
                FullTextState::Succeeded => SearchPath::Fulltext,
                FullTextState::FailedFallback => SearchPath::TraditionalFallback,
                FullTextState::NotAttempted => SearchPath::Traditional,
            },
            full_text_available: self.fulltext.is_available(),
            duration_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            total,
            returned = envelope.items.len(),
            path = envelope.search_path.as_str(),
            "search resolved"
        );
        Ok(envelope)
    }
}

/// Map a traditional-path fault into the engine fault taxonomy. A
/// full-text variant cannot occur on the traditional path; treat it as
/// an execution fault if it ever does.
fn engine_fault(err: PathError) -> SearchFault {
    match err {
        PathError::Store(err) => SearchFault::Store(err),
        PathError::Tags(err) => SearchFault::Tags(err),
        PathError::FullText(err) => SearchFault::execution(err),
    }
}
