//! Result page assembly.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::core::types::{ItemId, ItemRecord, ResultRecord, ResultTag, TagRecord};
use crate::resolver::paths::Annotation;
use crate::tags::TagIndex;

/// Turns a page of candidate ids into wire-ready result records.
pub struct ResultFormatter {
    tags: Arc<dyn TagIndex>,
}

impl ResultFormatter {
    pub fn new(tags: Arc<dyn TagIndex>) -> Self {
        Self { tags }
    }

    /// Assemble records for `page`, in page order.
    ///
    /// Tag decoration is best-effort: when no `prefetched` map is given
    /// and the batched lookup fails, the page is returned with empty tag
    /// lists rather than failing the whole search. Ids with no hydrated
    /// record are skipped.
    pub async fn format_page(
        &self,
        page: &[ItemId],
        records: &HashMap<ItemId, ItemRecord>,
        prefetched: Option<&HashMap<ItemId, Vec<TagRecord>>>,
        annotations: &HashMap<ItemId, Annotation>,
    ) -> Vec<ResultRecord> {
        let fetched;
        let item_tags: &HashMap<ItemId, Vec<TagRecord>> = match prefetched {
            Some(map) => map,
            None => {
                fetched = match self.tags.tags_for_items(page).await {
                    Ok(map) => map,
                    Err(err) => {
                        warn!(error = %err, "tag decoration failed, returning untagged results");
                        HashMap::new()
                    }
                };
                &fetched
            }
        };

        page.iter()
            .filter_map(|id| records.get(id))
            .map(|record| {
                let tags = item_tags
                    .get(&record.id)
                    .map(|list| list.iter().map(ResultTag::from).collect())
                    .unwrap_or_default();
                let annotation = annotations.get(&record.id);
                ResultRecord {
                    id: record.id,
                    name: record.name.clone(),
                    path: record.path.clone(),
                    size: record.size,
                    mtime: record.mtime,
                    mimetype: record.mimetype.clone(),
                    tags,
                    score: annotation.and_then(|a| a.score),
                    excerpt: annotation.and_then(|a| a.excerpt.clone()),
                }
            })
            .collect()
    }
}
