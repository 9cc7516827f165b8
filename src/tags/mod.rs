//! Tag index access.
//!
//! The tag store itself (creation, assignment, colors) is an external
//! collaborator; this module only resolves tag names to ids, looks up the
//! items carrying them, and fetches per-item tag lists in batches.

pub mod error;
pub mod filter;

pub use error::{Result, TagError};

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::core::types::{ItemId, TagOperator, TagRecord};

/// Capability interface over the tag store.
///
/// Implementations are injected into the resolver so tests can substitute
/// fixtures and failure cases.
#[async_trait]
pub trait TagIndex: Send + Sync {
    /// Resolve a tag name to its identifier, `None` when no such tag exists.
    async fn resolve_tag_id(&self, name: &str) -> Result<Option<i64>>;

    /// Item ids carrying the given tags.
    ///
    /// [`TagOperator::And`] is a strict intersection: every returned item
    /// carries every requested tag id. [`TagOperator::Or`] is the union,
    /// one lookup per tag. Both return ids in descending modified-time
    /// order; the union is already deduplicated.
    async fn ids_for_tags(&self, tag_ids: &[i64], mode: TagOperator) -> Result<Vec<ItemId>>;

    /// Tags for a batch of items, one round trip for the whole batch.
    /// Items without tags are simply absent from the map.
    async fn tags_for_items(&self, items: &[ItemId]) -> Result<HashMap<ItemId, Vec<TagRecord>>>;

    /// Names of all user-assignable tags, for autocomplete.
    async fn assignable_tags(&self) -> Result<Vec<String>>;
}

/// Tag index backed by the SQLite catalog.
pub struct SqliteTagIndex {
    pool: SqlitePool,
}

impl SqliteTagIndex {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn placeholders(count: usize) -> String {
        let mut s = String::with_capacity(count * 2);
        for i in 0..count {
            if i > 0 {
                s.push(',');
            }
            s.push('?');
        }
        s
    }
}

#[async_trait]
impl TagIndex for SqliteTagIndex {
    async fn resolve_tag_id(&self, name: &str) -> Result<Option<i64>> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM tags WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    async fn ids_for_tags(&self, tag_ids: &[i64], mode: TagOperator) -> Result<Vec<ItemId>> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        match mode {
            TagOperator::And => {
                // Strict intersection: keep items whose distinct matched
                // tag count equals the requested tag count.
                let sql = format!(
                    "SELECT ft.file_id \
                     FROM file_tags ft JOIN files f ON f.id = ft.file_id \
                     WHERE ft.tag_id IN ({}) \
                     GROUP BY ft.file_id \
                     HAVING COUNT(DISTINCT ft.tag_id) = ? \
                     ORDER BY MAX(f.mtime) DESC",
                    Self::placeholders(tag_ids.len())
                );
                let mut query = sqlx::query_scalar::<_, i64>(&sql);
                for id in tag_ids {
                    query = query.bind(id);
                }
                query = query.bind(tag_ids.len() as i64);
                Ok(query.fetch_all(&self.pool).await?)
            }
            TagOperator::Or => {
                // One lookup per tag, then an order-preserving union.
                let mut seen = std::collections::HashSet::new();
                let mut union = Vec::new();
                for tag_id in tag_ids {
                    let ids: Vec<i64> = sqlx::query_scalar(
                        "SELECT ft.file_id \
                         FROM file_tags ft JOIN files f ON f.id = ft.file_id \
                         WHERE ft.tag_id = ? \
                         ORDER BY f.mtime DESC",
                    )
                    .bind(tag_id)
                    .fetch_all(&self.pool)
                    .await?;
                    for id in ids {
                        if seen.insert(id) {
                            union.push(id);
                        }
                    }
                }
                Ok(union)
            }
        }
    }

    async fn tags_for_items(&self, items: &[ItemId]) -> Result<HashMap<ItemId, Vec<TagRecord>>> {
        if items.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT ft.file_id, t.id, t.name, t.assignable, t.color \
             FROM file_tags ft JOIN tags t ON t.id = ft.tag_id \
             WHERE ft.file_id IN ({}) \
             ORDER BY t.name",
            Self::placeholders(items.len())
        );
        let mut query = sqlx::query_as::<_, (i64, i64, String, bool, Option<String>)>(&sql);
        for id in items {
            query = query.bind(id);
        }

        let rows = query.fetch_all(&self.pool).await?;
        let mut map: HashMap<ItemId, Vec<TagRecord>> = HashMap::new();
        for (item_id, tag_id, name, assignable, color) in rows {
            map.entry(item_id).or_default().push(TagRecord {
                id: tag_id,
                name,
                assignable,
                color,
            });
        }
        Ok(map)
    }

    async fn assignable_tags(&self) -> Result<Vec<String>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT name FROM tags WHERE assignable = 1 ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }
}
