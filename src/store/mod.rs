//! File metadata store access.
//!
//! Traditional retrieval runs against this store: name substring scans,
//! mime-pattern scans, recency listings, and batched record hydration.
//! All scans are scoped to one user and exclude directories.

pub mod error;

pub use error::{Result, StoreError};

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::core::types::{ItemId, ItemRecord, UserContext};

/// Capability interface over the file metadata catalog.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Ids of files whose name contains `term` (case-insensitive),
    /// newest first.
    async fn by_name_substring(
        &self,
        user: &UserContext,
        term: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ItemId>>;

    /// Ids of files whose mimetype matches any of the SQL LIKE
    /// `patterns`, newest first.
    async fn by_mime_patterns(
        &self,
        user: &UserContext,
        patterns: &[&str],
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ItemId>>;

    /// Most recently modified file ids, newest first.
    async fn recent(&self, user: &UserContext, limit: usize, offset: usize)
        -> Result<Vec<ItemId>>;

    /// Hydrate full records for a batch of ids. Ids the user cannot see
    /// (or that no longer exist) are silently absent from the result.
    async fn fetch_items(&self, user: &UserContext, ids: &[ItemId]) -> Result<Vec<ItemRecord>>;
}

/// Escape LIKE wildcards in user input so a literal `%` or `_` in a
/// search term matches itself.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Metadata store backed by the SQLite catalog.
pub struct SqliteMetadataStore {
    pool: SqlitePool,
}

impl SqliteMetadataStore {
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
impl MetadataStore for SqliteMetadataStore {
    async fn by_name_substring(
        &self,
        user: &UserContext,
        term: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ItemId>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM files \
             WHERE user_id = ? AND is_dir = 0 \
               AND name LIKE '%' || ? || '%' ESCAPE '\\' \
             ORDER BY mtime DESC \
             LIMIT ? OFFSET ?",
        )
        .bind(&user.user_id)
        .bind(escape_like(term))
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn by_mime_patterns(
        &self,
        user: &UserContext,
        patterns: &[&str],
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ItemId>> {
        if patterns.is_empty() {
            return Ok(Vec::new());
        }

        let clauses = vec!["mimetype LIKE ?"; patterns.len()].join(" OR ");
        let sql = format!(
            "SELECT id FROM files \
             WHERE user_id = ? AND is_dir = 0 AND ({clauses}) \
             ORDER BY mtime DESC \
             LIMIT ? OFFSET ?"
        );
        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(&user.user_id);
        for pattern in patterns {
            query = query.bind(*pattern);
        }
        query = query.bind(limit as i64).bind(offset as i64);
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn recent(
        &self,
        user: &UserContext,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ItemId>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM files \
             WHERE user_id = ? AND is_dir = 0 \
             ORDER BY mtime DESC \
             LIMIT ? OFFSET ?",
        )
        .bind(&user.user_id)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn fetch_items(&self, user: &UserContext, ids: &[ItemId]) -> Result<Vec<ItemRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, name, path, size, mtime, mimetype, is_dir \
             FROM files \
             WHERE user_id = ? AND id IN ({})",
            Self::placeholders(ids.len())
        );
        let mut query =
            sqlx::query_as::<_, (i64, String, String, i64, i64, String, bool)>(&sql)
                .bind(&user.user_id);
        for id in ids {
            query = query.bind(id);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, path, size, mtime, mimetype, is_dir)| ItemRecord {
                id,
                name,
                path,
                size,
                mtime,
                mimetype,
                is_dir,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    async fn seed(pool: &SqlitePool) {
        let rows: &[(i64, &str, &str, &str, i64, bool)] = &[
            (1, "alice", "report-q1.pdf", "application/pdf", 400, false),
            (2, "alice", "report-q2.pdf", "application/pdf", 300, false),
            (3, "alice", "photo.png", "image/png", 200, false),
            (4, "alice", "reports", "httpd/unix-directory", 500, true),
            (5, "bob", "report-final.pdf", "application/pdf", 100, false),
        ];
        for (id, user, name, mime, mtime, is_dir) in rows {
            sqlx::query(
                "INSERT INTO files (id, user_id, name, path, size, mtime, mimetype, is_dir) \
                 VALUES (?, ?, ?, ?, 1, ?, ?, ?)",
            )
            .bind(id)
            .bind(user)
            .bind(name)
            .bind(format!("/{name}"))
            .bind(mtime)
            .bind(mime)
            .bind(is_dir)
            .execute(pool)
            .await
            .unwrap();
        }
    }

    fn alice() -> UserContext {
        UserContext::new("alice")
    }

    #[tokio::test]
    async fn name_scan_is_scoped_and_ordered() {
        let (pool, _dir) = test_pool().await;
        seed(&pool).await;
        let store = SqliteMetadataStore::new(pool);

        let ids = store.by_name_substring(&alice(), "report", 50, 0).await.unwrap();
        // Bob's file and the directory are excluded; newest first.
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn name_scan_treats_wildcards_literally() {
        let (pool, _dir) = test_pool().await;
        seed(&pool).await;
        let store = SqliteMetadataStore::new(pool);

        let ids = store.by_name_substring(&alice(), "%", 50, 0).await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn mime_scan_matches_any_pattern() {
        let (pool, _dir) = test_pool().await;
        seed(&pool).await;
        let store = SqliteMetadataStore::new(pool);

        let ids = store
            .by_mime_patterns(&alice(), &["image/%", "application/pdf"], 50, 0)
            .await
            .unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn recent_excludes_directories() {
        let (pool, _dir) = test_pool().await;
        seed(&pool).await;
        let store = SqliteMetadataStore::new(pool);

        let ids = store.recent(&alice(), 2, 0).await.unwrap();
        assert_eq!(ids, vec![1, 2]);
        let next = store.recent(&alice(), 2, 2).await.unwrap();
        assert_eq!(next, vec![3]);
    }

    #[tokio::test]
    async fn hydration_drops_foreign_and_missing_ids() {
        let (pool, _dir) = test_pool().await;
        seed(&pool).await;
        let store = SqliteMetadataStore::new(pool);

        let records = store.fetch_items(&alice(), &[1, 5, 999]).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "report-q1.pdf");
        assert!(records[0].is_file());
    }
}
