//! SQLite catalog connectivity.
//!
//! - Connection pool creation with WAL and foreign keys enabled
//! - Versioned schema migrations (see [`migration`])

pub mod migration;

pub use migration::MigrationManager;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DatabaseSettings;

/// Open (creating if needed) the catalog database and build the pool.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = settings.path.parent() {
        std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", settings.path.display()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(settings.busy_timeout_ms))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await?;

    info!(path = %settings.path.display(), "opened catalog database");
    Ok(pool)
}

/// Fresh migrated pool on a temporary directory, for tests.
#[cfg(test)]
pub async fn test_pool() -> (SqlitePool, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let settings = DatabaseSettings {
        path: dir.path().join("catalog.db"),
        ..DatabaseSettings::default()
    };
    let pool = create_pool(&settings).await.expect("create pool");
    MigrationManager::new(pool.clone())
        .run()
        .await
        .expect("run migrations");
    (pool, dir)
}
