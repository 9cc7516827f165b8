use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use filescout::config::AppConfig;
use filescout::db::{self, MigrationManager};
use filescout::fulltext::{DisabledFullText, FullTextProvider, HttpFullTextProvider};
use filescout::logging;
use filescout::resolver::SearchResolver;
use filescout::server::{self, AppState};
use filescout::store::SqliteMetadataStore;
use filescout::tags::{SqliteTagIndex, TagIndex};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("load configuration")?;

    let _log_guard = logging::init(&config.logging).context("initialize logging")?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting filescout");

    let pool = db::create_pool(&config.database)
        .await
        .context("open catalog database")?;
    MigrationManager::new(pool.clone())
        .run()
        .await
        .context("run migrations")?;

    let store = Arc::new(SqliteMetadataStore::new(pool.clone()));
    let tags: Arc<dyn TagIndex> = Arc::new(SqliteTagIndex::new(pool));

    let fulltext: Arc<dyn FullTextProvider> = match (config.full_text.enabled, &config.full_text.endpoint) {
        (true, Some(endpoint)) => {
            info!(endpoint = %endpoint, "full-text provider enabled");
            Arc::new(
                HttpFullTextProvider::new(
                    endpoint.clone(),
                    Duration::from_secs(config.full_text.timeout_secs),
                )
                .context("build full-text client")?,
            )
        }
        _ => {
            info!("full-text provider disabled");
            Arc::new(DisabledFullText)
        }
    };

    let resolver = Arc::new(SearchResolver::new(
        store,
        tags.clone(),
        fulltext,
        config.search.fetch_ceiling,
    ));

    server::serve(AppState { resolver, tags }, &config.http.bind)
        .await
        .context("run http server")?;
    Ok(())
}
