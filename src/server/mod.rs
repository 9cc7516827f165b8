//! HTTP surface.
//!
//! Thin axum layer over the resolver: request parsing, user resolution,
//! and the camelCase wire envelope live in [`routes`].

pub mod error;
pub mod routes;

pub use error::ServerError;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::resolver::SearchResolver;
use crate::tags::TagIndex;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<SearchResolver>,
    pub tags: Arc<dyn TagIndex>,
}

/// Assemble the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", post(routes::search))
        .route("/api/tags", get(routes::list_tags))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(state: AppState, bind: &str) -> Result<(), ServerError> {
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|source| ServerError::BindFailed {
            addr: bind.to_string(),
            source,
        })?;
    info!(addr = bind, "listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
