//! Route handlers and wire payloads.
//!
//! The wire layer speaks camelCase JSON and resolves the acting user
//! from a request header; everything past `into_query` is the engine's
//! normalized domain model.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::core::error::SearchFault;
use crate::core::types::{
    FileTypeCategory, ResultRecord, SearchPath, SearchQuery, TagOperator, UserContext,
    DEFAULT_LIMIT,
};

use super::AppState;

/// Header carrying the authenticated user id, set by the fronting proxy.
pub const USER_HEADER: &str = "x-filescout-user";

/// Resolve the acting user from request headers.
pub fn current_user(headers: &HeaderMap) -> Result<UserContext, SearchFault> {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(UserContext::new)
        .ok_or(SearchFault::Authentication)
}

/// Raw search request body. Every field is optional; defaults match an
/// empty query on the first page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchBody {
    pub filename: String,
    pub tags: Vec<String>,
    pub tag_operator: Option<String>,
    pub file_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub use_full_text_search: Option<bool>,
}

impl SearchBody {
    pub fn into_query(self) -> SearchQuery {
        SearchQuery::normalized(
            &self.filename,
            self.tags,
            self.tag_operator
                .as_deref()
                .map(TagOperator::parse_lenient)
                .unwrap_or_default(),
            self.file_type
                .as_deref()
                .map(FileTypeCategory::parse_lenient)
                .unwrap_or_default(),
            self.limit.unwrap_or(DEFAULT_LIMIT as i64),
            self.offset.unwrap_or(0),
            self.use_full_text_search.unwrap_or(true),
        )
    }
}

/// Successful search response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponseBody {
    pub success: bool,
    pub files: Vec<ResultRecord>,
    /// Matches after filtering, before pagination.
    pub count: usize,
    pub limit: usize,
    pub offset: usize,
    pub search_type: SearchPath,
    pub full_text_search_available: bool,
    pub duration_ms: u64,
}

fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "message": message })),
    )
        .into_response()
}

/// POST /api/search
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SearchBody>,
) -> Response {
    let user = match current_user(&headers) {
        Ok(user) => user,
        Err(_) => return failure(StatusCode::UNAUTHORIZED, "authentication required"),
    };

    match state.resolver.resolve(&user, body.into_query()).await {
        Ok(envelope) => Json(SearchResponseBody {
            success: envelope.success,
            files: envelope.items,
            count: envelope.total_count,
            limit: envelope.limit,
            offset: envelope.offset,
            search_type: envelope.search_path,
            full_text_search_available: envelope.full_text_available,
            duration_ms: envelope.duration_ms,
        })
        .into_response(),
        Err(SearchFault::Authentication) => {
            failure(StatusCode::UNAUTHORIZED, "authentication required")
        }
        Err(fault) => {
            error!(error = %fault, "search request failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "search failed")
        }
    }
}

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if current_user(&headers).is_err() {
        return failure(StatusCode::UNAUTHORIZED, "authentication required");
    }

    match state.tags.assignable_tags().await {
        Ok(tags) => Json(json!({ "success": true, "tags": tags })).into_response(),
        Err(err) => {
            error!(error = %err, "tag listing failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "tag listing failed")
        }
    }
}

/// GET /health
pub async fn health() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn body_defaults_make_an_empty_first_page_query() {
        let body: SearchBody = serde_json::from_str("{}").unwrap();
        let query = body.into_query();
        assert_eq!(query.filename, "");
        assert!(query.tags.is_empty());
        assert_eq!(query.tag_operator, TagOperator::And);
        assert_eq!(query.file_type, FileTypeCategory::None);
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert_eq!(query.offset, 0);
        assert!(query.use_full_text);
    }

    #[test]
    fn body_fields_parse_leniently() {
        let body: SearchBody = serde_json::from_str(
            r#"{
                "filename": " report ",
                "tags": ["Q1", "Q1", ""],
                "tagOperator": "or",
                "fileType": "PDF",
                "limit": 9999,
                "offset": -3,
                "useFullTextSearch": false
            }"#,
        )
        .unwrap();
        let query = body.into_query();
        assert_eq!(query.filename, "report");
        assert_eq!(query.tags, vec!["Q1".to_string()]);
        assert_eq!(query.tag_operator, TagOperator::Or);
        assert_eq!(query.file_type, FileTypeCategory::Pdf);
        assert_eq!(query.limit, crate::core::types::MAX_LIMIT);
        assert_eq!(query.offset, 0);
        assert!(!query.use_full_text);
    }

    #[test]
    fn user_header_is_required_and_trimmed() {
        let mut headers = HeaderMap::new();
        assert!(current_user(&headers).is_err());

        headers.insert(USER_HEADER, HeaderValue::from_static("   "));
        assert!(current_user(&headers).is_err());

        headers.insert(USER_HEADER, HeaderValue::from_static(" alice "));
        assert_eq!(current_user(&headers).unwrap().user_id, "alice");
    }
}
