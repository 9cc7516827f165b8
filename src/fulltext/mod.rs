//! Full-text search provider.
//!
//! The content index lives in an external service; this module defines the
//! provider contract, a disabled stand-in, and an HTTP client
//! implementation. Provider faults never fail a search: the resolver
//! treats them as a signal to fall back to metadata retrieval.

pub mod error;

pub use error::{FullTextError, Result};

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::types::{ItemId, UserContext};

/// A full-text lookup request.
#[derive(Debug, Clone)]
pub struct FullTextRequest {
    /// Free-text term, typically the filename query.
    pub term: String,
    /// Tag names embedded into the query string as ranking hints.
    /// The provider may or may not honor them; the resolver re-checks
    /// tag constraints on the results regardless.
    pub tag_hints: Vec<String>,
    pub limit: usize,
    pub offset: usize,
}

impl FullTextRequest {
    /// Render the term plus tag hints into one provider query string.
    pub fn query_string(&self) -> String {
        let mut query = self.term.clone();
        for hint in &self.tag_hints {
            if !query.is_empty() {
                query.push(' ');
            }
            query.push_str("tag:\"");
            query.push_str(hint);
            query.push('"');
        }
        query
    }
}

/// One content-index hit, with optional ranking metadata.
#[derive(Debug, Clone)]
pub struct FullTextHit {
    pub item: ItemId,
    pub score: Option<f32>,
    pub excerpt: Option<String>,
}

/// Capability interface over the content index.
#[async_trait]
pub trait FullTextProvider: Send + Sync {
    /// Whether the provider is configured and worth attempting.
    fn is_available(&self) -> bool;

    /// Run a content search for one user.
    async fn search(&self, user: &UserContext, request: &FullTextRequest)
        -> Result<Vec<FullTextHit>>;
}

/// Stand-in provider used when no content index is configured.
pub struct DisabledFullText;

#[async_trait]
impl FullTextProvider for DisabledFullText {
    fn is_available(&self) -> bool {
        false
    }

    async fn search(
        &self,
        _user: &UserContext,
        _request: &FullTextRequest,
    ) -> Result<Vec<FullTextHit>> {
        Err(FullTextError::Unavailable)
    }
}

#[derive(Serialize)]
struct ProviderRequest<'a> {
    query: String,
    user: &'a str,
    limit: usize,
    offset: usize,
}

#[derive(Deserialize)]
struct ProviderResponse {
    hits: Vec<ProviderHit>,
}

#[derive(Deserialize)]
struct ProviderHit {
    id: i64,
    #[serde(default)]
    score: Option<f32>,
    #[serde(default)]
    excerpt: Option<String>,
}

/// Provider backed by an external content-index HTTP endpoint.
pub struct HttpFullTextProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFullTextProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl FullTextProvider for HttpFullTextProvider {
    fn is_available(&self) -> bool {
        true
    }

    async fn search(
        &self,
        user: &UserContext,
        request: &FullTextRequest,
    ) -> Result<Vec<FullTextHit>> {
        let body = ProviderRequest {
            query: request.query_string(),
            user: &user.user_id,
            limit: request.limit,
            offset: request.offset,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: ProviderResponse = response.json().await?;
        Ok(parsed
            .hits
            .into_iter()
            .map(|hit| FullTextHit {
                item: hit.id,
                score: hit.score,
                excerpt: hit.excerpt,
            })
            .collect())
    }
}
