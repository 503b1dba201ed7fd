//! Primary acquisition path: the structured article-list endpoint.
//!
//! One generic query returns every catalog; the requested one is picked
//! out by id. Anything short of a matching catalog is a failure.

use super::http_client::HttpClient;
use crate::error::StructuredFetchError;
use crate::feed::StructuredArticle;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Fixed page: first page, ten items.
const QUERY: &[(&str, &str)] = &[("type", "1"), ("pageNo", "1"), ("pageSize", "10")];

/// Response envelope of the article-list query.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub success: bool,
    pub data: Option<CatalogList>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogList {
    #[serde(default)]
    pub catalogs: Vec<Catalog>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub catalog_id: u32,
    #[serde(default)]
    pub catalog_name: Option<String>,
    #[serde(default)]
    pub articles: Vec<StructuredArticle>,
}

/// Source of structured articles for a catalog.
#[async_trait]
pub trait StructuredSource: Send + Sync {
    /// Articles of `catalog_id`, most recent first as upstream orders them.
    async fn fetch(&self, catalog_id: u32) -> Result<Vec<StructuredArticle>, StructuredFetchError>;
}

/// Fetches from the live endpoint over HTTP.
pub struct StructuredFetcher {
    http: HttpClient,
    api_url: String,
    timeout: Duration,
}

impl StructuredFetcher {
    pub fn new(http: HttpClient, api_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            timeout,
        }
    }

    pub fn query_url(&self) -> Result<String, StructuredFetchError> {
        query_url(&self.api_url)
    }
}

/// `api_url` with the fixed paging query appended.
pub fn query_url(api_url: &str) -> Result<String, StructuredFetchError> {
    let mut url = Url::parse(api_url)
        .map_err(|e| StructuredFetchError::Transport(format!("bad api url: {e}")))?;
    url.query_pairs_mut().extend_pairs(QUERY);
    Ok(url.to_string())
}

#[async_trait]
impl StructuredSource for StructuredFetcher {
    async fn fetch(&self, catalog_id: u32) -> Result<Vec<StructuredArticle>, StructuredFetchError> {
        let url = self.query_url()?;
        let timeout_ms = self.timeout.as_millis() as u64;

        let resp = self
            .http
            .get(&url, self.timeout)
            .await
            .map_err(|e| StructuredFetchError::from_reqwest(e, timeout_ms))?;

        if !resp.is_success() {
            return Err(StructuredFetchError::Status(resp.status));
        }

        let articles = select_catalog(&resp.body, catalog_id)?;
        tracing::debug!(catalog_id, count = articles.len(), "structured fetch ok");
        Ok(articles)
    }
}

/// Parse an envelope body and return the articles of `catalog_id`.
pub fn select_catalog(
    body: &str,
    catalog_id: u32,
) -> Result<Vec<StructuredArticle>, StructuredFetchError> {
    let envelope: ApiEnvelope = serde_json::from_str(body)
        .map_err(|e| StructuredFetchError::MalformedEnvelope(e.to_string()))?;

    if !envelope.success {
        return Err(StructuredFetchError::MalformedEnvelope(format!(
            "success=false (code {})",
            envelope.code.as_deref().unwrap_or("none")
        )));
    }

    envelope
        .data
        .ok_or_else(|| StructuredFetchError::MalformedEnvelope("missing data".into()))?
        .catalogs
        .into_iter()
        .find(|c| c.catalog_id == catalog_id)
        .map(|c| c.articles)
        .ok_or(StructuredFetchError::NotFound { catalog_id })
}
