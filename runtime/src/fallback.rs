//! Fetch-with-fallback orchestration.
//!
//! ```text
//! TryStructured ─ Fetched ──────────────────────────────▶ Done
//!       │
//!       └─ Failed ─▶ acquire session ─▶ TryRendered ─ ok ─▶ Done
//!                                            │
//!                                            └─ err ─▶ FeedError::Extraction
//! ```
//!
//! The session lease taken for the rendered path is released before the
//! run returns, whichever branch it ends on.

use crate::acquisition::structured::StructuredSource;
use crate::category::Category;
use crate::error::{ExtractionError, FeedError, StructuredFetchError};
use crate::extraction::RenderedExtractor;
use crate::feed::{RawArticle, StructuredArticle};
use crate::renderer::session::SessionPool;
use std::sync::Arc;

/// Outcome of the primary path, as a value rather than control flow.
#[derive(Debug)]
pub enum StructuredAttempt {
    Fetched(Vec<StructuredArticle>),
    Failed(StructuredFetchError),
}

impl From<Result<Vec<StructuredArticle>, StructuredFetchError>> for StructuredAttempt {
    fn from(r: Result<Vec<StructuredArticle>, StructuredFetchError>) -> Self {
        match r {
            Ok(articles) => Self::Fetched(articles),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Which path produced a successful result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Structured,
    Rendered,
}

/// Raw articles together with the path that produced them.
#[derive(Debug)]
pub struct Fetched {
    pub source: Source,
    pub articles: Vec<RawArticle>,
}

/// Runs the structured path and, on failure, the rendered fallback.
pub struct FallbackOrchestrator {
    structured: Arc<dyn StructuredSource>,
    extractor: RenderedExtractor,
    sessions: Arc<SessionPool>,
    base_url: String,
    language: String,
}

impl FallbackOrchestrator {
    pub fn new(
        structured: Arc<dyn StructuredSource>,
        extractor: RenderedExtractor,
        sessions: Arc<SessionPool>,
        base_url: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            structured,
            extractor,
            sessions,
            base_url: base_url.into(),
            language: language.into(),
        }
    }

    pub async fn run(&self, category: Category) -> Result<Fetched, FeedError> {
        let attempt: StructuredAttempt = self.structured.fetch(category.id()).await.into();

        let cause = match attempt {
            StructuredAttempt::Fetched(articles) => {
                tracing::debug!(category = category.key(), count = articles.len(), "served by structured endpoint");
                return Ok(Fetched {
                    source: Source::Structured,
                    articles: articles.into_iter().map(RawArticle::Structured).collect(),
                });
            }
            StructuredAttempt::Failed(cause) => cause,
        };

        tracing::error!(
            category = category.key(),
            catalog_id = category.id(),
            error = %cause,
            "structured fetch failed; falling back to rendered page"
        );

        match self.run_rendered(category).await {
            Ok(articles) => {
                tracing::info!(category = category.key(), count = articles.len(), "served by rendered page");
                Ok(Fetched {
                    source: Source::Rendered,
                    articles,
                })
            }
            Err(rendered) => {
                tracing::error!(
                    category = category.key(),
                    catalog_id = category.id(),
                    error = %rendered,
                    "rendered fallback failed"
                );
                Err(FeedError::Extraction {
                    category: category.key().to_string(),
                    structured: cause,
                    rendered,
                })
            }
        }
    }

    async fn run_rendered(&self, category: Category) -> Result<Vec<RawArticle>, ExtractionError> {
        let url = category.page_url(&self.base_url, &self.language);

        let lease = self
            .sessions
            .acquire()
            .await
            .map_err(|e| ExtractionError::Browser(format!("{e:#}")))?;

        let result = self.extractor.extract(lease.renderer(), &url).await;

        if let Err(e) = lease.release().await {
            tracing::warn!("failed to release browser session: {e:#}");
        }

        result.map(|articles| articles.into_iter().map(RawArticle::Rendered).collect())
    }
}
