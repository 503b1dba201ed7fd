//! Entry point for the route layer: category key in, feed out.

use crate::acquisition::http_client::HttpClient;
use crate::acquisition::structured::{StructuredFetcher, StructuredSource};
use crate::cache::FeedCache;
use crate::category::Category;
use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::extraction::RenderedExtractor;
use crate::fallback::FallbackOrchestrator;
use crate::feed::{normalize, Feed};
use crate::renderer::chromium::ChromiumFactory;
use crate::renderer::session::SessionPool;
use crate::renderer::RendererFactory;
use std::sync::Arc;

/// Resolves, caches, fetches with fallback and normalizes.
pub struct AnnouncementService {
    config: FeedConfig,
    cache: FeedCache,
    orchestrator: FallbackOrchestrator,
    sessions: Arc<SessionPool>,
}

impl AnnouncementService {
    /// Wire the live HTTP client and Chromium launcher.
    pub fn new(config: FeedConfig) -> Self {
        let structured = Arc::new(StructuredFetcher::new(
            HttpClient::new(),
            config.api_url.clone(),
            config.api_timeout,
        ));
        let factory = Arc::new(ChromiumFactory::new(config.chromium_path.clone()));
        Self::with_sources(config, structured, factory)
    }

    /// Wire custom acquisition sources.
    pub fn with_sources(
        config: FeedConfig,
        structured: Arc<dyn StructuredSource>,
        renderer_factory: Arc<dyn RendererFactory>,
    ) -> Self {
        let sessions = Arc::new(SessionPool::new(renderer_factory));
        let extractor = RenderedExtractor::new(config.navigation_timeout, config.marker_timeout);
        let orchestrator = FallbackOrchestrator::new(
            structured,
            extractor,
            Arc::clone(&sessions),
            config.base_url.clone(),
            config.language.clone(),
        );
        let cache = FeedCache::new(config.cache_ttl, config.cache_capacity);

        Self {
            config,
            cache,
            orchestrator,
            sessions,
        }
    }

    /// Build the feed for an external category key.
    ///
    /// Unknown keys fail before the cache or network is touched.
    pub async fn fetch(&self, category_key: &str) -> Result<Feed, FeedError> {
        let category = Category::resolve(category_key)?;
        let announcement_url = category.announcement_url(&self.config.base_url, &self.config.language);

        let items = self
            .cache
            .get_or_compute(&category, || async {
                self.orchestrator
                    .run(category)
                    .await
                    .map(|fetched| normalize::normalize_all(&fetched.articles, &announcement_url))
            })
            .await?;

        Ok(Feed {
            title: format!("Binance {}", category.key()),
            link: category.page_url(&self.config.base_url, &self.config.language),
            items: items.as_ref().clone(),
        })
    }

    pub fn cache(&self) -> &FeedCache {
        &self.cache
    }

    pub fn sessions(&self) -> &SessionPool {
        &self.sessions
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Close any browser still alive.
    pub async fn shutdown(&self) -> anyhow::Result<()> {
        self.sessions.shutdown().await
    }
}
