//! Test doubles for the two acquisition paths.

#![allow(dead_code)]

pub mod upstream;

use announce_feed::acquisition::structured::StructuredSource;
use announce_feed::config::FeedConfig;
use announce_feed::error::StructuredFetchError;
use announce_feed::feed::{ReleaseDate, StructuredArticle};
use announce_feed::renderer::{NavigationResult, RenderContext, Renderer, RendererFactory};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE_URL: &str = "https://www.binance.com";

pub fn test_config() -> FeedConfig {
    FeedConfig {
        base_url: BASE_URL.to_string(),
        navigation_timeout: Duration::from_secs(2),
        marker_timeout: Duration::from_millis(200),
        cache_ttl: Duration::from_secs(60),
        ..FeedConfig::default()
    }
}

pub fn article(id: u64, code: &str, title: &str, release_ms: i64) -> StructuredArticle {
    StructuredArticle {
        id,
        code: code.to_string(),
        title: title.to_string(),
        kind: 1,
        release_date: Some(ReleaseDate::EpochMillis(release_ms)),
    }
}

// ── structured path ──

/// Returns a fixed result and counts calls.
pub struct MockStructured {
    result: Mutex<Result<Vec<StructuredArticle>, StructuredFetchError>>,
    delay: Duration,
    pub calls: AtomicUsize,
    pub last_catalog: Mutex<Option<u32>>,
}

impl MockStructured {
    pub fn ok(articles: Vec<StructuredArticle>) -> Arc<Self> {
        Self::with(Ok(articles), Duration::ZERO)
    }

    pub fn failing(err: StructuredFetchError) -> Arc<Self> {
        Self::with(Err(err), Duration::ZERO)
    }

    pub fn with(
        result: Result<Vec<StructuredArticle>, StructuredFetchError>,
        delay: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            result: Mutex::new(result),
            delay,
            calls: AtomicUsize::new(0),
            last_catalog: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StructuredSource for MockStructured {
    async fn fetch(&self, catalog_id: u32) -> Result<Vec<StructuredArticle>, StructuredFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_catalog.lock().unwrap() = Some(catalog_id);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.lock().unwrap().clone()
    }
}

// ── rendered path ──

/// What every tab of the fake browser serves.
#[derive(Clone)]
pub enum PageBehavior {
    /// Marker appears; document is this HTML.
    Serve(String),
    /// Marker never appears.
    NoMarker,
    /// Navigation itself fails.
    NavigationError,
}

#[derive(Default)]
pub struct BrowserStats {
    pub launches: AtomicUsize,
    pub contexts: AtomicUsize,
    pub contexts_closed: AtomicUsize,
    pub shutdowns: AtomicUsize,
    pub navigated: Mutex<Vec<String>>,
}

impl BrowserStats {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
    pub fn contexts(&self) -> usize {
        self.contexts.load(Ordering::SeqCst)
    }
    pub fn contexts_closed(&self) -> usize {
        self.contexts_closed.load(Ordering::SeqCst)
    }
    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

pub struct MockFactory {
    behavior: PageBehavior,
    pub stats: Arc<BrowserStats>,
}

impl MockFactory {
    pub fn new(behavior: PageBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            stats: Arc::new(BrowserStats::default()),
        })
    }
}

#[async_trait]
impl RendererFactory for MockFactory {
    async fn launch(&self) -> Result<Arc<dyn Renderer>> {
        self.stats.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockRenderer {
            behavior: self.behavior.clone(),
            stats: Arc::clone(&self.stats),
        }))
    }
}

struct MockRenderer {
    behavior: PageBehavior,
    stats: Arc<BrowserStats>,
}

#[async_trait]
impl Renderer for MockRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        self.stats.contexts.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockContext {
            behavior: self.behavior.clone(),
            stats: Arc::clone(&self.stats),
        }))
    }

    async fn shutdown(&self) -> Result<()> {
        self.stats.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn active_contexts(&self) -> usize {
        self.stats.contexts() - self.stats.contexts_closed()
    }
}

struct MockContext {
    behavior: PageBehavior,
    stats: Arc<BrowserStats>,
}

#[async_trait]
impl RenderContext for MockContext {
    async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> Result<NavigationResult> {
        self.stats.navigated.lock().unwrap().push(url.to_string());
        if matches!(self.behavior, PageBehavior::NavigationError) {
            anyhow::bail!("net::ERR_CONNECTION_RESET");
        }
        Ok(NavigationResult {
            final_url: url.to_string(),
            load_time_ms: 5,
        })
    }

    async fn wait_for_selector(&self, _selector: &str, _timeout_ms: u64) -> Result<bool> {
        Ok(matches!(self.behavior, PageBehavior::Serve(_)))
    }

    async fn get_html(&self) -> Result<String> {
        match &self.behavior {
            PageBehavior::Serve(html) => Ok(html.clone()),
            _ => Ok("<html><body></body></html>".to_string()),
        }
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.stats.contexts_closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A rendered announcement page embedding `articles` in its app data.
pub fn rendered_page(catalog_id: u32, articles: serde_json::Value) -> String {
    let app_data = serde_json::json!({
        "appState": {
            "loader": {
                "dataByRouteId": {
                    "2a3b": { "topNav": { "items": [] } },
                    "7c1f": {
                        "catalogDetail": {
                            "catalogId": catalog_id,
                            "catalogName": "Announcements",
                            "articles": articles
                        }
                    }
                }
            }
        }
    });
    format!(
        "<!DOCTYPE html><html><head><title>Announcements</title></head><body>\
         <div id=\"__APP\"></div>\
         <script id=\"__APP_DATA\" type=\"application/json\">{app_data}</script>\
         </body></html>"
    )
}
