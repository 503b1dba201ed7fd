//! Secondary acquisition path: render the category page in a browser tab
//! and read the embedded app data.

use super::app_data::{self, marker_selector};
use crate::error::ExtractionError;
use crate::feed::RenderedArticle;
use crate::renderer::{RenderContext, Renderer};
use std::time::Duration;

/// Drives one tab per extraction; the tab is closed on every exit path.
#[derive(Debug, Clone)]
pub struct RenderedExtractor {
    navigation_timeout: Duration,
    marker_timeout: Duration,
}

impl RenderedExtractor {
    pub fn new(navigation_timeout: Duration, marker_timeout: Duration) -> Self {
        Self {
            navigation_timeout,
            marker_timeout,
        }
    }

    /// Load `url` and return the catalog's articles.
    pub async fn extract(
        &self,
        renderer: &dyn Renderer,
        url: &str,
    ) -> Result<Vec<RenderedArticle>, ExtractionError> {
        let mut ctx = renderer
            .new_context()
            .await
            .map_err(|e| ExtractionError::Browser(format!("{e:#}")))?;

        let result = self.extract_in(ctx.as_mut(), url).await;

        if let Err(e) = ctx.close().await {
            tracing::warn!(%url, "failed to close tab: {e:#}");
        }
        result
    }

    async fn extract_in(
        &self,
        ctx: &mut dyn RenderContext,
        url: &str,
    ) -> Result<Vec<RenderedArticle>, ExtractionError> {
        let nav = ctx
            .navigate(url, self.navigation_timeout.as_millis() as u64)
            .await
            .map_err(|e| ExtractionError::Navigation(format!("{e:#}")))?;
        tracing::debug!(%url, final_url = %nav.final_url, load_ms = nav.load_time_ms, "page rendered");

        let selector = marker_selector();
        let timeout_ms = self.marker_timeout.as_millis() as u64;
        let appeared = ctx
            .wait_for_selector(&selector, timeout_ms)
            .await
            .map_err(|e| ExtractionError::Browser(format!("{e:#}")))?;
        if !appeared {
            return Err(ExtractionError::MarkerTimeout {
                selector,
                timeout_ms,
            });
        }

        let html = ctx
            .get_html()
            .await
            .map_err(|e| ExtractionError::Browser(format!("{e:#}")))?;
        tracing::trace!(bytes = html.len(), "rendered document");

        app_data::articles_from_html(&html)
    }
}
