//! Decode the server-rendered application state embedded in the page.
//!
//! The marker node holds a JSON snapshot shaped like
//! `{ appState: { loader: { dataByRouteId: { <route>: { catalogDetail: { articles } } } } } }`.
//! Route ids are build-dependent, so the map's values are scanned for the
//! first one that carries a catalog detail.

use crate::error::ExtractionError;
use crate::feed::RenderedArticle;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

/// Id of the element carrying the app-state JSON.
pub const APP_DATA_ID: &str = "__APP_DATA";

/// CSS selector for the marker element.
pub fn marker_selector() -> String {
    format!("#{APP_DATA_ID}")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDetail {
    #[serde(default)]
    catalog_id: Option<u32>,
    #[serde(default)]
    articles: Vec<RenderedArticle>,
}

/// Text content of the marker element, if present.
pub fn marker_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&marker_selector()).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

/// Extract the rendered article list from a full page document.
pub fn articles_from_html(html: &str) -> Result<Vec<RenderedArticle>, ExtractionError> {
    let text = marker_text(html).ok_or_else(|| ExtractionError::MarkerMissing(marker_selector()))?;
    articles_from_app_data(&text)
}

/// Extract the rendered article list from the marker's JSON text.
pub fn articles_from_app_data(text: &str) -> Result<Vec<RenderedArticle>, ExtractionError> {
    let app_data: Value =
        serde_json::from_str(text.trim()).map_err(|e| ExtractionError::InvalidJson(e.to_string()))?;

    let routes = app_data
        .pointer("/appState/loader/dataByRouteId")
        .and_then(Value::as_object)
        .ok_or(ExtractionError::CatalogDetailMissing)?;

    let detail = routes
        .values()
        .find_map(|state| state.get("catalogDetail"))
        .ok_or(ExtractionError::CatalogDetailMissing)?;

    let detail: CatalogDetail = serde_json::from_value(detail.clone())
        .map_err(|e| ExtractionError::InvalidJson(format!("catalogDetail: {e}")))?;

    tracing::debug!(
        catalog_id = ?detail.catalog_id,
        count = detail.articles.len(),
        "decoded catalog detail from app data"
    );
    Ok(detail.articles)
}
