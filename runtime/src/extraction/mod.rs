//! Rendered-page extraction: the browser fallback path.

pub mod app_data;
pub mod rendered;

pub use rendered::RenderedExtractor;
