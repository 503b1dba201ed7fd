//! Error taxonomy for the fetch-with-fallback pipeline.
//!
//! All variants are `Clone` so a single failed computation can be handed to
//! every caller that was coalesced onto it by the cache.

/// Failure of the primary structured-API path. Any of these triggers the
/// fallback hop to the rendered page.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuredFetchError {
    #[error("structured endpoint timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("structured endpoint returned HTTP {0}")]
    Status(u16),

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("catalog {catalog_id} not found in structured response")]
    NotFound { catalog_id: u32 },
}

impl StructuredFetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_ms }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Failure of the rendered-page path.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("browser unavailable: {0}")]
    Browser(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("marker `{selector}` did not appear within {timeout_ms}ms")]
    MarkerTimeout { selector: String, timeout_ms: u64 },

    #[error("marker `{0}` not present in rendered document")]
    MarkerMissing(String),

    #[error("marker content is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("no route state exposes a catalog detail")]
    CatalogDetailMissing,
}

/// Errors surfaced to the caller of the pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("category `{0}` is not configured")]
    UnknownCategory(String),

    /// Both the structured path and the rendered fallback failed.
    #[error("announcements for `{category}` unavailable: {rendered} (structured path: {structured})")]
    Extraction {
        category: String,
        structured: StructuredFetchError,
        #[source]
        rendered: ExtractionError,
    },
}

impl FeedError {
    /// Whether this failure came out of an exhausted fallback chain.
    pub fn is_extraction(&self) -> bool {
        matches!(self, Self::Extraction { .. })
    }
}
