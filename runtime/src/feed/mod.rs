//! Raw article shapes from both acquisition paths and the normalized feed.

pub mod normalize;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article as returned by the structured article-list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredArticle {
    #[serde(default)]
    pub id: u64,
    pub code: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: i64,
    /// Epoch milliseconds in practice. Absent or `null` decodes to `None`.
    #[serde(default)]
    pub release_date: Option<ReleaseDate>,
}

/// Article as embedded in the rendered page's app state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedArticle {
    pub code: String,
    pub title: String,
    /// Format depends on upstream; usually a string, sometimes a number.
    #[serde(default)]
    pub release_date: Option<ReleaseDate>,
    #[serde(rename = "type", default)]
    pub kind: Option<i64>,
}

/// Publication timestamp as supplied upstream.
///
/// Decoding never fails: shapes other than an integer or a string land in
/// `Other`, so one odd article cannot sink its whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReleaseDate {
    EpochMillis(i64),
    Text(String),
    Other(serde_json::Value),
}

/// An article from either acquisition path.
#[derive(Debug, Clone, PartialEq)]
pub enum RawArticle {
    Structured(StructuredArticle),
    Rendered(RenderedArticle),
}

impl RawArticle {
    pub fn code(&self) -> &str {
        match self {
            Self::Structured(a) => &a.code,
            Self::Rendered(a) => &a.code,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Structured(a) => &a.title,
            Self::Rendered(a) => &a.title,
        }
    }

    pub fn release_date(&self) -> Option<&ReleaseDate> {
        match self {
            Self::Structured(a) => a.release_date.as_ref(),
            Self::Rendered(a) => a.release_date.as_ref(),
        }
    }
}

/// A normalized feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    /// Mirrors the title; upstream exposes no summary.
    pub description: String,
    /// Upstream article code; stable across fetches.
    pub guid: String,
    pub link: String,
    /// `None` when the upstream timestamp could not be parsed.
    pub pub_date: Option<DateTime<Utc>>,
}

/// What the route layer receives for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub items: Vec<FeedItem>,
}
