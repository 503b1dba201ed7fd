//! Announcement categories: external route key to upstream catalog id.

use crate::error::FeedError;
use std::fmt;
use std::str::FromStr;

/// Static key → catalog id table understood by the upstream service.
const CATALOGS: &[(&str, u32)] = &[
    ("new-cryptocurrency-listing", 48),
    ("latest-binance-news", 49),
    ("latest-activities", 93),
    ("new-fiat-listings", 50),
    ("api-updates", 51),
    ("crypto-airdrop", 128),
    ("wallet-maintenance-updates", 157),
    ("delisting", 161),
];

/// A resolved announcement category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Category {
    key: &'static str,
    id: u32,
}

impl Category {
    /// Look up a category by its external key.
    pub fn resolve(key: &str) -> Result<Self, FeedError> {
        CATALOGS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(key, id)| Self { key, id })
            .ok_or_else(|| FeedError::UnknownCategory(key.to_string()))
    }

    /// All configured categories, in declaration order.
    pub fn all() -> impl Iterator<Item = Category> {
        CATALOGS.iter().map(|&(key, id)| Self { key, id })
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Upstream catalog id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Human-facing listing page, e.g.
    /// `https://www.binance.com/en/support/announcement/delisting?c=161&navId=161`.
    pub fn page_url(&self, base_url: &str, language: &str) -> String {
        format!(
            "{}?c={id}&navId={id}",
            self.announcement_url(base_url, language),
            id = self.id
        )
    }

    /// Category listing URL without query; article links hang off this.
    pub fn announcement_url(&self, base_url: &str, language: &str) -> String {
        format!(
            "{}/{}/support/announcement/{}",
            base_url.trim_end_matches('/'),
            language,
            self.key
        )
    }
}

impl FromStr for Category {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.id)
    }
}
