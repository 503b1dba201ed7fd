//! Runtime configuration: defaults, overridable from the environment.

use std::path::PathBuf;
use std::time::Duration;

pub const ENV_BASE_URL: &str = "ANNOUNCE_FEED_BASE_URL";
pub const ENV_LANGUAGE: &str = "ANNOUNCE_FEED_LANGUAGE";
pub const ENV_API_URL: &str = "ANNOUNCE_FEED_API_URL";
pub const ENV_API_TIMEOUT_MS: &str = "ANNOUNCE_FEED_API_TIMEOUT_MS";
pub const ENV_NAV_TIMEOUT_MS: &str = "ANNOUNCE_FEED_NAV_TIMEOUT_MS";
pub const ENV_MARKER_TIMEOUT_MS: &str = "ANNOUNCE_FEED_MARKER_TIMEOUT_MS";
pub const ENV_CACHE_TTL_SECS: &str = "ANNOUNCE_FEED_CACHE_TTL_SECS";
pub const ENV_CACHE_CAPACITY: &str = "ANNOUNCE_FEED_CACHE_CAPACITY";
pub const ENV_CHROMIUM_PATH: &str = "ANNOUNCE_FEED_CHROMIUM_PATH";

const DEFAULT_BASE_URL: &str = "https://www.binance.com";
const DEFAULT_API_URL: &str =
    "https://www.binance.com/bapi/composite/v1/public/cms/article/list/query";

/// Everything the pipeline needs to know about upstream and its own limits.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Site root, without trailing slash.
    pub base_url: String,
    /// Language path segment of the human-facing pages.
    pub language: String,
    /// Structured article-list endpoint (query is appended by the fetcher).
    pub api_url: String,
    /// Hard bound on the structured request.
    pub api_timeout: Duration,
    /// Bound on browser navigation.
    pub navigation_timeout: Duration,
    /// Bound on waiting for the embedded app-data marker.
    pub marker_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
    /// Explicit Chromium binary; discovered when `None`.
    pub chromium_path: Option<PathBuf>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "en".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: Duration::from_millis(1500),
            navigation_timeout: Duration::from_secs(30),
            marker_timeout: Duration::from_secs(15),
            cache_ttl: Duration::from_secs(5 * 60),
            cache_capacity: 256,
            chromium_path: None,
        }
    }
}

impl FeedConfig {
    /// Defaults with any `ANNOUNCE_FEED_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(v) = lookup(ENV_BASE_URL) {
            cfg.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup(ENV_LANGUAGE) {
            cfg.language = v;
        }
        if let Some(v) = lookup(ENV_API_URL) {
            cfg.api_url = v;
        }
        if let Some(ms) = parse_u64(&lookup, ENV_API_TIMEOUT_MS) {
            cfg.api_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, ENV_NAV_TIMEOUT_MS) {
            cfg.navigation_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, ENV_MARKER_TIMEOUT_MS) {
            cfg.marker_timeout = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_u64(&lookup, ENV_CACHE_TTL_SECS) {
            cfg.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(n) = parse_u64(&lookup, ENV_CACHE_CAPACITY) {
            cfg.cache_capacity = n;
        }
        if let Some(p) = lookup(ENV_CHROMIUM_PATH) {
            cfg.chromium_path = Some(PathBuf::from(p));
        }

        cfg
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<u64> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("ignoring {name}={raw:?}: not an unsigned integer");
            None
        }
    }
}
