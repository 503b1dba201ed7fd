//! Time-bounded feed cache.
//!
//! Entries are keyed by category key and catalog id under a fixed
//! namespace. Concurrent misses on the same key are coalesced into one
//! computation whose result every waiter receives; a failed computation
//! stores nothing.

use crate::category::Category;
use crate::error::FeedError;
use crate::feed::FeedItem;
use moka::future::Cache;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Namespace prefix of every key this cache writes.
pub const KEY_NAMESPACE: &str = "announce-feed:announcement";

/// Cached, normalized items for one category.
pub type CachedItems = Arc<Vec<FeedItem>>;

/// Cache key for a resolved category.
pub fn cache_key(category: &Category) -> String {
    format!("{KEY_NAMESPACE}:{}:{}", category.key(), category.id())
}

/// TTL cache in front of the fetch pipeline.
pub struct FeedCache {
    inner: Cache<String, CachedItems>,
    ttl: Duration,
    computations: AtomicU64,
}

impl FeedCache {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();

        Self {
            inner,
            ttl,
            computations: AtomicU64::new(0),
        }
    }

    /// Return the fresh entry for `category`, or run `compute` and store its
    /// result.
    pub async fn get_or_compute<F, Fut>(
        &self,
        category: &Category,
        compute: F,
    ) -> Result<CachedItems, FeedError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<FeedItem>, FeedError>>,
    {
        let key = cache_key(category);

        let computed = std::sync::atomic::AtomicBool::new(false);
        let result = self
            .inner
            .try_get_with(key.clone(), async {
                computed.store(true, Ordering::Relaxed);
                self.computations.fetch_add(1, Ordering::Relaxed);
                compute().await.map(Arc::new)
            })
            .await
            .map_err(|e: Arc<FeedError>| (*e).clone());

        if computed.load(Ordering::Relaxed) {
            tracing::debug!(%key, ok = result.is_ok(), "cache miss");
        } else {
            tracing::debug!(%key, "cache hit");
        }
        result
    }

    /// Fresh entry for `category`, without computing.
    pub async fn get(&self, category: &Category) -> Option<CachedItems> {
        self.inner.get(&cache_key(category)).await
    }

    /// Drop the entry for `category`.
    pub async fn invalidate(&self, category: &Category) {
        self.inner.invalidate(&cache_key(category)).await;
    }

    /// Number of entries, after applying pending expirations.
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }

    /// Computations started over the cache's lifetime.
    pub fn computation_count(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
