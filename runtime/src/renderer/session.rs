//! Shared browser session with acquire/release semantics.
//!
//! At most one renderer is alive per pool. It is launched lazily by the
//! first `acquire` and shut down when the last outstanding lease is
//! released. Launch and teardown both happen under the pool lock, so two
//! requests can never launch concurrently, and a request can never see the
//! browser closed underneath it mid-navigation.

use super::{Renderer, RendererFactory};
use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct PoolState {
    renderer: Option<Arc<dyn Renderer>>,
    leases: usize,
    /// Bumped on every launch and forced shutdown; leases only count
    /// against the generation they were taken from.
    generation: u64,
}

/// Owner of the process-wide browser session.
pub struct SessionPool {
    factory: Arc<dyn RendererFactory>,
    state: Arc<Mutex<PoolState>>,
    launches: AtomicUsize,
}

impl SessionPool {
    pub fn new(factory: Arc<dyn RendererFactory>) -> Self {
        Self {
            factory,
            state: Arc::new(Mutex::new(PoolState::default())),
            launches: AtomicUsize::new(0),
        }
    }

    /// Borrow the shared renderer, launching it if none is alive.
    pub async fn acquire(&self) -> Result<SessionLease> {
        let mut state = self.state.lock().await;

        let renderer = match &state.renderer {
            Some(r) => Arc::clone(r),
            None => {
                let r = self.factory.launch().await?;
                self.launches.fetch_add(1, Ordering::Relaxed);
                state.generation += 1;
                state.leases = 0;
                tracing::debug!("browser session launched");
                state.renderer = Some(Arc::clone(&r));
                r
            }
        };
        state.leases += 1;

        Ok(SessionLease {
            renderer: Some(renderer),
            generation: state.generation,
            state: Arc::clone(&self.state),
        })
    }

    /// Whether a browser is currently alive.
    pub async fn is_live(&self) -> bool {
        self.state.lock().await.renderer.is_some()
    }

    /// Outstanding leases.
    pub async fn lease_count(&self) -> usize {
        self.state.lock().await.leases
    }

    /// Total number of browser launches over the pool's lifetime.
    pub fn launch_count(&self) -> usize {
        self.launches.load(Ordering::Relaxed)
    }

    /// Force-close the browser regardless of outstanding leases.
    ///
    /// Only for process shutdown; in-flight leases will fail their next call
    /// and their later release is ignored.
    pub async fn shutdown(&self) -> Result<()> {
        let renderer = {
            let mut state = self.state.lock().await;
            state.leases = 0;
            state.generation += 1;
            state.renderer.take()
        };
        match renderer {
            Some(r) => r.shutdown().await,
            None => Ok(()),
        }
    }
}

/// A borrowed handle to the shared renderer.
///
/// Call [`SessionLease::release`] when done. A lease dropped without
/// release (cancellation, panic) schedules the release on the runtime.
pub struct SessionLease {
    renderer: Option<Arc<dyn Renderer>>,
    generation: u64,
    state: Arc<Mutex<PoolState>>,
}

impl SessionLease {
    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer
            .as_deref()
            .unwrap_or(&super::NoopRenderer)
    }

    /// Give the session back; closes the browser if this was the last lease.
    pub async fn release(mut self) -> Result<()> {
        self.renderer.take();
        release_lease(&self.state, self.generation).await
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        if self.renderer.take().is_none() {
            return;
        }
        let state = Arc::clone(&self.state);
        let generation = self.generation;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = release_lease(&state, generation).await {
                        tracing::warn!("deferred session release failed: {e:#}");
                    }
                });
            }
            Err(_) => tracing::warn!("session lease dropped outside a runtime; browser left open"),
        }
    }
}

async fn release_lease(state: &Mutex<PoolState>, generation: u64) -> Result<()> {
    let mut state = state.lock().await;
    if state.generation != generation {
        tracing::debug!(generation, current = state.generation, "stale session lease released");
        return Ok(());
    }
    state.leases = state.leases.saturating_sub(1);
    if state.leases > 0 {
        return Ok(());
    }
    let Some(renderer) = state.renderer.take() else {
        return Ok(());
    };
    // Shut down while holding the lock so a concurrent acquire waits for
    // teardown to finish and then launches a fresh browser.
    let result = renderer.shutdown().await;
    tracing::debug!("browser session closed");
    result
}
