//! Per-request resilient image loading.
//!
//! One loader instance serves one displayed URL. The request runs a small
//! state machine: cache lookup, network fetch, size-floor validation, decode,
//! cache store, bounded retry with fixed backoff, terminal success/failure.
//! Cancellation can preempt any non-terminal stage, including a pending
//! backoff sleep.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::entities::LoadState;
use crate::domain::errors::{FetchError, FetchResult};
use crate::domain::ports::{ImageCachePort, ImageTransport};

/// Number of fetch attempts before a request fails terminally.
pub const MAX_ATTEMPTS: u32 = 3;

/// Fixed wait between attempts.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(300);

/// Default minimum accepted payload size. Servers occasionally answer a 2xx
/// with a near-empty placeholder body on transient edge cases; anything under
/// the floor is treated as a failed attempt.
pub const MIN_IMAGE_BYTES: usize = 10 * 1024;

/// Configuration for a [`RemoteImageLoader`].
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Maximum fetch attempts per request.
    pub max_attempts: u32,
    /// Fixed backoff between attempts.
    pub retry_backoff: Duration,
    /// Minimum accepted payload size in bytes.
    pub min_image_bytes: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            retry_backoff: RETRY_BACKOFF,
            min_image_bytes: MIN_IMAGE_BYTES,
        }
    }
}

/// Loads one image URL with caching, validation, bounded retry, and
/// cancellation.
///
/// State is published through a `watch` channel: observers query the current
/// state or subscribe for changes, and all publishes happen on the sender
/// side only. Every publish is generation-guarded, so a cancelled request can
/// never write state afterwards and a cancelled-then-reused loader cannot
/// resurrect a stale retry chain.
pub struct RemoteImageLoader {
    inner: Arc<LoaderInner>,
    task: Mutex<Option<JoinHandle<()>>>,
}

struct LoaderInner {
    url: String,
    cache: Arc<dyn ImageCachePort>,
    transport: Arc<dyn ImageTransport>,
    config: LoaderConfig,
    state_tx: watch::Sender<LoadState>,
    generation: AtomicU64,
}

impl std::fmt::Debug for RemoteImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteImageLoader")
            .field("url", &self.inner.url)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl RemoteImageLoader {
    /// Creates a loader for one URL.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        cache: Arc<dyn ImageCachePort>,
        transport: Arc<dyn ImageTransport>,
        config: LoaderConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(LoadState::Idle);
        Self {
            inner: Arc::new(LoaderInner {
                url: url.into(),
                cache,
                transport,
                config,
                state_tx,
                generation: AtomicU64::new(0),
            }),
            task: Mutex::new(None),
        }
    }

    /// Returns the URL this loader serves.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Returns the current load state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.inner.state_tx.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.inner.state_tx.subscribe()
    }

    /// Starts the request.
    ///
    /// No-op while a request is in flight or after success. A warm cache
    /// short-circuits straight to `Success` with zero network calls. Calling
    /// after a terminal failure starts a brand-new request with a fresh
    /// attempt budget.
    pub fn load(&self) {
        match &*self.inner.state_tx.borrow() {
            LoadState::Loading | LoadState::Success(_) => return,
            LoadState::Idle | LoadState::Failed => {}
        }

        // The published state alone cannot gate re-entry: a request parked
        // in its backoff window reads as Idle. The task handle is the source
        // of truth for whether a request is in flight.
        let mut task = self.task.lock();
        if let Some(handle) = task.as_ref() {
            if !handle.is_finished() {
                return;
            }
        }

        if let Some(img) = self.inner.cache.get(&self.inner.url) {
            debug!(url = %self.inner.url, "Serving image from memory cache");
            self.inner.state_tx.send_replace(LoadState::Success(img));
            return;
        }

        let generation = self.inner.generation.load(Ordering::Acquire);
        self.inner.state_tx.send_replace(LoadState::Loading);

        let inner = Arc::clone(&self.inner);
        *task = Some(tokio::spawn(async move { inner.run(generation).await }));
    }

    /// Cancels the in-flight request.
    ///
    /// Aborts the network operation, clears any pending backoff, and resets a
    /// `Loading` state to `Idle` so a later `load()` starts clean. Terminal
    /// states are left untouched.
    pub fn cancel(&self) {
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
        self.inner.state_tx.send_if_modified(|state| {
            if state.is_loading() {
                *state = LoadState::Idle;
                true
            } else {
                false
            }
        });
        debug!(url = %self.inner.url, "Cancelled image load");
    }
}

impl LoaderInner {
    async fn run(self: Arc<Self>, generation: u64) {
        let mut attempt: u32 = 1;
        loop {
            match self.attempt_fetch().await {
                Ok(img) => {
                    self.cache.put(&self.url, Arc::clone(&img));
                    self.publish(generation, LoadState::Success(img));
                    return;
                }
                Err(err) => {
                    if attempt >= self.config.max_attempts {
                        if self.publish(generation, LoadState::Failed) {
                            warn!(
                                url = %self.url,
                                error = %err,
                                attempts = attempt,
                                "Image load failed"
                            );
                        }
                        return;
                    }
                    debug!(url = %self.url, error = %err, attempt, "Image fetch failed, will retry");

                    // Retries re-enter loading through idle so observers see
                    // every transition.
                    if !self.publish(generation, LoadState::Idle) {
                        return;
                    }
                    tokio::time::sleep(self.config.retry_backoff).await;
                    if !self.publish(generation, LoadState::Loading) {
                        return;
                    }
                    attempt += 1;
                }
            }
        }
    }

    /// One fetch attempt: transport, size floor, decode.
    async fn attempt_fetch(&self) -> FetchResult<Arc<image::DynamicImage>> {
        let bytes = self.transport.fetch_bytes(&self.url).await?;

        if bytes.len() < self.config.min_image_bytes {
            return Err(FetchError::TooSmall {
                len: bytes.len(),
                min: self.config.min_image_bytes,
            });
        }

        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await
            .map_err(|e| FetchError::Decode(format!("decode task panicked: {e}")))?
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(Arc::new(decoded))
    }

    /// Publishes a state change unless the request was superseded by a
    /// cancel. The generation check runs inside the watch lock, so a cancel
    /// and a publish cannot interleave.
    fn publish(&self, generation: u64, next: LoadState) -> bool {
        self.state_tx.send_if_modified(|state| {
            if self.generation.load(Ordering::Acquire) != generation {
                return false;
            }
            *state = next;
            true
        })
    }
}
