//! Per-cell translation decisions.
//!
//! A cell is translated only when it is non-empty, its column is not
//! excluded, and the cache has no entry for its text. Backend failures never
//! escape: the cell keeps its original text and the failure is logged.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, Semaphore};

use super::backend::{Backend, BackendError};
use super::cache::TranslationCache;
use super::policy::ColumnPolicy;

/// How a cell's output value was produced.
#[derive(Debug)]
pub enum CellOutcome {
    /// The cell was empty and left alone.
    Empty,
    /// The cell's column is excluded.
    Excluded(String),
    /// Served from the cache without a backend call.
    Cached(String),
    /// Freshly translated by the backend.
    Translated(String),
    /// The backend failed; the original text is kept.
    Passthrough { text: String, error: BackendError },
}

impl CellOutcome {
    pub fn into_text(self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Excluded(text)
            | Self::Cached(text)
            | Self::Translated(text)
            | Self::Passthrough { text, .. } => text,
        }
    }

    pub const fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough { .. })
    }
}

/// Counters accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStats {
    pub backend_calls: usize,
    pub cache_hits: usize,
    pub failures: usize,
}

type KeyLock = Arc<AsyncMutex<()>>;

pub struct CellTranslator<B> {
    backend: B,
    cache: TranslationCache,
    policy: ColumnPolicy,
    target_language: String,
    limiter: Semaphore,
    timeout: Option<Duration>,
    // Texts with a backend call in flight. Waiters queue on the lock and
    // re-check the cache once they get it.
    inflight: Mutex<HashMap<String, KeyLock>>,
    backend_calls: AtomicUsize,
    cache_hits: AtomicUsize,
    failures: AtomicUsize,
}

impl<B: Backend> CellTranslator<B> {
    /// Creates a translator with an empty cache, one backend call at a time
    /// and no per-call deadline.
    pub fn new(backend: B, policy: ColumnPolicy, target_language: impl Into<String>) -> Self {
        Self {
            backend,
            cache: TranslationCache::new(),
            policy,
            target_language: target_language.into(),
            limiter: Semaphore::new(1),
            timeout: None,
            inflight: Mutex::new(HashMap::new()),
            backend_calls: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
        }
    }

    /// Caps the number of backend calls in flight at once.
    #[must_use]
    pub fn with_concurrency(mut self, max_in_flight: usize) -> Self {
        self.limiter = Semaphore::new(max_in_flight.max(1));
        self
    }

    /// Treats backend calls running longer than `limit` as failed.
    #[must_use]
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub const fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn stats(&self) -> CellStats {
        CellStats {
            backend_calls: self.backend_calls.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    /// Decides the output value for one cell of `column`.
    pub async fn translate(&self, text: &str, column: &str) -> CellOutcome {
        if text.is_empty() {
            return CellOutcome::Empty;
        }
        if self.policy.is_excluded(column) {
            return CellOutcome::Excluded(text.to_string());
        }
        if let Some(hit) = self.lookup(text) {
            return CellOutcome::Cached(hit);
        }

        let key = self.claim_key(text);
        let _turn = key.lock.lock().await;

        match self.lookup(text) {
            Some(hit) => CellOutcome::Cached(hit),
            None => self.call_backend(text, column).await,
        }
    }

    fn lookup(&self, text: &str) -> Option<String> {
        let hit = self.cache.get(text);
        if hit.is_some() {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        }
        hit
    }

    fn claim_key<'a>(&'a self, text: &'a str) -> InflightKey<'a> {
        let lock = Arc::clone(self.inflight.lock().entry(text.to_string()).or_default());
        InflightKey {
            inflight: &self.inflight,
            text,
            lock,
        }
    }

    async fn call_backend(&self, text: &str, column: &str) -> CellOutcome {
        // The semaphore is never closed, so acquire cannot fail.
        let _permit = self.limiter.acquire().await.ok();
        self.backend_calls.fetch_add(1, Ordering::Relaxed);

        let call = self.backend.translate(text, &self.target_language);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or_else(|_| Err(BackendError::Timeout(limit.as_secs_f64()))),
            None => call.await,
        };

        match result.and_then(|translations| {
            translations
                .into_iter()
                .next()
                .ok_or(BackendError::EmptyResult)
        }) {
            Ok(translated) => {
                tracing::debug!(column, "translated cell");
                CellOutcome::Translated(self.cache.put(text, translated))
            }
            Err(error) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(column, %error, "translation failed, keeping original text");
                CellOutcome::Passthrough {
                    text: text.to_string(),
                    error,
                }
            }
        }
    }
}

/// A claim on a text's in-flight lock. Dropping it, including when the
/// owning future is cancelled, removes the map entry once nobody else holds it.
struct InflightKey<'a> {
    inflight: &'a Mutex<HashMap<String, KeyLock>>,
    text: &'a str,
    lock: KeyLock,
}

impl Drop for InflightKey<'_> {
    fn drop(&mut self) {
        let mut inflight = self.inflight.lock();
        // One reference in the map, one held by us: nobody else is waiting.
        let idle = inflight
            .get(self.text)
            .is_some_and(|current| Arc::ptr_eq(current, &self.lock))
            && Arc::strong_count(&self.lock) <= 2;
        if idle {
            inflight.remove(self.text);
        }
    }
}
