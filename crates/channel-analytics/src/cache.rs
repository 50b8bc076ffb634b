//! In-process TTL memoization for remote calls.
//!
//! Entries expire lazily: a read past `stored_at + ttl` is a miss and the
//! stale value is replaced by the next successful computation. Every
//! [`PURGE_EVERY`] stores also sweep out expired entries whose keys are
//! never read again. There is no cross-key locking, so two concurrent
//! misses for the same key may both run their producer.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use sha2::{Digest, Sha256};
use tokio::time::Instant;
use youtube_client::ApiKey;

/// Stores between opportunistic sweeps of expired entries.
pub const PURGE_EVERY: usize = 64;

/// Stable, non-reversible identity of an API key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CredentialId(String);

impl CredentialId {
    pub fn of(key: &ApiKey) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(key.expose().as_bytes());
        let digest = hasher.finalize();
        Self(hex::encode(&digest[..16]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialId({})", &self.0[..8.min(self.0.len())])
    }
}

/// Operation name + credential + full argument list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: &'static str,
    credential: CredentialId,
    args: Vec<String>,
}

impl CacheKey {
    pub fn new(operation: &'static str, credential: &CredentialId) -> Self {
        Self {
            operation,
            credential: credential.clone(),
            args: Vec::new(),
        }
    }

    /// Append one argument of the cached call.
    pub fn arg(mut self, value: impl ToString) -> Self {
        self.args.push(value.to_string());
        self
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

struct CacheEntry {
    value: Box<dyn Any + Send + Sync>,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < self.ttl
    }
}

/// Keyed store of heterogeneous values with per-entry TTL.
#[derive(Default)]
pub struct TtlCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    writes: AtomicUsize,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        // Entries are plain data, so a panic mid-insert cannot leave them torn.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Live value for `key`, if present and of type `T`.
    pub fn get<T>(&self, key: &CacheKey) -> Option<T>
    where
        T: Clone + 'static,
    {
        let entries = self.lock();
        let entry = entries.get(key)?;
        if !entry.is_live(Instant::now()) {
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    pub fn insert<T>(&self, key: CacheKey, value: T, ttl: Duration)
    where
        T: Send + Sync + 'static,
    {
        if ttl.is_zero() {
            return;
        }
        self.lock().insert(
            key,
            CacheEntry {
                value: Box::new(value),
                stored_at: Instant::now(),
                ttl,
            },
        );

        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % PURGE_EVERY == 0 {
            let purged = self.purge_expired();
            tracing::debug!(purged, "Swept expired cache entries");
        }
    }

    /// Return the live value for `key`, or run `producer` and store its result.
    ///
    /// Producer errors are returned unchanged and nothing is stored.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: CacheKey,
        ttl: Duration,
        producer: F,
    ) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.get_or_compute_if(key, ttl, producer, |_| true).await
    }

    /// Like [`get_or_compute`](Self::get_or_compute), but only stores values
    /// for which `keep` returns true. The value is returned either way.
    pub async fn get_or_compute_if<T, E, F, Fut, P>(
        &self,
        key: CacheKey,
        ttl: Duration,
        producer: F,
        keep: P,
    ) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: FnOnce(&T) -> bool,
    {
        if let Some(value) = self.get::<T>(&key) {
            tracing::debug!(operation = key.operation, "Cache hit");
            return Ok(value);
        }
        tracing::debug!(operation = key.operation, "Cache miss");

        let value = producer().await?;
        if keep(&value) {
            self.insert(key, value.clone(), ttl);
        } else {
            tracing::debug!(operation = key.operation, "Result not cached");
        }
        Ok(value)
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
