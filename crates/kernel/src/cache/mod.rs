//! Query cache with stale time, in-flight de-duplication and retry.
//!
//! Responses are stored as JSON strings in a Moka cache whose TTL is the
//! stale time. Concurrent misses for the same key share one fetch through
//! `try_get_with`; failed fetches are never cached.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

/// Default stale time (5 minutes).
pub const DEFAULT_STALE_SECS: u64 = 300;

/// Default maximum number of cached responses.
pub const DEFAULT_MAX_CAPACITY: u64 = 1_000;

/// Bounded exponential backoff for transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Never retry.
    pub const fn none() -> Self {
        Self {
            attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (0-based): `min(base * 2^attempt, max)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }
}

/// Run `op`, retrying retryable failures per `policy`.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, what: &str, mut op: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt + 1 < policy.attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    what = %what,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "fetch failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Cache key for one resource operation with its parameters.
///
/// Parameters that cannot be written as JSON are an error rather than an
/// empty key segment, so distinct queries never share an entry.
pub fn cache_key(resource: &str, operation: &str, params: &impl Serialize) -> AppResult<String> {
    let params = serde_json::to_string(params)?;
    Ok(format!("{resource}:{operation}:{params}"))
}

/// Shared query cache.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<QueryCacheInner>,
}

struct QueryCacheInner {
    entries: Cache<String, String>,
    retry: RetryPolicy,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl QueryCache {
    pub fn new(stale_time: Duration, max_capacity: u64, retry: RetryPolicy) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(stale_time)
            .build();

        Self {
            inner: Arc::new(QueryCacheInner {
                entries,
                retry,
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
        }
    }

    /// Return the cached value for `key`, or fetch it.
    ///
    /// Callers racing on the same missing key wait for a single fetch and
    /// all receive its result, success or failure.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: String, fetch: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Some(json) = self.inner.entries.get(&key).await {
            match serde_json::from_str(&json) {
                Ok(value) => {
                    self.inner.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(key = %key, "query cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "dropping unreadable cache entry");
                    self.inner.entries.invalidate(&key).await;
                }
            }
        }

        self.inner.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "query cache miss");

        let retry = self.inner.retry;
        let what = key.split(':').next().unwrap_or_default().to_string();
        let json = self
            .inner
            .entries
            .try_get_with(key, async move {
                let value = with_retry(retry, &what, fetch).await?;
                serde_json::to_string(&value).map_err(AppError::from)
            })
            .await
            .map_err(Arc::unwrap_or_clone)?;

        Ok(serde_json::from_str(&json)?)
    }

    /// Drop every entry whose key starts with `prefix`.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let keys: Vec<Arc<String>> = self
            .inner
            .entries
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k)
            .collect();

        for key in &keys {
            self.inner.entries.invalidate(key.as_str()).await;
        }

        debug!(prefix = %prefix, keys_invalidated = keys.len(), "cache prefix invalidated");
    }

    /// Get cache statistics (for monitoring).
    pub async fn stats(&self) -> CacheStats {
        self.inner.entries.run_pending_tasks().await;
        CacheStats {
            entry_count: self.inner.entries.entry_count(),
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entry_count: u64,
    pub hits: u64,
    pub misses: u64,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("retry", &self.inner.retry)
            .finish()
    }
}
