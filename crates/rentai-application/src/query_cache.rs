//! Result cache for search and detail queries.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use rentai_core::{RentaiError, Result};
use tokio::sync::RwLock;

/// In-memory cache of query results keyed by their parameters.
///
/// Entries live as long as the cache; nothing is refetched on its own.
pub struct QueryCache<T> {
    entries: Arc<RwLock<HashMap<String, Arc<T>>>>,
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<T>> {
        let entries = self.entries.read().await;
        entries.get(key).cloned()
    }

    pub async fn insert(&self, key: String, value: Arc<T>) {
        let mut entries = self.entries.write().await;
        entries.insert(key, value);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Returns the cached value for `key`, or runs `fetch` and caches its
    /// result.
    ///
    /// A failed fetch is retried up to `retries` more times. Failures are not
    /// cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, retries: u32, fetch: F) -> Result<Arc<T>>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.get(key).await {
            tracing::debug!("[QueryCache] Hit for '{}'", key);
            return Ok(hit);
        }

        let mut attempt = 0;
        let value = loop {
            match fetch().await {
                Ok(value) => break value,
                Err(e) if attempt < retries && is_retryable(&e) => {
                    attempt += 1;
                    tracing::warn!("[QueryCache] '{}' failed ({}), retry {}", key, e, attempt);
                }
                Err(e) => return Err(e),
            }
        };

        let value = Arc::new(value);
        self.insert(key.to_string(), value.clone()).await;
        Ok(value)
    }
}

/// A 401 already cleared the session and a 404 will not change on retry.
fn is_retryable(error: &RentaiError) -> bool {
    !error.is_unauthorized() && !error.is_not_found()
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let cache = QueryCache::new();
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let fetch = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, RentaiError>(7)
        };

        assert_eq!(*cache.get_or_fetch("a", 1, fetch).await.unwrap(), 7);
        assert_eq!(*cache.get_or_fetch("a", 1, fetch).await.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_once_then_gives_up() {
        let cache: QueryCache<u32> = QueryCache::new();
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = cache
            .get_or_fetch("k", 1, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(RentaiError::network("down"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let cache = QueryCache::new();
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let value = cache
            .get_or_fetch("k", 1, move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(RentaiError::http(503, "busy"))
                } else {
                    Ok("ok")
                }
            })
            .await
            .unwrap();
        assert_eq!(*value, "ok");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let cache: QueryCache<u32> = QueryCache::new();
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let _ = cache
            .get_or_fetch("k", 3, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(RentaiError::Unauthorized)
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
