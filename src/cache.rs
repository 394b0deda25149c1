use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::error::{PanelError, Result};

/// Upper bound on cached lookup records per cache.
const MAX_ENTRIES: u64 = 10_000;

/// Key/value cache with a fixed time-to-live per entry.
///
/// Holds lookup data (entity, tenant and user names) that pages accumulate
/// across tenant switches. List pages themselves are never cached.
#[derive(Debug, Clone)]
pub struct LookupCache<V: Clone + Send + Sync + 'static> {
    cache: Cache<String, V>,
}

impl<V: Clone + Send + Sync + 'static> LookupCache<V> {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Live value for `key`.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.cache.insert(key.into(), value).await;
    }

    /// Cached value for `key`, or the result of `init`, which is stored on
    /// success. Concurrent callers for one key share a single `init`; errors
    /// are not cached.
    pub async fn get_or_try_insert<F>(&self, key: impl Into<String>, init: F) -> Result<V>
    where
        F: Future<Output = Result<V>>,
    {
        self.cache
            .try_get_with(key.into(), init)
            .await
            .map_err(unshare)
    }

    /// Drop every entry whose key starts with `prefix`. Returns how many
    /// were removed.
    pub async fn invalidate_prefix(&self, prefix: &str) -> u64 {
        let keys: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.to_string())
            .collect();
        for key in &keys {
            self.cache.invalidate(key).await;
        }
        debug!(prefix, count = keys.len(), "invalidated lookup entries");
        keys.len() as u64
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Number of live entries, after expired ones are evicted.
    pub async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Recover an owned error from one shared between coalesced callers.
fn unshare(err: Arc<PanelError>) -> PanelError {
    Arc::try_unwrap(err).unwrap_or_else(|shared| match shared.as_ref() {
        PanelError::Http { status, message } => PanelError::Http {
            status: *status,
            message: message.clone(),
        },
        PanelError::Unauthorized => PanelError::Unauthorized,
        PanelError::Application(message) => PanelError::Application(message.clone()),
        PanelError::NotFound(what) => PanelError::NotFound(what.clone()),
        PanelError::Validation(fields) => PanelError::Validation(fields.clone()),
        PanelError::Cancelled => PanelError::Cancelled,
        PanelError::Config(message) => PanelError::Config(message.clone()),
        other => PanelError::Application(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_expired_entries_are_evicted() {
        let cache = LookupCache::new(Duration::from_millis(50));
        for i in 0..1000 {
            cache.insert(format!("tenant_{i}"), i).await;
        }
        assert_eq!(cache.get("tenant_7").await, Some(7));

        tokio::time::sleep(Duration::from_millis(120)).await;
        cache.insert("tenant_new", 1).await;

        assert_eq!(cache.get("tenant_7").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalidate_prefix() {
        let cache = LookupCache::new(Duration::from_secs(60));
        cache.insert("user_1", 1).await;
        cache.insert("user_2", 2).await;
        cache.insert("tenant_1", 3).await;

        assert_eq!(cache.invalidate_prefix("user_").await, 2);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("tenant_1").await, Some(3));

        cache.clear();
        assert!(cache.get("tenant_1").await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_or_try_insert_caches_success_only() {
        let cache: LookupCache<String> = LookupCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        let err = cache
            .get_or_try_insert("entity_4", async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(PanelError::NotFound("entity 4".into()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PanelError::NotFound(_)));

        for _ in 0..2 {
            let name = cache
                .get_or_try_insert("entity_4", async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("Acme".to_string())
                })
                .await
                .unwrap();
            assert_eq!(name, "Acme");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
