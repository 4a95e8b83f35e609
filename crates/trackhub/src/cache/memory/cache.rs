//! In-memory cache implementation with LRU eviction.
//!
//! List keys (`list:{kind}:{scope}`) are tracked per kind so invalidating a
//! kind's lists does not have to scan the whole store.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use trackhub_core::cache::{pattern_matches, Cache, CacheError, Result};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// Returns the `list:{kind}` scope of a list key.
fn list_scope(key: &str) -> Option<&str> {
    if !key.starts_with("list:") {
        return None;
    }
    key.rfind(':').map(|idx| &key[..idx]).filter(|s| *s != "list")
}

/// Returns the `list:{kind}` scope of a `list:{kind}:*` pattern.
fn pattern_scope(pattern: &str) -> Option<&str> {
    pattern
        .strip_suffix(":*")
        .filter(|scope| scope.starts_with("list:") && !scope.contains('*'))
}

/// In-memory cache with LRU eviction and lazy TTL expiration.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    /// `list:{kind}` scope -> list keys currently stored under it.
    tracking: Arc<RwLock<HashMap<String, HashSet<String>>>>,
}

impl MemoryCache {
    /// Creates a cache holding at most `max_entries` values.
    pub fn new(max_entries: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_entries).ok_or_else(|| {
            CacheError::OperationFailed("max_entries must be greater than zero".to_string())
        })?;
        Ok(Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            tracking: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    async fn untrack(&self, key: &str) {
        let Some(scope) = list_scope(key) else {
            return;
        };
        let mut tracking = self.tracking.write().await;
        if let Some(keys) = tracking.get_mut(scope) {
            keys.remove(key);
            if keys.is_empty() {
                tracking.remove(scope);
            }
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // `LruCache::get` promotes the entry, so it needs the write lock.
        let mut store = self.store.write().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => Ok(None),
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        {
            let mut store = self.store.write().await;
            store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        }

        if let Some(scope) = list_scope(key) {
            let mut tracking = self.tracking.write().await;
            tracking
                .entry(scope.to_string())
                .or_default()
                .insert(key.to_string());
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.untrack(key).await;
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let Some(scope) = pattern_scope(pattern) else {
            // Untracked pattern: scan the whole store.
            let keys_to_delete: Vec<String> = {
                let store = self.store.read().await;
                store
                    .iter()
                    .filter(|(key, _)| pattern_matches(pattern, key))
                    .map(|(key, _)| key.clone())
                    .collect()
            };
            for key in keys_to_delete {
                self.delete(&key).await?;
            }
            return Ok(());
        };

        let tracked_keys = {
            let mut tracking = self.tracking.write().await;
            tracking.remove(scope).unwrap_or_default()
        };

        if !tracked_keys.is_empty() {
            let mut store = self.store.write().await;
            for key in &tracked_keys {
                store.pop(key);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackhub_core::cache::{list_key, list_pattern, record_key};
    use trackhub_core::record::RecordKind;
    use uuid::Uuid;

    const TEST_MAX_ENTRIES: usize = 1000;

    fn cache() -> MemoryCache {
        MemoryCache::new(TEST_MAX_ENTRIES).unwrap()
    }

    #[test]
    fn test_scopes() {
        assert_eq!(list_scope("list:trip:all"), Some("list:trip"));
        assert_eq!(list_scope("record:trip:1"), None);
        assert_eq!(list_scope("list:"), None);
        assert_eq!(pattern_scope("list:trip:*"), Some("list:trip"));
        assert_eq!(pattern_scope("record:*"), None);
        assert_eq!(pattern_scope("list:*:*"), None);
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = cache();
        cache.set("test:key", b"test value", None).await.unwrap();

        let result = cache.get("test:key").await.unwrap();
        assert_eq!(result, Some(b"test value".to_vec()));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let cache = cache();
        assert_eq!(cache.get("nonexistent:key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = cache();
        let key = record_key(RecordKind::Vehicle, Uuid::new_v4());

        cache.set(&key, b"to be deleted", None).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        cache.delete(&key).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let cache = cache();
        let key = "test:ttl";

        cache
            .set(key, b"short-lived", Some(Duration::from_millis(50)))
            .await
            .unwrap();
        assert!(cache.get(key).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.get(key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_pattern_only_touches_kind_lists() {
        let cache = cache();
        let vehicle_id = Uuid::new_v4();

        let all_trips = list_key(RecordKind::Trip, None);
        let vehicle_trips = list_key(RecordKind::Trip, Some(vehicle_id));
        let fill_ups = list_key(RecordKind::FillUp, Some(vehicle_id));
        let trip = record_key(RecordKind::Trip, Uuid::new_v4());

        for key in [&all_trips, &vehicle_trips, &fill_ups, &trip] {
            cache.set(key, b"[]", None).await.unwrap();
        }

        cache
            .delete_pattern(&list_pattern(RecordKind::Trip))
            .await
            .unwrap();

        assert!(cache.get(&all_trips).await.unwrap().is_none());
        assert!(cache.get(&vehicle_trips).await.unwrap().is_none());
        assert!(cache.get(&fill_ups).await.unwrap().is_some());
        assert!(cache.get(&trip).await.unwrap().is_some());

        let tracking = cache.tracking.read().await;
        assert!(!tracking.contains_key("list:trip"));
        assert!(tracking.contains_key("list:fill_up"));
    }

    #[tokio::test]
    async fn test_delete_pattern_no_matches() {
        let cache = cache();
        cache.set("user:123", b"value", None).await.unwrap();

        cache
            .delete_pattern(&list_pattern(RecordKind::Invoice))
            .await
            .unwrap();

        assert!(cache.get("user:123").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_list_key_removes_from_tracking() {
        let cache = cache();
        let key = list_key(RecordKind::Project, None);

        cache.set(&key, b"[]", None).await.unwrap();
        assert!(cache.tracking.read().await.contains_key("list:project"));

        cache.delete(&key).await.unwrap();
        assert!(cache.tracking.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_pattern_untracked_falls_back_to_scan() {
        let cache = cache();
        cache.set("user:123:profile", b"value1", None).await.unwrap();
        cache.set("user:456:profile", b"value2", None).await.unwrap();
        cache.set("user:123:settings", b"value3", None).await.unwrap();

        cache.delete_pattern("user:123:*").await.unwrap();

        assert!(cache.get("user:123:profile").await.unwrap().is_none());
        assert!(cache.get("user:123:settings").await.unwrap().is_none());
        assert!(cache.get("user:456:profile").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_overwrite_value() {
        let cache = cache();
        cache.set("test:overwrite", b"first", None).await.unwrap();
        cache.set("test:overwrite", b"second", None).await.unwrap();

        let result = cache.get("test:overwrite").await.unwrap();
        assert_eq!(result, Some(b"second".to_vec()));
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let cache = MemoryCache::new(3).unwrap();

        cache.set("key1", b"value1", None).await.unwrap();
        cache.set("key2", b"value2", None).await.unwrap();
        cache.set("key3", b"value3", None).await.unwrap();

        // key1 becomes most recently used
        cache.get("key1").await.unwrap();

        cache.set("key4", b"value4", None).await.unwrap();

        assert!(cache.get("key1").await.unwrap().is_some());
        assert!(cache.get("key2").await.unwrap().is_none());
        assert!(cache.get("key3").await.unwrap().is_some());
        assert!(cache.get("key4").await.unwrap().is_some());
    }

    #[test]
    fn test_zero_max_entries_is_an_error() {
        assert!(matches!(
            MemoryCache::new(0),
            Err(CacheError::OperationFailed(_))
        ));
    }
}
