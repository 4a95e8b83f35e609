//! Cached repository decorator.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use trackhub_core::cache::{decode, encode, list_key, list_pattern, record_key, Cache, ChangePubSub};
use trackhub_core::events::ChangeEvent;
use trackhub_core::record::Record;
use trackhub_core::storage::{Repository, Result};

/// Cache-aside decorator over a repository of one record kind.
///
/// Cache and publish failures are logged and never fail the operation: the
/// wrapped repository stays the source of truth.
pub struct CachedRepository<T: Record> {
    repository: Arc<dyn Repository<T>>,
    cache: Arc<dyn Cache>,
    pubsub: Arc<dyn ChangePubSub>,
    ttl: Duration,
}

impl<T: Record> CachedRepository<T> {
    /// Creates a new cached repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    /// * `pubsub` - Where change events are published after writes
    /// * `ttl` - Time-to-live for cached records and lists
    pub fn new(
        repository: Arc<dyn Repository<T>>,
        cache: Arc<dyn Cache>,
        pubsub: Arc<dyn ChangePubSub>,
        ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            pubsub,
            ttl,
        }
    }

    async fn cache_value<V: serde::Serialize + ?Sized>(&self, key: &str, value: &V) {
        match encode(value) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(key, &bytes, Some(self.ttl)).await {
                    tracing::warn!(key, error = %err, "Failed to populate cache");
                }
            }
            Err(err) => tracing::warn!(key, error = %err, "Failed to encode cache value"),
        }
    }

    /// Drops the record key and every cached list of the kind.
    async fn invalidate(&self, id: Uuid) {
        let key = record_key(T::KIND, id);
        if let Err(err) = self.cache.delete(&key).await {
            tracing::warn!(kind = %T::KIND, %id, error = %err, "Failed to invalidate record cache");
        }

        let pattern = list_pattern(T::KIND);
        if let Err(err) = self.cache.delete_pattern(&pattern).await {
            tracing::warn!(kind = %T::KIND, error = %err, "Failed to invalidate list cache");
        }
    }

    async fn publish(&self, event: ChangeEvent) {
        if let Err(err) = self.pubsub.publish(&event).await {
            tracing::warn!(
                kind = %event.kind,
                id = %event.id,
                error = %err,
                "Failed to publish {} event",
                event.event_type()
            );
        }
    }
}

#[async_trait]
impl<T: Record> Repository<T> for CachedRepository<T> {
    async fn get(&self, id: Uuid) -> Result<Option<T>> {
        let cache_key = record_key(T::KIND, id);

        if let Ok(Some(bytes)) = self.cache.get(&cache_key).await {
            match decode::<T>(&bytes) {
                Ok(record) => {
                    tracing::trace!(kind = %T::KIND, %id, "Cache hit for record");
                    return Ok(Some(record));
                }
                // Treat as a miss.
                Err(err) => {
                    tracing::warn!(
                        kind = %T::KIND,
                        %id,
                        error = %err,
                        "Cached record decoding failed"
                    )
                }
            }
        }

        tracing::trace!(kind = %T::KIND, %id, "Cache miss for record");
        let record = self.repository.get(id).await?;

        if let Some(ref r) = record {
            self.cache_value(&cache_key, r).await;
        }

        Ok(record)
    }

    async fn list(&self, parent_id: Option<Uuid>) -> Result<Vec<T>> {
        let cache_key = list_key(T::KIND, parent_id);

        if let Ok(Some(bytes)) = self.cache.get(&cache_key).await {
            match decode::<Vec<T>>(&bytes) {
                Ok(records) => {
                    tracing::trace!(
                        kind = %T::KIND,
                        parent_id = ?parent_id,
                        count = records.len(),
                        "Cache hit for list"
                    );
                    return Ok(records);
                }
                Err(err) => {
                    tracing::warn!(kind = %T::KIND, error = %err, "Cached list decoding failed")
                }
            }
        }

        tracing::trace!(kind = %T::KIND, parent_id = ?parent_id, "Cache miss for list");
        let records = self.repository.list(parent_id).await?;
        self.cache_value(&cache_key, &records).await;

        Ok(records)
    }

    async fn create(&self, record: &T) -> Result<()> {
        self.repository.create(record).await?;

        self.invalidate(record.id()).await;
        self.publish(ChangeEvent::created(record)).await;

        tracing::debug!(kind = %T::KIND, id = %record.id(), "Record created");
        Ok(())
    }

    async fn update(&self, record: &T) -> Result<()> {
        self.repository.update(record).await?;

        self.invalidate(record.id()).await;
        self.publish(ChangeEvent::updated(record)).await;

        tracing::debug!(kind = %T::KIND, id = %record.id(), "Record updated");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // The parent id rides along on the event so scoped subscribers can
        // refetch the right list.
        let parent_id = match self.repository.get(id).await {
            Ok(record) => record.and_then(|r| r.parent_id()),
            Err(_) => None,
        };

        self.repository.delete(id).await?;

        self.invalidate(id).await;
        self.publish(ChangeEvent::deleted(T::KIND, id, parent_id))
            .await;

        tracing::debug!(kind = %T::KIND, %id, "Record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tokio::sync::{broadcast, RwLock};

    use trackhub_core::cache::{pattern_matches, CacheError, Result as CacheResult};
    use trackhub_core::events::ChangeAction;
    use trackhub_core::fuel::{FillUp, Vehicle};
    use trackhub_core::record::RecordKind;
    use trackhub_core::storage::RepositoryError;

    // Mock repository that tracks calls
    struct MockRepository<T> {
        records: RwLock<HashMap<Uuid, T>>,
        get_calls: AtomicUsize,
        list_calls: AtomicUsize,
    }

    impl<T: Record> MockRepository<T> {
        fn new() -> Self {
            Self {
                records: RwLock::new(HashMap::new()),
                get_calls: AtomicUsize::new(0),
                list_calls: AtomicUsize::new(0),
            }
        }

        async fn insert(&self, record: T) {
            self.records.write().await.insert(record.id(), record);
        }
    }

    #[async_trait]
    impl<T: Record> Repository<T> for MockRepository<T> {
        async fn get(&self, id: Uuid) -> Result<Option<T>> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.read().await.get(&id).cloned())
        }

        async fn list(&self, parent_id: Option<Uuid>) -> Result<Vec<T>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .records
                .read()
                .await
                .values()
                .filter(|r| parent_id.is_none() || r.parent_id() == parent_id)
                .cloned()
                .collect())
        }

        async fn create(&self, record: &T) -> Result<()> {
            let mut records = self.records.write().await;
            if records.contains_key(&record.id()) {
                return Err(RepositoryError::already_exists(T::KIND, record.id()));
            }
            records.insert(record.id(), record.clone());
            Ok(())
        }

        async fn update(&self, record: &T) -> Result<()> {
            self.records
                .write()
                .await
                .insert(record.id(), record.clone());
            Ok(())
        }

        async fn delete(&self, id: Uuid) -> Result<()> {
            self.records
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| RepositoryError::not_found(T::KIND, id))
        }
    }

    // Mock cache
    struct MockCache {
        store: RwLock<HashMap<String, Vec<u8>>>,
        fail_writes: bool,
    }

    impl MockCache {
        fn new() -> Self {
            Self {
                store: RwLock::new(HashMap::new()),
                fail_writes: false,
            }
        }

        fn failing() -> Self {
            Self {
                store: RwLock::new(HashMap::new()),
                fail_writes: true,
            }
        }

        async fn contains(&self, key: &str) -> bool {
            self.store.read().await.contains_key(key)
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            Ok(self.store.read().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
            if self.fail_writes {
                return Err(CacheError::ConnectionFailed("cache down".to_string()));
            }
            self.store
                .write()
                .await
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn delete(&self, key: &str) -> CacheResult<()> {
            if self.fail_writes {
                return Err(CacheError::ConnectionFailed("cache down".to_string()));
            }
            self.store.write().await.remove(key);
            Ok(())
        }

        async fn delete_pattern(&self, pattern: &str) -> CacheResult<()> {
            if self.fail_writes {
                return Err(CacheError::ConnectionFailed("cache down".to_string()));
            }
            self.store
                .write()
                .await
                .retain(|k, _| !pattern_matches(pattern, k));
            Ok(())
        }
    }

    // Mock pub/sub that records published events
    struct MockPubSub {
        published: RwLock<Vec<ChangeEvent>>,
        fail: bool,
    }

    impl MockPubSub {
        fn new() -> Self {
            Self {
                published: RwLock::new(Vec::new()),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl ChangePubSub for MockPubSub {
        async fn publish(&self, event: &ChangeEvent) -> CacheResult<()> {
            if self.fail {
                return Err(CacheError::PublishFailed("no broker".to_string()));
            }
            self.published.write().await.push(event.clone());
            Ok(())
        }

        async fn subscribe(
            &self,
            _kind: RecordKind,
        ) -> CacheResult<broadcast::Receiver<ChangeEvent>> {
            let (_tx, rx) = broadcast::channel(1);
            Ok(rx)
        }
    }

    struct Fixture<T: Record> {
        repo: Arc<MockRepository<T>>,
        cache: Arc<MockCache>,
        pubsub: Arc<MockPubSub>,
        cached: CachedRepository<T>,
    }

    fn fixture<T: Record>(cache: MockCache, pubsub: MockPubSub) -> Fixture<T> {
        let repo = Arc::new(MockRepository::<T>::new());
        let cache = Arc::new(cache);
        let pubsub = Arc::new(pubsub);
        let cached = CachedRepository::new(
            repo.clone(),
            cache.clone(),
            pubsub.clone(),
            Duration::from_secs(300),
        );
        Fixture {
            repo,
            cache,
            pubsub,
            cached,
        }
    }

    fn fill_up(vehicle_id: Uuid) -> FillUp {
        FillUp::new(
            vehicle_id,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Decimal::from(25000),
            Decimal::from(10),
            Decimal::from(3),
        )
    }

    #[tokio::test]
    async fn test_get_cache_miss_then_hit() {
        let f = fixture::<Vehicle>(MockCache::new(), MockPubSub::new());
        let vehicle = Vehicle::new("Toyota", "Camry", 2020);
        f.repo.insert(vehicle.clone()).await;

        let first = f.cached.get(vehicle.id).await.unwrap();
        assert_eq!(first.map(|v| v.id), Some(vehicle.id));
        assert_eq!(f.repo.get_calls.load(Ordering::SeqCst), 1);
        assert!(f.cache.contains(&record_key(RecordKind::Vehicle, vehicle.id)).await);

        let second = f.cached.get(vehicle.id).await.unwrap();
        assert_eq!(second.map(|v| v.id), Some(vehicle.id));
        assert_eq!(f.repo.get_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_cached() {
        let f = fixture::<Vehicle>(MockCache::new(), MockPubSub::new());
        let id = Uuid::new_v4();

        assert!(f.cached.get(id).await.unwrap().is_none());
        assert!(!f.cache.contains(&record_key(RecordKind::Vehicle, id)).await);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_falls_back_to_repository() {
        let f = fixture::<Vehicle>(MockCache::new(), MockPubSub::new());
        let vehicle = Vehicle::new("Honda", "Civic", 2019);
        f.repo.insert(vehicle.clone()).await;
        f.cache
            .set(&record_key(RecordKind::Vehicle, vehicle.id), b"not json", None)
            .await
            .unwrap();

        let fetched = f.cached.get(vehicle.id).await.unwrap();
        assert_eq!(fetched.map(|v| v.make), Some("Honda".to_string()));
        assert_eq!(f.repo.get_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_list_is_cached_per_parent() {
        let f = fixture::<FillUp>(MockCache::new(), MockPubSub::new());
        let vehicle_id = Uuid::new_v4();
        f.repo.insert(fill_up(vehicle_id)).await;
        f.repo.insert(fill_up(Uuid::new_v4())).await;

        assert_eq!(f.cached.list(Some(vehicle_id)).await.unwrap().len(), 1);
        assert_eq!(f.cached.list(Some(vehicle_id)).await.unwrap().len(), 1);
        assert_eq!(f.repo.list_calls.load(Ordering::SeqCst), 1);

        assert_eq!(f.cached.list(None).await.unwrap().len(), 2);
        assert_eq!(f.repo.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_create_invalidates_lists_and_publishes() {
        let f = fixture::<FillUp>(MockCache::new(), MockPubSub::new());
        let vehicle_id = Uuid::new_v4();

        f.cached.list(Some(vehicle_id)).await.unwrap();
        f.cached.list(None).await.unwrap();

        let record = fill_up(vehicle_id);
        f.cached.create(&record).await.unwrap();

        assert!(!f.cache.contains(&list_key(RecordKind::FillUp, Some(vehicle_id))).await);
        assert!(!f.cache.contains(&list_key(RecordKind::FillUp, None)).await);

        let published = f.pubsub.published.read().await;
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].action, ChangeAction::Created);
        assert_eq!(published[0].id, record.id);
        assert_eq!(published[0].parent_id, Some(vehicle_id));
        assert!(published[0].record.is_some());
    }

    #[tokio::test]
    async fn test_failed_create_publishes_nothing() {
        let f = fixture::<Vehicle>(MockCache::new(), MockPubSub::new());
        let vehicle = Vehicle::new("Kia", "Rio", 2018);
        f.repo.insert(vehicle.clone()).await;

        let result = f.cached.create(&vehicle).await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
        assert!(f.pubsub.published.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_invalidates_record_key() {
        let f = fixture::<Vehicle>(MockCache::new(), MockPubSub::new());
        let mut vehicle = Vehicle::new("Ford", "Focus", 2015);
        f.repo.insert(vehicle.clone()).await;
        f.cached.get(vehicle.id).await.unwrap();

        vehicle.is_active = false;
        f.cached.update(&vehicle).await.unwrap();

        assert!(!f.cache.contains(&record_key(RecordKind::Vehicle, vehicle.id)).await);
        let fetched = f.cached.get(vehicle.id).await.unwrap().unwrap();
        assert!(!fetched.is_active);
        assert_eq!(
            f.pubsub.published.read().await[0].action,
            ChangeAction::Updated
        );
    }

    #[tokio::test]
    async fn test_delete_publishes_parent_id() {
        let f = fixture::<FillUp>(MockCache::new(), MockPubSub::new());
        let vehicle_id = Uuid::new_v4();
        let record = fill_up(vehicle_id);
        f.repo.insert(record.clone()).await;

        f.cached.delete(record.id).await.unwrap();

        let published = f.pubsub.published.read().await;
        assert_eq!(published[0].action, ChangeAction::Deleted);
        assert_eq!(published[0].parent_id, Some(vehicle_id));
        assert!(published[0].record.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_propagates_not_found() {
        let f = fixture::<Vehicle>(MockCache::new(), MockPubSub::new());
        let result = f.cached.delete(Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert!(f.pubsub.published.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_cache_and_publish_failures_do_not_fail_writes() {
        let pubsub = MockPubSub {
            published: RwLock::new(Vec::new()),
            fail: true,
        };
        let f = fixture::<Vehicle>(MockCache::failing(), pubsub);
        let vehicle = Vehicle::new("Mazda", "3", 2021);

        f.cached.create(&vehicle).await.unwrap();
        assert_eq!(f.cached.get(vehicle.id).await.unwrap().map(|v| v.id), Some(vehicle.id));
        f.cached.delete(vehicle.id).await.unwrap();
        assert!(f.repo.records.read().await.is_empty());
    }
}
