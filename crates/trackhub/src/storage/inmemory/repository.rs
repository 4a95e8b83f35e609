//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use trackhub_core::record::Record;
use trackhub_core::storage::{Repository, RepositoryError, Result};

/// In-memory storage for one record type.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    records: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn get(&self, id: Uuid) -> Result<Option<T>> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn list(&self, parent_id: Option<Uuid>) -> Result<Vec<T>> {
        let records = self.records.read().await;
        let mut listed: Vec<T> = records
            .values()
            .filter(|r| parent_id.is_none() || r.parent_id() == parent_id)
            .cloned()
            .collect();
        listed.sort_by_key(|r| (r.created_at(), r.id()));
        Ok(listed)
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
        let mut records = self.records.write().await;
        if !records.contains_key(&record.id()) {
            return Err(RepositoryError::not_found(T::KIND, record.id()));
        }
        records.insert(record.id(), record.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut records = self.records.write().await;
        if records.remove(&id).is_none() {
            return Err(RepositoryError::not_found(T::KIND, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;
    use trackhub_core::fuel::{FillUp, Vehicle};

    fn fill_up(vehicle_id: Uuid, odometer: i64) -> FillUp {
        FillUp::new(
            vehicle_id,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Decimal::from(odometer),
            Decimal::from(10),
            Decimal::from(3),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryRepository::<Vehicle>::new();
        let vehicle = Vehicle::new("Toyota", "Camry", 2020);

        repo.create(&vehicle).await.unwrap();

        let fetched = repo.get(vehicle.id).await.unwrap().unwrap();
        assert_eq!(fetched, vehicle);
        assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let repo = InMemoryRepository::<Vehicle>::new();
        let vehicle = Vehicle::new("Toyota", "Camry", 2020);
        repo.create(&vehicle).await.unwrap();

        let result = repo.create(&vehicle).await;
        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "Vehicle",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_update_missing_fails() {
        let repo = InMemoryRepository::<Vehicle>::new();
        let result = repo.update(&Vehicle::new("Honda", "Civic", 2019)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let repo = InMemoryRepository::<Vehicle>::new();
        let mut vehicle = Vehicle::new("Honda", "Civic", 2019);
        repo.create(&vehicle).await.unwrap();

        vehicle.is_active = false;
        repo.update(&vehicle).await.unwrap();

        assert!(!repo.get(vehicle.id).await.unwrap().unwrap().is_active);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryRepository::<Vehicle>::new();
        let vehicle = Vehicle::new("Honda", "Civic", 2019);
        repo.create(&vehicle).await.unwrap();

        repo.delete(vehicle.id).await.unwrap();
        assert!(repo.get(vehicle.id).await.unwrap().is_none());

        let result = repo.delete(vehicle.id).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_filters_by_parent_and_orders_by_creation() {
        let repo = InMemoryRepository::<FillUp>::new();
        let vehicle_a = Uuid::new_v4();
        let vehicle_b = Uuid::new_v4();

        let mut first = fill_up(vehicle_a, 100);
        let mut second = fill_up(vehicle_a, 200);
        let other = fill_up(vehicle_b, 300);
        second.created_at = first.created_at + Duration::seconds(5);
        first.created_at -= Duration::seconds(5);

        repo.create(&second).await.unwrap();
        repo.create(&other).await.unwrap();
        repo.create(&first).await.unwrap();

        let listed = repo.list(Some(vehicle_a)).await.unwrap();
        assert_eq!(
            listed.iter().map(|f| f.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );

        assert_eq!(repo.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryRepository::<Vehicle>::new();
        let clone = repo.clone();
        let vehicle = Vehicle::new("Kia", "Rio", 2018);

        clone.create(&vehicle).await.unwrap();
        assert!(repo.get(vehicle.id).await.unwrap().is_some());
    }
}
