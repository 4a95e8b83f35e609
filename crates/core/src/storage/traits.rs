use async_trait::async_trait;
use uuid::Uuid;

use crate::record::Record;

use super::Result;

/// Storage for one kind of record.
///
/// Implemented once per backend, generically over every [`Record`] type.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Gets a record by its ID.
    async fn get(&self, id: Uuid) -> Result<Option<T>>;

    /// Lists records, optionally restricted to those owned by `parent_id`.
    ///
    /// Results are ordered by creation time.
    async fn list(&self, parent_id: Option<Uuid>) -> Result<Vec<T>>;

    /// Creates a new record. Fails with `AlreadyExists` on a duplicate ID.
    async fn create(&self, record: &T) -> Result<()>;

    /// Updates an existing record. Fails with `NotFound` if it is missing.
    async fn update(&self, record: &T) -> Result<()>;

    /// Deletes a record by its ID. Fails with `NotFound` if it is missing.
    async fn delete(&self, id: Uuid) -> Result<()>;
}
