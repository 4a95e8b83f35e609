pub mod error;
pub mod events;
pub mod freelance;
pub mod fuel;
pub mod health;
pub mod maintenance;
pub mod records;

pub use error::AppError;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;
    use uuid::Uuid;

    use trackhub_core::record::Record;
    use trackhub_core::storage::{Repository, RepositoryError, Result};

    /// Delegates to `inner` but fails every `create`.
    pub struct FailingCreate<T: Record>(pub Arc<dyn Repository<T>>);

    #[async_trait]
    impl<T: Record> Repository<T> for FailingCreate<T> {
        async fn get(&self, id: Uuid) -> Result<Option<T>> {
            self.0.get(id).await
        }

        async fn list(&self, parent_id: Option<Uuid>) -> Result<Vec<T>> {
            self.0.list(parent_id).await
        }

        async fn create(&self, _record: &T) -> Result<()> {
            Err(RepositoryError::ConnectionFailed("store unavailable".to_string()))
        }

        async fn update(&self, record: &T) -> Result<()> {
            self.0.update(record).await
        }

        async fn delete(&self, id: Uuid) -> Result<()> {
            self.0.delete(id).await
        }
    }
}
