//! SQLite repository implementation.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use trackhub_core::record::Record;
use trackhub_core::storage::{Repository, RepositoryError, Result};

use super::conversions::{encode_body, format_datetime, row_to_record};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Opens (creating if needed) a database file and applies the schema.
pub async fn open_connection(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)
        .await
        .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
    init_schema(&conn).await?;
    Ok(conn)
}

/// Opens a private in-memory database. Data is lost when the connection drops.
#[cfg(test)]
async fn open_in_memory_connection() -> Result<Connection> {
    let conn = Connection::open_in_memory()
        .await
        .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
    init_schema(&conn).await?;
    Ok(conn)
}

async fn init_schema(conn: &Connection) -> Result<()> {
    conn.call(|conn| {
        conn.execute_batch(schema::CREATE_TABLES)
            .map_err(wrap_err)?;
        Ok(())
    })
    .await
    .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
}

/// SQLite storage for one record type.
///
/// Repositories for different kinds share a [`Connection`]; rows are
/// partitioned by the `kind` column.
pub struct SqliteRepository<T> {
    conn: Connection,
    _record: PhantomData<fn() -> T>,
}

impl<T> SqliteRepository<T> {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Record> Repository<T> for SqliteRepository<T> {
    async fn get(&self, id: Uuid) -> Result<Option<T>> {
        let kind = T::KIND.as_str();
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_RECORD_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([kind, id_str.as_str()], row_to_record::<T>) {
                    Ok(record) => Ok(Some(record)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, T::KIND, id.to_string()))
    }

    async fn list(&self, parent_id: Option<Uuid>) -> Result<Vec<T>> {
        let kind = T::KIND.as_str();
        let parent = parent_id.map(|id| id.to_string());

        self.conn
            .call(move |conn| {
                let mut records = Vec::new();
                match parent {
                    Some(parent) => {
                        let mut stmt = conn
                            .prepare(schema::SELECT_RECORDS_BY_PARENT)
                            .map_err(wrap_err)?;
                        let rows = stmt
                            .query_map([kind, parent.as_str()], row_to_record::<T>)
                            .map_err(wrap_err)?;
                        for row_result in rows {
                            records.push(row_result.map_err(wrap_err)?);
                        }
                    }
                    None => {
                        let mut stmt = conn
                            .prepare(schema::SELECT_RECORDS_BY_KIND)
                            .map_err(wrap_err)?;
                        let rows = stmt
                            .query_map([kind], row_to_record::<T>)
                            .map_err(wrap_err)?;
                        for row_result in rows {
                            records.push(row_result.map_err(wrap_err)?);
                        }
                    }
                }
                Ok(records)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, T::KIND, "*"))
    }

    async fn create(&self, record: &T) -> Result<()> {
        let kind = T::KIND.as_str();
        let id = record.id().to_string();
        let parent_id = record.parent_id().map(|p| p.to_string());
        let body = encode_body(record)?;
        let created_at = format_datetime(&record.created_at());
        let updated_at = format_datetime(&Utc::now());
        let record_id = id.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_RECORD,
                    rusqlite::params![kind, id, parent_id, body, created_at, updated_at],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, T::KIND, record_id))
    }

    async fn update(&self, record: &T) -> Result<()> {
        let kind = T::KIND.as_str();
        let id = record.id().to_string();
        let parent_id = record.parent_id().map(|p| p.to_string());
        let body = encode_body(record)?;
        let updated_at = format_datetime(&Utc::now());
        let record_id = id.clone();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_RECORD,
                        rusqlite::params![kind, id, parent_id, body, updated_at],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, T::KIND, record_id))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let kind = T::KIND.as_str();
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_RECORD, rusqlite::params![kind, id_str])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, T::KIND, id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;
    use trackhub_core::fuel::{FillUp, Vehicle};
    use trackhub_core::maintenance::Contractor;

    async fn conn() -> Connection {
        open_in_memory_connection().await.unwrap()
    }

    fn fill_up(vehicle_id: Uuid, odometer: i64) -> FillUp {
        FillUp::new(
            vehicle_id,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Decimal::from(odometer),
            "12.5".parse().unwrap(),
            "3.45".parse().unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = SqliteRepository::<Vehicle>::new(conn().await);
        let vehicle = Vehicle::new("Toyota", "Camry", 2020);

        repo.create(&vehicle).await.unwrap();

        assert_eq!(repo.get(vehicle.id).await.unwrap(), Some(vehicle));
        assert_eq!(repo.get(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_decimal_fields_survive_storage() {
        let repo = SqliteRepository::<FillUp>::new(conn().await);
        let fill_up = fill_up(Uuid::new_v4(), 25000);

        repo.create(&fill_up).await.unwrap();

        let fetched = repo.get(fill_up.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_cost, "43.125".parse::<Decimal>().unwrap());
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let repo = SqliteRepository::<Vehicle>::new(conn().await);
        let vehicle = Vehicle::new("Toyota", "Camry", 2020);
        repo.create(&vehicle).await.unwrap();

        let result = repo.create(&vehicle).await;
        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "Vehicle",
                id: vehicle.id.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_same_id_in_different_kinds() {
        let conn = conn().await;
        let vehicles = SqliteRepository::<Vehicle>::new(conn.clone());
        let contractors = SqliteRepository::<Contractor>::new(conn);
        let id = Uuid::new_v4();

        vehicles
            .create(&Vehicle::new("Honda", "Civic", 2019).with_id(id))
            .await
            .unwrap();
        contractors
            .create(&Contractor::new("Smith Plumbing").with_id(id))
            .await
            .unwrap();

        assert_eq!(vehicles.list(None).await.unwrap().len(), 1);
        assert_eq!(contractors.list(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = SqliteRepository::<Vehicle>::new(conn().await);
        let vehicle = Vehicle::new("Kia", "Rio", 2018);

        assert!(matches!(
            repo.update(&vehicle).await,
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(vehicle.id).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_then_delete() {
        let repo = SqliteRepository::<Vehicle>::new(conn().await);
        let mut vehicle = Vehicle::new("Kia", "Rio", 2018);
        repo.create(&vehicle).await.unwrap();

        vehicle.license_plate = Some("XYZ987".to_string());
        repo.update(&vehicle).await.unwrap();
        let fetched = repo.get(vehicle.id).await.unwrap().unwrap();
        assert_eq!(fetched.license_plate.as_deref(), Some("XYZ987"));

        repo.delete(vehicle.id).await.unwrap();
        assert!(repo.get(vehicle.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_parent_ordered_by_creation() {
        let repo = SqliteRepository::<FillUp>::new(conn().await);
        let vehicle_id = Uuid::new_v4();

        let mut first = fill_up(vehicle_id, 100);
        first.created_at -= Duration::minutes(1);
        let second = fill_up(vehicle_id, 200);
        let other = fill_up(Uuid::new_v4(), 300);

        repo.create(&second).await.unwrap();
        repo.create(&other).await.unwrap();
        repo.create(&first).await.unwrap();

        let listed = repo.list(Some(vehicle_id)).await.unwrap();
        assert_eq!(
            listed.iter().map(|f| f.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );
        assert_eq!(repo.list(None).await.unwrap().len(), 3);
    }
}
