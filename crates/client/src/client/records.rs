//! Generic CRUD operations, one set of routes per record kind.

use serde::Serialize;
use uuid::Uuid;

use trackhub_core::record::{Record, RecordKind};

use super::TrackhubClient;
use crate::error::Result;

/// URL segment of a kind's collection, e.g. `fill-ups`.
pub fn plural(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Vehicle => "vehicles",
        RecordKind::FillUp => "fill-ups",
        RecordKind::Trip => "trips",
        RecordKind::MaintenanceTask => "maintenance-tasks",
        RecordKind::ServiceLog => "service-logs",
        RecordKind::Contractor => "contractors",
        RecordKind::Client => "clients",
        RecordKind::Project => "projects",
        RecordKind::TimeEntry => "time-entries",
        RecordKind::Invoice => "invoices",
    }
}

fn collection_path<T: Record>(parent_id: Option<Uuid>) -> String {
    match parent_id {
        Some(parent) => format!("/api/{}?parent_id={}", plural(T::KIND), parent),
        None => format!("/api/{}", plural(T::KIND)),
    }
}

fn record_path<T: Record>(id: Uuid) -> String {
    format!("/api/{}/{}", plural(T::KIND), id)
}

impl TrackhubClient {
    /// List records of `T`, optionally only those owned by `parent_id`.
    pub async fn list<T: Record>(&self, parent_id: Option<Uuid>) -> Result<Vec<T>> {
        self.get_json(&collection_path::<T>(parent_id)).await
    }

    /// Get a record by ID.
    pub async fn get<T: Record>(&self, id: Uuid) -> Result<T> {
        self.get_json(&record_path::<T>(id)).await
    }

    /// Create a record from its create request.
    pub async fn create<T: Record>(&self, request: &impl Serialize) -> Result<T> {
        self.post_json(&collection_path::<T>(None), request).await
    }

    /// Apply a partial update to a record.
    pub async fn update<T: Record>(&self, id: Uuid, request: &impl Serialize) -> Result<T> {
        self.put_json(&record_path::<T>(id), request).await
    }

    /// Delete a record and everything it owns.
    pub async fn delete<T: Record>(&self, id: Uuid) -> Result<()> {
        let response = self.client.delete(self.url(&record_path::<T>(id))).send().await?;
        self.handle_delete_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackhub_core::fuel::FillUp;
    use trackhub_core::maintenance::MaintenanceTask;

    #[test]
    fn test_paths() {
        let id = Uuid::nil();
        assert_eq!(collection_path::<FillUp>(None), "/api/fill-ups");
        assert_eq!(
            collection_path::<FillUp>(Some(id)),
            format!("/api/fill-ups?parent_id={id}")
        );
        assert_eq!(
            record_path::<MaintenanceTask>(id),
            format!("/api/maintenance-tasks/{id}")
        );
    }

    #[test]
    fn test_every_kind_has_a_distinct_plural() {
        let mut plurals: Vec<_> = RecordKind::ALL.into_iter().map(plural).collect();
        plurals.sort();
        plurals.dedup();
        assert_eq!(plurals.len(), RecordKind::ALL.len());
    }
}
