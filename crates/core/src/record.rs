//! Record kinds and the traits shared by every tracked entity.
//!
//! A [`Record`] is anything the storage layer can persist: it knows its own
//! kind, id and owning parent. Request DTOs implement [`CreateRequest`] and
//! [`UpdateRequest`] so generic handlers can validate and build records
//! without knowing which vertical they belong to.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Every kind of record tracked by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Vehicle,
    FillUp,
    Trip,
    MaintenanceTask,
    ServiceLog,
    Contractor,
    Client,
    Project,
    TimeEntry,
    Invoice,
}

/// Error returned when parsing an unknown kind name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown record kind: {0}")]
pub struct ParseKindError(pub String);

impl RecordKind {
    pub const ALL: [RecordKind; 10] = [
        RecordKind::Vehicle,
        RecordKind::FillUp,
        RecordKind::Trip,
        RecordKind::MaintenanceTask,
        RecordKind::ServiceLog,
        RecordKind::Contractor,
        RecordKind::Client,
        RecordKind::Project,
        RecordKind::TimeEntry,
        RecordKind::Invoice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Vehicle => "vehicle",
            RecordKind::FillUp => "fill_up",
            RecordKind::Trip => "trip",
            RecordKind::MaintenanceTask => "maintenance_task",
            RecordKind::ServiceLog => "service_log",
            RecordKind::Contractor => "contractor",
            RecordKind::Client => "client",
            RecordKind::Project => "project",
            RecordKind::TimeEntry => "time_entry",
            RecordKind::Invoice => "invoice",
        }
    }

    /// Human readable name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Vehicle => "Vehicle",
            RecordKind::FillUp => "FillUp",
            RecordKind::Trip => "Trip",
            RecordKind::MaintenanceTask => "MaintenanceTask",
            RecordKind::ServiceLog => "ServiceLog",
            RecordKind::Contractor => "Contractor",
            RecordKind::Client => "Client",
            RecordKind::Project => "Project",
            RecordKind::TimeEntry => "TimeEntry",
            RecordKind::Invoice => "Invoice",
        }
    }

    /// The kind that owns records of this kind, if any.
    pub fn parent(&self) -> Option<RecordKind> {
        match self {
            RecordKind::FillUp | RecordKind::Trip => Some(RecordKind::Vehicle),
            RecordKind::ServiceLog => Some(RecordKind::MaintenanceTask),
            RecordKind::Project | RecordKind::Invoice => Some(RecordKind::Client),
            RecordKind::TimeEntry => Some(RecordKind::Project),
            RecordKind::Vehicle
            | RecordKind::MaintenanceTask
            | RecordKind::Contractor
            | RecordKind::Client => None,
        }
    }

    /// Kinds owned by this kind. Deleting a record cascades to these.
    pub fn children(&self) -> Vec<RecordKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| kind.parent() == Some(*self))
            .collect()
    }

    /// Kinds that may point at this kind without being owned by it.
    /// Deleting a record clears these references instead of cascading.
    pub fn referrers(&self) -> Vec<RecordKind> {
        match self {
            RecordKind::Contractor => vec![RecordKind::MaintenanceTask, RecordKind::ServiceLog],
            RecordKind::Project => vec![RecordKind::Invoice],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// A persisted entity.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: RecordKind;

    fn id(&self) -> Uuid;

    /// Id of the owning record, for kinds that have a parent.
    fn parent_id(&self) -> Option<Uuid> {
        None
    }

    /// Every record this one points at. Writes are rejected when any of
    /// these do not exist.
    fn references(&self) -> Vec<(RecordKind, Uuid)> {
        match (Self::KIND.parent(), self.parent_id()) {
            (Some(kind), Some(id)) => vec![(kind, id)],
            _ => Vec::new(),
        }
    }

    /// Drops an optional reference to a deleted record. Returns whether
    /// the record changed.
    fn clear_reference(&mut self, _kind: RecordKind, _id: Uuid) -> bool {
        false
    }

    fn created_at(&self) -> DateTime<Utc>;

    /// Marks the record as modified at `now`.
    fn touch(&mut self, now: DateTime<Utc>);
}

/// A request DTO that validates and builds a new record.
pub trait CreateRequest: DeserializeOwned + Send + 'static {
    type Record: Record;
    type Error: std::error::Error + Send + Sync + 'static;

    fn into_record(self) -> Result<Self::Record, Self::Error>;
}

/// A request DTO that applies a partial update to an existing record.
///
/// Implementations validate the updated record and leave the target
/// untouched when validation fails.
pub trait UpdateRequest: DeserializeOwned + Send + 'static {
    type Record: Record;
    type Error: std::error::Error + Send + Sync + 'static;

    fn apply_to(self, record: &mut Self::Record) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_topology() {
        assert_eq!(RecordKind::FillUp.parent(), Some(RecordKind::Vehicle));
        assert_eq!(RecordKind::Trip.parent(), Some(RecordKind::Vehicle));
        assert_eq!(
            RecordKind::ServiceLog.parent(),
            Some(RecordKind::MaintenanceTask)
        );
        assert_eq!(RecordKind::TimeEntry.parent(), Some(RecordKind::Project));
        assert_eq!(RecordKind::Invoice.parent(), Some(RecordKind::Client));
        assert_eq!(RecordKind::Contractor.parent(), None);
    }

    #[test]
    fn test_children() {
        assert_eq!(
            RecordKind::Vehicle.children(),
            vec![RecordKind::FillUp, RecordKind::Trip]
        );
        assert_eq!(
            RecordKind::Client.children(),
            vec![RecordKind::Project, RecordKind::Invoice]
        );
        assert!(RecordKind::TimeEntry.children().is_empty());
    }

    #[test]
    fn test_referrers_are_not_children() {
        assert_eq!(
            RecordKind::Contractor.referrers(),
            vec![RecordKind::MaintenanceTask, RecordKind::ServiceLog]
        );
        assert_eq!(RecordKind::Project.referrers(), vec![RecordKind::Invoice]);
        assert!(RecordKind::Vehicle.referrers().is_empty());
        for kind in RecordKind::ALL {
            for referrer in kind.referrers() {
                assert!(!kind.children().contains(&referrer));
            }
        }
    }

    #[test]
    fn test_from_str_accepts_dashes() {
        assert_eq!(
            "fill-up".parse::<RecordKind>().unwrap(),
            RecordKind::FillUp
        );
        assert_eq!(
            "maintenance_task".parse::<RecordKind>().unwrap(),
            RecordKind::MaintenanceTask
        );
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "boat".parse::<RecordKind>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown record kind: boat");
    }

    #[test]
    fn test_serde_matches_as_str() {
        for kind in RecordKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
