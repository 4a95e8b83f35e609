//! Change events published after every successful write.
//!
//! Subscribers treat an event as a signal to refetch: the record snapshot is
//! included for convenience but the repository stays the source of truth.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::{Record, RecordKind};

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Created => "created",
            ChangeAction::Updated => "updated",
            ChangeAction::Deleted => "deleted",
        }
    }
}

/// A write to a record of some kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: RecordKind,
    pub action: ChangeAction,
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    /// Snapshot of the record after the write. Absent for deletions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<serde_json::Value>,
}

impl ChangeEvent {
    pub fn created<T: Record>(record: &T) -> Self {
        Self::with_snapshot(ChangeAction::Created, record)
    }

    pub fn updated<T: Record>(record: &T) -> Self {
        Self::with_snapshot(ChangeAction::Updated, record)
    }

    pub fn deleted(kind: RecordKind, id: Uuid, parent_id: Option<Uuid>) -> Self {
        Self {
            kind,
            action: ChangeAction::Deleted,
            id,
            parent_id,
            record: None,
        }
    }

    fn with_snapshot<T: Record>(action: ChangeAction, record: &T) -> Self {
        Self {
            kind: T::KIND,
            action,
            id: record.id(),
            parent_id: record.parent_id(),
            record: serde_json::to_value(record).ok(),
        }
    }

    /// SSE event name, e.g. `fill_up.created`.
    pub fn event_type(&self) -> String {
        format!("{}.{}", self.kind, self.action.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::Vehicle;

    #[test]
    fn test_created_carries_snapshot() {
        let vehicle = Vehicle::new("Mazda", "3", 2021);
        let event = ChangeEvent::created(&vehicle);

        assert_eq!(event.kind, RecordKind::Vehicle);
        assert_eq!(event.action, ChangeAction::Created);
        assert_eq!(event.id, vehicle.id);
        assert_eq!(event.parent_id, None);
        let snapshot = event.record.unwrap();
        assert_eq!(snapshot["make"], "Mazda");
    }

    #[test]
    fn test_deleted_has_no_snapshot() {
        let id = Uuid::new_v4();
        let parent = Uuid::new_v4();
        let event = ChangeEvent::deleted(RecordKind::FillUp, id, Some(parent));

        assert_eq!(event.record, None);
        assert_eq!(event.event_type(), "fill_up.deleted");

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("record").is_none());
        assert_eq!(json["parent_id"], parent.to_string());
    }
}
