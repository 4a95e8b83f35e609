use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::{Record, RecordKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    #[default]
    Preventive,
    Corrective,
    Seasonal,
    Emergency,
    Inspection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Postponed,
    Cancelled,
}

impl TaskStatus {
    /// Completed and cancelled tasks need no further work.
    pub fn is_closed(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }
}

/// A piece of household upkeep, optionally recurring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub maintenance_type: MaintenanceType,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_frequency_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<Decimal>,
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_PRIORITY: u8 = 3;

impl MaintenanceTask {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            maintenance_type: MaintenanceType::default(),
            status: TaskStatus::default(),
            due_date: None,
            completed_date: None,
            recurrence_frequency_days: None,
            estimated_cost: None,
            actual_cost: None,
            priority: DEFAULT_PRIORITY,
            location: None,
            contractor_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn due_on(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn every(mut self, days: u32) -> Self {
        self.recurrence_frequency_days = Some(days);
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

impl Record for MaintenanceTask {
    const KIND: RecordKind = RecordKind::MaintenanceTask;

    fn id(&self) -> Uuid {
        self.id
    }

    fn references(&self) -> Vec<(RecordKind, Uuid)> {
        self.contractor_id
            .map(|id| vec![(RecordKind::Contractor, id)])
            .unwrap_or_default()
    }

    fn clear_reference(&mut self, kind: RecordKind, id: Uuid) -> bool {
        clear_contractor(&mut self.contractor_id, kind, id)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

fn clear_contractor(contractor_id: &mut Option<Uuid>, kind: RecordKind, id: Uuid) -> bool {
    if kind == RecordKind::Contractor && *contractor_id == Some(id) {
        *contractor_id = None;
        return true;
    }
    false
}

/// A record of work performed against a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLog {
    pub id: Uuid,
    pub task_id: Uuid,
    pub service_date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labor_hours: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_expires_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceLog {
    pub fn new(task_id: Uuid, service_date: NaiveDate, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            task_id,
            service_date,
            description: description.into(),
            contractor_id: None,
            cost: None,
            notes: None,
            parts_used: None,
            labor_hours: None,
            warranty_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for ServiceLog {
    const KIND: RecordKind = RecordKind::ServiceLog;

    fn id(&self) -> Uuid {
        self.id
    }

    fn parent_id(&self) -> Option<Uuid> {
        Some(self.task_id)
    }

    fn references(&self) -> Vec<(RecordKind, Uuid)> {
        let mut refs = vec![(RecordKind::MaintenanceTask, self.task_id)];
        if let Some(contractor_id) = self.contractor_id {
            refs.push((RecordKind::Contractor, contractor_id));
        }
        refs
    }

    fn clear_reference(&mut self, kind: RecordKind, id: Uuid) -> bool {
        clear_contractor(&mut self.contractor_id, kind, id)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Someone who performs maintenance work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contractor {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub is_insured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contractor {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            specialty: None,
            phone: None,
            email: None,
            website: None,
            is_insured: false,
            rating: None,
            notes: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }
}

impl Record for Contractor {
    const KIND: RecordKind = RecordKind::Contractor;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
