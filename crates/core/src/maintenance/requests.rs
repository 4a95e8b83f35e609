//! API request types for the home maintenance schedule.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::MaintenanceError;
use super::operations::{validate_contractor, validate_service_log, validate_task};
use super::types::{
    Contractor, MaintenanceTask, MaintenanceType, ServiceLog, TaskStatus, DEFAULT_PRIORITY,
};
use crate::record::{CreateRequest, UpdateRequest};
use crate::serde::deserialize_optional_string;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_type: Option<MaintenanceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_frequency_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_id: Option<Uuid>,
}

impl CreateTaskRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            maintenance_type: None,
            due_date: None,
            recurrence_frequency_days: None,
            estimated_cost: None,
            priority: None,
            location: None,
            contractor_id: None,
        }
    }

    pub fn due_on(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn every(mut self, days: u32) -> Self {
        self.recurrence_frequency_days = Some(days);
        self
    }
}

impl CreateRequest for CreateTaskRequest {
    type Record = MaintenanceTask;
    type Error = MaintenanceError;

    fn into_record(self) -> Result<MaintenanceTask, MaintenanceError> {
        let mut task = MaintenanceTask::new(self.name.trim());
        task.description = self.description;
        task.maintenance_type = self.maintenance_type.unwrap_or_default();
        task.due_date = self.due_date;
        task.recurrence_frequency_days = self.recurrence_frequency_days;
        task.estimated_cost = self.estimated_cost;
        task.priority = self.priority.unwrap_or(DEFAULT_PRIORITY);
        task.location = self.location;
        task.contractor_id = self.contractor_id;
        validate_task(&task)?;
        Ok(task)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_type: Option<MaintenanceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_frequency_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_id: Option<Uuid>,
}

impl UpdateRequest for UpdateTaskRequest {
    type Record = MaintenanceTask;
    type Error = MaintenanceError;

    fn apply_to(self, task: &mut MaintenanceTask) -> Result<(), MaintenanceError> {
        let mut updated = task.clone();
        if let Some(name) = self.name {
            updated.name = name;
        }
        if let Some(description) = self.description {
            updated.description = Some(description);
        }
        if let Some(kind) = self.maintenance_type {
            updated.maintenance_type = kind;
        }
        if let Some(status) = self.status {
            updated.set_status(status)?;
        }
        if let Some(due) = self.due_date {
            updated.due_date = Some(due);
        }
        if let Some(days) = self.recurrence_frequency_days {
            updated.recurrence_frequency_days = Some(days);
        }
        if let Some(cost) = self.estimated_cost {
            updated.estimated_cost = Some(cost);
        }
        if let Some(cost) = self.actual_cost {
            updated.actual_cost = Some(cost);
        }
        if let Some(priority) = self.priority {
            updated.priority = priority;
        }
        if let Some(location) = self.location {
            updated.location = Some(location);
        }
        if let Some(contractor_id) = self.contractor_id {
            updated.contractor_id = Some(contractor_id);
        }
        validate_task(&updated)?;
        *task = updated;
        Ok(())
    }
}

/// Body of `POST /maintenance-tasks/{id}/complete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteTaskRequest {
    /// Defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<Decimal>,
}

/// Response of `POST /maintenance-tasks/{id}/complete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteTaskResponse {
    pub completed: MaintenanceTask,
    pub next: Option<MaintenanceTask>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceLogRequest {
    pub task_id: Uuid,
    pub service_date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub parts_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labor_hours: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_expires_at: Option<NaiveDate>,
}

impl CreateRequest for CreateServiceLogRequest {
    type Record = ServiceLog;
    type Error = MaintenanceError;

    fn into_record(self) -> Result<ServiceLog, MaintenanceError> {
        let mut log = ServiceLog::new(self.task_id, self.service_date, self.description.trim());
        log.contractor_id = self.contractor_id;
        log.cost = self.cost;
        log.notes = self.notes;
        log.parts_used = self.parts_used;
        log.labor_hours = self.labor_hours;
        log.warranty_expires_at = self.warranty_expires_at;
        validate_service_log(&log)?;
        Ok(log)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServiceLogRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
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
}

impl UpdateRequest for UpdateServiceLogRequest {
    type Record = ServiceLog;
    type Error = MaintenanceError;

    fn apply_to(self, log: &mut ServiceLog) -> Result<(), MaintenanceError> {
        let mut updated = log.clone();
        if let Some(date) = self.service_date {
            updated.service_date = date;
        }
        if let Some(description) = self.description {
            updated.description = description;
        }
        if let Some(contractor_id) = self.contractor_id {
            updated.contractor_id = Some(contractor_id);
        }
        if let Some(cost) = self.cost {
            updated.cost = Some(cost);
        }
        if let Some(notes) = self.notes {
            updated.notes = Some(notes);
        }
        if let Some(parts) = self.parts_used {
            updated.parts_used = Some(parts);
        }
        if let Some(hours) = self.labor_hours {
            updated.labor_hours = Some(hours);
        }
        if let Some(warranty) = self.warranty_expires_at {
            updated.warranty_expires_at = Some(warranty);
        }
        validate_service_log(&updated)?;
        *log = updated;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContractorRequest {
    pub name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub specialty: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub website: Option<String>,
    #[serde(default)]
    pub is_insured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

impl CreateContractorRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specialty: None,
            phone: None,
            email: None,
            website: None,
            is_insured: false,
            rating: None,
            notes: None,
        }
    }
}

impl CreateRequest for CreateContractorRequest {
    type Record = Contractor;
    type Error = MaintenanceError;

    fn into_record(self) -> Result<Contractor, MaintenanceError> {
        let mut contractor = Contractor::new(self.name.trim());
        contractor.specialty = self.specialty;
        contractor.phone = self.phone;
        contractor.email = self.email;
        contractor.website = self.website;
        contractor.is_insured = self.is_insured;
        contractor.rating = self.rating;
        contractor.notes = self.notes;
        validate_contractor(&contractor)?;
        Ok(contractor)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContractorRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_insured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateRequest for UpdateContractorRequest {
    type Record = Contractor;
    type Error = MaintenanceError;

    fn apply_to(self, contractor: &mut Contractor) -> Result<(), MaintenanceError> {
        let mut updated = contractor.clone();
        if let Some(name) = self.name {
            updated.name = name;
        }
        if let Some(specialty) = self.specialty {
            updated.specialty = Some(specialty);
        }
        if let Some(phone) = self.phone {
            updated.phone = Some(phone);
        }
        if let Some(email) = self.email {
            updated.email = Some(email);
        }
        if let Some(website) = self.website {
            updated.website = Some(website);
        }
        if let Some(insured) = self.is_insured {
            updated.is_insured = insured;
        }
        if let Some(rating) = self.rating {
            updated.rating = Some(rating);
        }
        if let Some(notes) = self.notes {
            updated.notes = Some(notes);
        }
        if let Some(active) = self.is_active {
            updated.is_active = active;
        }
        validate_contractor(&updated)?;
        *contractor = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_applies_defaults() {
        let task = CreateTaskRequest::new("Gutter Cleaning")
            .every(180)
            .into_record()
            .unwrap();

        assert_eq!(task.priority, 3);
        assert_eq!(task.status, TaskStatus::Scheduled);
        assert_eq!(task.maintenance_type, MaintenanceType::Preventive);
        assert_eq!(task.recurrence_frequency_days, Some(180));
    }

    #[test]
    fn test_create_task_rejects_bad_priority() {
        let mut request = CreateTaskRequest::new("Check smoke detectors");
        request.priority = Some(0);
        assert_eq!(
            request.into_record().unwrap_err(),
            MaintenanceError::InvalidPriority(0)
        );
    }

    #[test]
    fn test_update_task_cannot_complete_or_reopen() {
        let mut task = MaintenanceTask::new("Replace HVAC filter").every(90);

        let result = UpdateTaskRequest {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        }
        .apply_to(&mut task);
        assert_eq!(result, Err(MaintenanceError::CompletionRequired));
        assert_eq!(task.status, TaskStatus::Scheduled);
        assert_eq!(task.completed_date, None);

        task.complete(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()).unwrap();
        let result = UpdateTaskRequest {
            status: Some(TaskStatus::Scheduled),
            ..Default::default()
        }
        .apply_to(&mut task);
        assert_eq!(result, Err(MaintenanceError::AlreadyClosed("completed")));
        assert_eq!(task.status, TaskStatus::Completed);

        // Other edits on a closed task still go through.
        UpdateTaskRequest {
            priority: Some(1),
            ..Default::default()
        }
        .apply_to(&mut task)
        .unwrap();
        assert_eq!(task.priority, 1);
    }

    #[test]
    fn test_create_contractor_from_json() {
        let json = r#"{
            "name": "Smith Plumbing",
            "specialty": "Plumbing",
            "email": "",
            "is_insured": true,
            "rating": 4
        }"#;
        let contractor = serde_json::from_str::<CreateContractorRequest>(json)
            .unwrap()
            .into_record()
            .unwrap();

        assert_eq!(contractor.email, None);
        assert!(contractor.is_insured);
        assert!(contractor.is_active);
        assert_eq!(contractor.rating, Some(4));
    }

    #[test]
    fn test_update_contractor_rejects_rating() {
        let mut contractor = Contractor::new("Elite Landscaping");
        let result = UpdateContractorRequest {
            rating: Some(9),
            ..Default::default()
        }
        .apply_to(&mut contractor);

        assert_eq!(result, Err(MaintenanceError::InvalidRating(9)));
        assert_eq!(contractor.rating, None);
    }

    #[test]
    fn test_create_service_log_requires_description() {
        let request = CreateServiceLogRequest {
            task_id: Uuid::new_v4(),
            service_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            description: "   ".to_string(),
            contractor_id: None,
            cost: None,
            notes: None,
            parts_used: None,
            labor_hours: None,
            warranty_expires_at: None,
        };
        assert_eq!(
            request.into_record().unwrap_err(),
            MaintenanceError::EmptyField("description")
        );
    }
}
