use chrono::{Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::MaintenanceError;
use super::types::{Contractor, MaintenanceTask, ServiceLog, TaskStatus};

const MAX_NAME_LEN: usize = 200;

/// Longest supported recurrence, ten years.
pub const MAX_RECURRENCE_DAYS: u32 = 3650;

impl MaintenanceTask {
    /// Marks the task completed on the given day.
    pub fn complete(&mut self, completed_on: NaiveDate) -> Result<(), MaintenanceError> {
        self.ensure_open()?;
        self.status = TaskStatus::Completed;
        self.completed_date = Some(completed_on);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Moves an open task to another open status, or cancels it.
    ///
    /// Completion goes through [`MaintenanceTask::complete`] so the
    /// completed date and the next occurrence are never skipped.
    pub fn set_status(&mut self, status: TaskStatus) -> Result<(), MaintenanceError> {
        if status == self.status {
            return Ok(());
        }
        self.ensure_open()?;
        if status == TaskStatus::Completed {
            return Err(MaintenanceError::CompletionRequired);
        }
        self.status = status;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), MaintenanceError> {
        match self.status {
            TaskStatus::Completed => Err(MaintenanceError::AlreadyClosed("completed")),
            TaskStatus::Cancelled => Err(MaintenanceError::AlreadyClosed("cancelled")),
            _ => Ok(()),
        }
    }

    /// An open task whose due date has passed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_closed() && self.due_date.is_some_and(|due| due < today)
    }

    /// Builds the next instance of a recurring task.
    ///
    /// Returns `None` for one-off tasks and for tasks not yet completed.
    pub fn schedule_next_occurrence(&self) -> Option<MaintenanceTask> {
        let days = self.recurrence_frequency_days?;
        let completed = self.completed_date?;
        let due = completed.checked_add_days(Days::new(u64::from(days)))?;

        let now = Utc::now();
        Some(MaintenanceTask {
            id: Uuid::new_v4(),
            status: TaskStatus::Scheduled,
            due_date: Some(due),
            completed_date: None,
            actual_cost: None,
            created_at: now,
            updated_at: now,
            ..self.clone()
        })
    }
}

/// Open tasks past their due date, soonest due first, then by priority.
pub fn overdue_tasks(tasks: &[MaintenanceTask], today: NaiveDate) -> Vec<MaintenanceTask> {
    let mut overdue: Vec<MaintenanceTask> = tasks
        .iter()
        .filter(|task| task.is_overdue(today))
        .cloned()
        .collect();
    overdue.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.priority.cmp(&b.priority))
    });
    overdue
}

pub fn validate_task(task: &MaintenanceTask) -> Result<(), MaintenanceError> {
    validate_name(&task.name)?;
    if !(1..=5).contains(&task.priority) {
        return Err(MaintenanceError::InvalidPriority(task.priority));
    }
    if task
        .recurrence_frequency_days
        .is_some_and(|days| !(1..=MAX_RECURRENCE_DAYS).contains(&days))
    {
        return Err(MaintenanceError::InvalidRecurrence);
    }
    if task.estimated_cost.is_some_and(|c| c < Decimal::ZERO) {
        return Err(MaintenanceError::Negative("estimated_cost"));
    }
    if task.actual_cost.is_some_and(|c| c < Decimal::ZERO) {
        return Err(MaintenanceError::Negative("actual_cost"));
    }
    Ok(())
}

pub fn validate_service_log(log: &ServiceLog) -> Result<(), MaintenanceError> {
    if log.description.trim().is_empty() {
        return Err(MaintenanceError::EmptyField("description"));
    }
    if log.cost.is_some_and(|c| c < Decimal::ZERO) {
        return Err(MaintenanceError::Negative("cost"));
    }
    if log.labor_hours.is_some_and(|h| h < Decimal::ZERO) {
        return Err(MaintenanceError::Negative("labor_hours"));
    }
    Ok(())
}

pub fn validate_contractor(contractor: &Contractor) -> Result<(), MaintenanceError> {
    validate_name(&contractor.name)?;
    if let Some(rating) = contractor.rating {
        if !(1..=5).contains(&rating) {
            return Err(MaintenanceError::InvalidRating(rating));
        }
    }
    if let Some(email) = &contractor.email {
        if !email.contains('@') {
            return Err(MaintenanceError::InvalidEmail(email.clone()));
        }
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), MaintenanceError> {
    if name.trim().is_empty() {
        return Err(MaintenanceError::EmptyField("name"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(MaintenanceError::TooLong("name", MAX_NAME_LEN));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maintenance::MaintenanceType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_task_defaults() {
        let task = MaintenanceTask::new("Test Task");

        assert_eq!(task.maintenance_type, MaintenanceType::Preventive);
        assert_eq!(task.status, TaskStatus::Scheduled);
        assert_eq!(task.priority, 3);
        assert_eq!(task.due_date, None);
        assert_eq!(task.recurrence_frequency_days, None);
    }

    #[test]
    fn test_complete_sets_status_and_date() {
        let mut task = MaintenanceTask::new("HVAC Filter Replacement");
        let before = task.updated_at;

        task.complete(date(2024, 3, 10)).unwrap();

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.completed_date, Some(date(2024, 3, 10)));
        assert!(task.updated_at >= before);
    }

    #[test]
    fn test_complete_twice_fails() {
        let mut task = MaintenanceTask::new("Gutter Cleaning");
        task.complete(date(2024, 3, 10)).unwrap();

        assert_eq!(
            task.complete(date(2024, 3, 11)),
            Err(MaintenanceError::AlreadyClosed("completed"))
        );
    }

    #[test]
    fn test_is_overdue() {
        let today = date(2024, 6, 15);
        let overdue = MaintenanceTask::new("Overdue").due_on(date(2024, 6, 1));
        let upcoming = MaintenanceTask::new("Upcoming").due_on(date(2024, 7, 1));
        let due_today = MaintenanceTask::new("Today").due_on(today);
        let undated = MaintenanceTask::new("Someday");

        assert!(overdue.is_overdue(today));
        assert!(!upcoming.is_overdue(today));
        assert!(!due_today.is_overdue(today));
        assert!(!undated.is_overdue(today));
    }

    #[test]
    fn test_closed_tasks_are_never_overdue() {
        let today = date(2024, 6, 15);
        let mut completed = MaintenanceTask::new("Done").due_on(date(2024, 6, 1));
        completed.complete(date(2024, 6, 2)).unwrap();
        let mut cancelled = MaintenanceTask::new("Dropped").due_on(date(2024, 6, 1));
        cancelled.status = TaskStatus::Cancelled;

        assert!(!completed.is_overdue(today));
        assert!(!cancelled.is_overdue(today));
    }

    #[test]
    fn test_schedule_next_occurrence() {
        let mut task = MaintenanceTask::new("HVAC Filter Replacement")
            .every(90)
            .with_priority(2);
        task.estimated_cost = Some(Decimal::from(50));
        task.actual_cost = Some(Decimal::from(45));
        task.complete(date(2024, 1, 1)).unwrap();

        let next = task.schedule_next_occurrence().unwrap();

        assert_ne!(next.id, task.id);
        assert_eq!(next.status, TaskStatus::Scheduled);
        assert_eq!(next.due_date, Some(date(2024, 3, 31)));
        assert_eq!(next.completed_date, None);
        assert_eq!(next.actual_cost, None);
        assert_eq!(next.estimated_cost, Some(Decimal::from(50)));
        assert_eq!(next.priority, 2);
        assert_eq!(next.recurrence_frequency_days, Some(90));
    }

    #[test]
    fn test_schedule_next_occurrence_requires_recurrence_and_completion() {
        let mut one_off = MaintenanceTask::new("Fix leak");
        one_off.complete(date(2024, 1, 1)).unwrap();
        assert!(one_off.schedule_next_occurrence().is_none());

        let pending = MaintenanceTask::new("Gutter Cleaning").every(180);
        assert!(pending.schedule_next_occurrence().is_none());
    }

    #[test]
    fn test_overdue_tasks_sorted_by_due_date_then_priority() {
        let today = date(2024, 6, 15);
        let tasks = vec![
            MaintenanceTask::new("c").due_on(date(2024, 6, 10)).with_priority(4),
            MaintenanceTask::new("a").due_on(date(2024, 5, 1)),
            MaintenanceTask::new("b").due_on(date(2024, 6, 10)).with_priority(1),
            MaintenanceTask::new("future").due_on(date(2024, 7, 1)),
        ];

        let names: Vec<String> = overdue_tasks(&tasks, today)
            .into_iter()
            .map(|t| t.name)
            .collect();

        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_set_status_guards_completion() {
        let mut task = MaintenanceTask::new("Clean gutters").every(180);

        assert_eq!(
            task.set_status(TaskStatus::Completed),
            Err(MaintenanceError::CompletionRequired)
        );
        assert_eq!(task.status, TaskStatus::Scheduled);

        task.set_status(TaskStatus::InProgress).unwrap();
        task.set_status(TaskStatus::Cancelled).unwrap();
        assert_eq!(
            task.set_status(TaskStatus::Scheduled),
            Err(MaintenanceError::AlreadyClosed("cancelled"))
        );
        // Unchanged status is a no-op even on a closed task.
        assert!(task.set_status(TaskStatus::Cancelled).is_ok());
    }

    #[test]
    fn test_validate_task() {
        assert!(validate_task(&MaintenanceTask::new("Valid")).is_ok());
        assert_eq!(
            validate_task(&MaintenanceTask::new("")),
            Err(MaintenanceError::EmptyField("name"))
        );
        assert_eq!(
            validate_task(&MaintenanceTask::new("x").with_priority(6)),
            Err(MaintenanceError::InvalidPriority(6))
        );
        assert_eq!(
            validate_task(&MaintenanceTask::new("x").every(0)),
            Err(MaintenanceError::InvalidRecurrence)
        );
        assert!(validate_task(&MaintenanceTask::new("x").every(MAX_RECURRENCE_DAYS)).is_ok());
        assert_eq!(
            validate_task(&MaintenanceTask::new("x").every(u32::MAX)),
            Err(MaintenanceError::InvalidRecurrence)
        );
    }

    #[test]
    fn test_validate_contractor() {
        let mut contractor = Contractor::new("ABC HVAC Services");
        contractor.rating = Some(5);
        contractor.email = Some("info@abchvac.com".to_string());
        assert!(validate_contractor(&contractor).is_ok());

        contractor.rating = Some(0);
        assert_eq!(
            validate_contractor(&contractor),
            Err(MaintenanceError::InvalidRating(0))
        );

        contractor.rating = None;
        contractor.email = Some("not-an-email".to_string());
        assert!(matches!(
            validate_contractor(&contractor),
            Err(MaintenanceError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_validate_service_log() {
        let mut log = ServiceLog::new(Uuid::new_v4(), date(2024, 1, 1), "Cleaned gutters");
        log.labor_hours = Some(Decimal::from(-1));
        assert_eq!(
            validate_service_log(&log),
            Err(MaintenanceError::Negative("labor_hours"))
        );
    }
}
