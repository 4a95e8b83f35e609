//! Maintenance task lifecycle endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use uuid::Uuid;

use trackhub_core::maintenance::{
    overdue_tasks, validate_task, CompleteTaskRequest, CompleteTaskResponse, MaintenanceTask,
};

use crate::handlers::{records::find, AppError};
use crate::state::AppState;

/// POST /maintenance-tasks/{id}/complete - Complete a task.
///
/// Recurring tasks get their next occurrence stored as a new scheduled task.
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CompleteTaskRequest>, JsonRejection>,
) -> Result<Json<CompleteTaskResponse>, AppError> {
    let Json(request) = payload?;
    let original = find::<MaintenanceTask>(&state, id).await?;
    let mut task = original.clone();

    let completed_on = request.completed_date.unwrap_or_else(|| state.today());
    task.complete(completed_on)?;
    if let Some(cost) = request.actual_cost {
        task.actual_cost = Some(cost);
    }
    validate_task(&task)?;

    state.maintenance_tasks.update(&task).await?;

    let next = task.schedule_next_occurrence();
    if let Some(ref next) = next {
        if let Err(err) = state.maintenance_tasks.create(next).await {
            // Put the task back as it was before completion.
            if let Err(restore_err) = state.maintenance_tasks.update(&original).await {
                tracing::error!(
                    task_id = %id,
                    error = %restore_err,
                    "Task left completed without its next occurrence"
                );
            }
            return Err(err.into());
        }
        tracing::info!(
            task_id = %id,
            next_id = %next.id,
            due = ?next.due_date,
            "Scheduled next occurrence"
        );
    }

    tracing::info!(task_id = %id, %completed_on, "Completed maintenance task");
    Ok(Json(CompleteTaskResponse {
        completed: task,
        next,
    }))
}

/// GET /maintenance-tasks/overdue - Open tasks past their due date.
pub async fn overdue(
    State(state): State<AppState>,
) -> Result<Json<Vec<MaintenanceTask>>, AppError> {
    let tasks = state.maintenance_tasks.list(None).await?;
    Ok(Json(overdue_tasks(&tasks, state.today())))
}
