//! Maintenance task operations.

use uuid::Uuid;

use trackhub_core::maintenance::{CompleteTaskRequest, CompleteTaskResponse, MaintenanceTask};

use super::TrackhubClient;
use crate::error::Result;

impl TrackhubClient {
    /// Complete a task. Recurring tasks come back with their next occurrence.
    pub async fn complete_task(
        &self,
        id: Uuid,
        request: &CompleteTaskRequest,
    ) -> Result<CompleteTaskResponse> {
        self.post_json(&format!("/api/maintenance-tasks/{}/complete", id), request)
            .await
    }

    /// Open tasks past their due date.
    pub async fn overdue_tasks(&self) -> Result<Vec<MaintenanceTask>> {
        self.get_json("/api/maintenance-tasks/overdue").await
    }
}
