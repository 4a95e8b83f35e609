//! Project and invoice operations.

use uuid::Uuid;

use trackhub_core::freelance::{
    CreateProjectInvoiceRequest, Invoice, Project, ProjectStatus, ProjectSummary,
    UpdateProjectStatusRequest,
};

use super::TrackhubClient;
use crate::error::Result;

impl TrackhubClient {
    /// Move a project to a new status.
    pub async fn update_project_status(&self, id: Uuid, status: ProjectStatus) -> Result<Project> {
        self.put_json(
            &format!("/api/projects/{}/status", id),
            &UpdateProjectStatusRequest { status },
        )
        .await
    }

    /// Hours, billable amount and remaining budget of a project.
    pub async fn project_summary(&self, id: Uuid) -> Result<ProjectSummary> {
        self.get_json(&format!("/api/projects/{}/summary", id)).await
    }

    /// Invoice a project's unbilled time.
    pub async fn invoice_project(
        &self,
        id: Uuid,
        request: &CreateProjectInvoiceRequest,
    ) -> Result<Invoice> {
        self.post_json(&format!("/api/projects/{}/invoices", id), request)
            .await
    }

    /// Send a draft invoice.
    pub async fn send_invoice(&self, id: Uuid) -> Result<Invoice> {
        let response = self
            .client
            .post(self.url(&format!("/api/invoices/{}/send", id)))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Record payment of a sent invoice.
    pub async fn pay_invoice(&self, id: Uuid) -> Result<Invoice> {
        let response = self
            .client
            .post(self.url(&format!("/api/invoices/{}/pay", id)))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Sent invoices past their due date.
    pub async fn overdue_invoices(&self) -> Result<Vec<Invoice>> {
        self.get_json("/api/invoices/overdue").await
    }
}
