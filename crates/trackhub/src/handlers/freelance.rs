//! Project and invoice workflow endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use trackhub_core::freelance::{
    build_invoice, next_invoice_number, overdue_invoices, project_summary,
    CreateProjectInvoiceRequest, Invoice, Project, ProjectSummary, TimeEntry,
    UpdateProjectStatusRequest, DEFAULT_DUE_IN_DAYS,
};

use crate::handlers::{records::find, AppError};
use crate::state::AppState;

/// PUT /projects/{id}/status - Move a project to a new status.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateProjectStatusRequest>, JsonRejection>,
) -> Result<Json<Project>, AppError> {
    let Json(request) = payload?;
    let mut project = find::<Project>(&state, id).await?;

    project.update_status(request.status, state.today());
    state.projects.update(&project).await?;

    tracing::info!(project_id = %id, status = ?project.status, "Updated project status");
    Ok(Json(project))
}

/// GET /projects/{id}/summary - Hours, billable amount and budget.
pub async fn summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectSummary>, AppError> {
    let project = find::<Project>(&state, id).await?;
    let entries = state.time_entries.list(Some(project.id)).await?;
    Ok(Json(project_summary(&project, &entries)))
}

/// POST /projects/{id}/invoices - Invoice the project's unbilled time.
pub async fn create_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CreateProjectInvoiceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Invoice>), AppError> {
    let Json(request) = payload?;
    let project = find::<Project>(&state, id).await?;
    let entries = state.time_entries.list(Some(project.id)).await?;
    let today = state.today();

    let invoice_number = match request.invoice_number {
        Some(number) => number,
        None => {
            let existing = state.invoices.list(None).await?;
            next_invoice_number(existing.iter().map(|i| i.invoice_number.as_str()), today)
        }
    };
    let due_in_days = request.due_in_days.unwrap_or(DEFAULT_DUE_IN_DAYS);

    let (invoice, billed) = build_invoice(&project, &entries, invoice_number, today, due_in_days)?;

    // Entries are marked before the invoice exists. Failures put them back.
    let mut marked = Vec::with_capacity(billed.len());
    for entry in &billed {
        if let Err(err) = state.time_entries.update(entry).await {
            restore_entries(&state, &entries, &marked).await;
            return Err(err.into());
        }
        marked.push(entry.id);
    }
    if let Err(err) = state.invoices.create(&invoice).await {
        restore_entries(&state, &entries, &marked).await;
        return Err(err.into());
    }

    tracing::info!(
        project_id = %id,
        invoice_id = %invoice.id,
        number = %invoice.invoice_number,
        entries = billed.len(),
        total = %invoice.total_amount,
        "Invoiced project time"
    );
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// Puts back the pre-invoice state of the entries in `marked`.
async fn restore_entries(state: &AppState, originals: &[TimeEntry], marked: &[Uuid]) {
    for entry in originals.iter().filter(|e| marked.contains(&e.id)) {
        if let Err(err) = state.time_entries.update(entry).await {
            tracing::error!(
                entry_id = %entry.id,
                error = %err,
                "Time entry left invoiced without an invoice"
            );
        }
    }
}

/// POST /invoices/{id}/send - Send a draft invoice.
pub async fn send_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    let mut invoice = find::<Invoice>(&state, id).await?;

    invoice.send()?;
    state.invoices.update(&invoice).await?;

    tracing::info!(invoice_id = %id, "Sent invoice");
    Ok(Json(invoice))
}

/// POST /invoices/{id}/pay - Record payment of a sent invoice.
pub async fn pay_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    let mut invoice = find::<Invoice>(&state, id).await?;

    invoice.mark_as_paid(state.today())?;
    state.invoices.update(&invoice).await?;

    tracing::info!(invoice_id = %id, "Invoice paid");
    Ok(Json(invoice))
}

/// GET /invoices/overdue - Sent invoices past their due date.
pub async fn overdue(State(state): State<AppState>) -> Result<Json<Vec<Invoice>>, AppError> {
    let invoices = state.invoices.list(None).await?;
    Ok(Json(overdue_invoices(&invoices, state.today())))
}
