//! Freelance project management: clients, projects, time tracking and invoicing.

mod error;
mod operations;
mod requests;
mod types;

pub use error::FreelanceError;
pub use operations::{
    build_invoice, next_invoice_number, overdue_invoices, project_summary, validate_client,
    validate_invoice, validate_project, validate_time_entry, DEFAULT_DUE_IN_DAYS,
};
pub use requests::{
    CreateClientRequest, CreateInvoiceRequest, CreateProjectInvoiceRequest, CreateProjectRequest,
    CreateTimeEntryRequest, UpdateClientRequest, UpdateInvoiceRequest, UpdateProjectRequest,
    UpdateProjectStatusRequest, UpdateTimeEntryRequest,
};
pub use types::{
    Client, Invoice, InvoiceStatus, Project, ProjectStatus, ProjectSummary, TimeEntry,
    DEFAULT_CURRENCY,
};
