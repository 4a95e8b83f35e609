use thiserror::Error;

/// Validation and workflow errors for clients, projects, time and invoices.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FreelanceError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("{0} cannot exceed {1} characters")]
    TooLong(&'static str, usize),
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Hours must be greater than 0 and at most 24")]
    InvalidHours,
    #[error("{0} cannot be negative")]
    Negative(&'static str),
    #[error("Due date must be on or after invoice date")]
    DueBeforeInvoiceDate,
    #[error("Cannot {action} an invoice that is {from}")]
    InvalidTransition {
        action: &'static str,
        from: &'static str,
    },
    #[error("Project has no hourly rate")]
    MissingHourlyRate,
    #[error("No unbilled billable time to invoice")]
    NothingToInvoice,
}
