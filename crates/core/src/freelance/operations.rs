use chrono::{Datelike, Days, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::error::FreelanceError;
use super::types::{
    Client, Invoice, InvoiceStatus, Project, ProjectStatus, ProjectSummary, TimeEntry,
};

const MAX_NAME_LEN: usize = 200;
const MAX_HOURS_PER_ENTRY: u32 = 24;

pub const DEFAULT_DUE_IN_DAYS: u32 = 30;

impl Project {
    /// Moves the project to `status`, tracking when it was completed.
    pub fn update_status(&mut self, status: ProjectStatus, today: NaiveDate) {
        if status == ProjectStatus::Completed && self.status != ProjectStatus::Completed {
            self.completion_date = Some(today);
        } else if status != ProjectStatus::Completed {
            self.completion_date = None;
        }
        self.status = status;
        self.updated_at = Utc::now();
    }
}

impl Invoice {
    pub fn send(&mut self) -> Result<(), FreelanceError> {
        if self.status != InvoiceStatus::Draft {
            return Err(FreelanceError::InvalidTransition {
                action: "send",
                from: self.status.as_str(),
            });
        }
        self.status = InvoiceStatus::Sent;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn mark_as_paid(&mut self, today: NaiveDate) -> Result<(), FreelanceError> {
        if !matches!(self.status, InvoiceStatus::Sent | InvoiceStatus::Overdue) {
            return Err(FreelanceError::InvalidTransition {
                action: "pay",
                from: self.status.as_str(),
            });
        }
        self.status = InvoiceStatus::Paid;
        self.paid_date = Some(today);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// A sent, unpaid invoice past its due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == InvoiceStatus::Sent && self.paid_date.is_none() && self.due_date < today
    }
}

/// Totals the time logged against `project`. Entries for other projects are ignored.
pub fn project_summary(project: &Project, entries: &[TimeEntry]) -> ProjectSummary {
    let mut total_hours = Decimal::ZERO;
    let mut billable_hours = Decimal::ZERO;
    let mut unbilled_hours = Decimal::ZERO;

    for entry in entries.iter().filter(|e| e.project_id == project.id) {
        total_hours += entry.hours;
        if entry.is_billable {
            billable_hours += entry.hours;
        }
        if entry.is_unbilled() {
            unbilled_hours += entry.hours;
        }
    }

    let billable_amount = project
        .hourly_rate
        .map(|rate| (billable_hours * rate).round_dp(2))
        .unwrap_or(Decimal::ZERO);

    ProjectSummary {
        project_id: project.id,
        total_hours,
        billable_hours,
        unbilled_hours,
        billable_amount,
        budget_remaining: project.fixed_budget.map(|budget| budget - billable_amount),
        currency: project.currency.clone(),
    }
}

/// Drafts an invoice for the project's unbilled billable time.
///
/// Returns the invoice together with the entries it covers, already marked
/// as invoiced.
pub fn build_invoice(
    project: &Project,
    entries: &[TimeEntry],
    invoice_number: impl Into<String>,
    today: NaiveDate,
    due_in_days: u32,
) -> Result<(Invoice, Vec<TimeEntry>), FreelanceError> {
    let rate = project
        .hourly_rate
        .ok_or(FreelanceError::MissingHourlyRate)?;

    let mut billed: Vec<TimeEntry> = entries
        .iter()
        .filter(|e| e.project_id == project.id && e.is_unbilled())
        .cloned()
        .collect();
    if billed.is_empty() {
        return Err(FreelanceError::NothingToInvoice);
    }

    let hours: Decimal = billed.iter().map(|e| e.hours).sum();
    let due_date = today
        .checked_add_days(Days::new(u64::from(due_in_days)))
        .unwrap_or(today);

    let mut invoice = Invoice::new(
        project.client_id,
        invoice_number,
        today,
        due_date,
        (hours * rate).round_dp(2),
    )
    .for_project(project.id);
    invoice.currency = project.currency.clone();

    let now = Utc::now();
    for entry in &mut billed {
        entry.is_invoiced = true;
        entry.updated_at = now;
    }

    Ok((invoice, billed))
}

/// Next number in the `INV-YYYYMM-NNN` sequence for the month of `today`.
pub fn next_invoice_number<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    today: NaiveDate,
) -> String {
    let prefix = format!("INV-{:04}{:02}-", today.year(), today.month());
    let next = existing
        .into_iter()
        .filter_map(|number| number.strip_prefix(&prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .filter_map(|sequence| sequence.checked_add(1))
        .max()
        .unwrap_or(1);
    format!("{prefix}{next:03}")
}

/// Sent invoices past due, oldest due date first.
pub fn overdue_invoices(invoices: &[Invoice], today: NaiveDate) -> Vec<Invoice> {
    let mut overdue: Vec<Invoice> = invoices
        .iter()
        .filter(|invoice| invoice.is_overdue(today))
        .cloned()
        .collect();
    overdue.sort_by_key(|invoice| invoice.due_date);
    overdue
}

pub fn validate_client(client: &Client) -> Result<(), FreelanceError> {
    validate_name(&client.name)?;
    validate_email(client.email.as_deref())
}

pub fn validate_project(project: &Project) -> Result<(), FreelanceError> {
    validate_name(&project.name)?;
    if project.hourly_rate.is_some_and(|r| r < Decimal::ZERO) {
        return Err(FreelanceError::Negative("hourly_rate"));
    }
    if project.fixed_budget.is_some_and(|b| b < Decimal::ZERO) {
        return Err(FreelanceError::Negative("fixed_budget"));
    }
    if project.currency.trim().is_empty() {
        return Err(FreelanceError::EmptyField("currency"));
    }
    Ok(())
}

pub fn validate_time_entry(entry: &TimeEntry) -> Result<(), FreelanceError> {
    if entry.hours <= Decimal::ZERO || entry.hours > Decimal::from(MAX_HOURS_PER_ENTRY) {
        return Err(FreelanceError::InvalidHours);
    }
    Ok(())
}

pub fn validate_invoice(invoice: &Invoice) -> Result<(), FreelanceError> {
    if invoice.invoice_number.trim().is_empty() {
        return Err(FreelanceError::EmptyField("invoice_number"));
    }
    if invoice.due_date < invoice.invoice_date {
        return Err(FreelanceError::DueBeforeInvoiceDate);
    }
    if invoice.total_amount < Decimal::ZERO {
        return Err(FreelanceError::Negative("total_amount"));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), FreelanceError> {
    if name.trim().is_empty() {
        return Err(FreelanceError::EmptyField("name"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(FreelanceError::TooLong("name", MAX_NAME_LEN));
    }
    Ok(())
}

fn validate_email(email: Option<&str>) -> Result<(), FreelanceError> {
    match email {
        Some(email) if !email.contains('@') => Err(FreelanceError::InvalidEmail(email.to_string())),
        _ => Ok(()),
    }
}
