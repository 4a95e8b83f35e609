//! API request types for the freelance project manager.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::FreelanceError;
use super::operations::{validate_client, validate_invoice, validate_project, validate_time_entry};
use super::types::{Client, Invoice, InvoiceStatus, Project, ProjectStatus, TimeEntry};
use crate::record::{CreateRequest, UpdateRequest};
use crate::serde::deserialize_optional_string;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_name: Option<String>,
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
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub website: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

impl CreateClientRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company_name: None,
            email: None,
            phone: None,
            address: None,
            website: None,
            notes: None,
        }
    }
}

impl CreateRequest for CreateClientRequest {
    type Record = Client;
    type Error = FreelanceError;

    fn into_record(self) -> Result<Client, FreelanceError> {
        let mut client = Client::new(self.name.trim());
        client.company_name = self.company_name;
        client.email = self.email;
        client.phone = self.phone;
        client.address = self.address;
        client.website = self.website;
        client.notes = self.notes;
        validate_client(&client)?;
        Ok(client)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClientRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateRequest for UpdateClientRequest {
    type Record = Client;
    type Error = FreelanceError;

    fn apply_to(self, client: &mut Client) -> Result<(), FreelanceError> {
        let mut updated = client.clone();
        if let Some(name) = self.name {
            updated.name = name;
        }
        if let Some(company) = self.company_name {
            updated.company_name = Some(company);
        }
        if let Some(email) = self.email {
            updated.email = Some(email);
        }
        if let Some(phone) = self.phone {
            updated.phone = Some(phone);
        }
        if let Some(address) = self.address {
            updated.address = Some(address);
        }
        if let Some(website) = self.website {
            updated.website = Some(website);
        }
        if let Some(notes) = self.notes {
            updated.notes = Some(notes);
        }
        if let Some(active) = self.is_active {
            updated.is_active = active;
        }
        validate_client(&updated)?;
        *client = updated;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub client_id: Uuid,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_budget: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

impl CreateProjectRequest {
    pub fn new(client_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            client_id,
            name: name.into(),
            description: None,
            start_date: None,
            due_date: None,
            hourly_rate: None,
            fixed_budget: None,
            currency: None,
            notes: None,
        }
    }
}

impl CreateRequest for CreateProjectRequest {
    type Record = Project;
    type Error = FreelanceError;

    fn into_record(self) -> Result<Project, FreelanceError> {
        let mut project = Project::new(self.client_id, self.name.trim());
        project.description = self.description;
        project.start_date = self.start_date;
        project.due_date = self.due_date;
        project.hourly_rate = self.hourly_rate;
        project.fixed_budget = self.fixed_budget;
        if let Some(currency) = self.currency {
            project.currency = currency.to_uppercase();
        }
        project.notes = self.notes;
        validate_project(&project)?;
        Ok(project)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_budget: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpdateRequest for UpdateProjectRequest {
    type Record = Project;
    type Error = FreelanceError;

    fn apply_to(self, project: &mut Project) -> Result<(), FreelanceError> {
        let mut updated = project.clone();
        if let Some(name) = self.name {
            updated.name = name;
        }
        if let Some(description) = self.description {
            updated.description = Some(description);
        }
        if let Some(start) = self.start_date {
            updated.start_date = Some(start);
        }
        if let Some(due) = self.due_date {
            updated.due_date = Some(due);
        }
        if let Some(rate) = self.hourly_rate {
            updated.hourly_rate = Some(rate);
        }
        if let Some(budget) = self.fixed_budget {
            updated.fixed_budget = Some(budget);
        }
        if let Some(currency) = self.currency {
            updated.currency = currency.to_uppercase();
        }
        if let Some(notes) = self.notes {
            updated.notes = Some(notes);
        }
        validate_project(&updated)?;
        *project = updated;
        Ok(())
    }
}

/// Body of `PUT /projects/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProjectStatusRequest {
    pub status: ProjectStatus,
}

/// Body of `POST /projects/{id}/invoices`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectInvoiceRequest {
    /// Generated from the month's sequence when absent.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_in_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeEntryRequest {
    pub project_id: Uuid,
    pub work_date: NaiveDate,
    pub hours: Decimal,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_billable: Option<bool>,
}

impl CreateRequest for CreateTimeEntryRequest {
    type Record = TimeEntry;
    type Error = FreelanceError;

    fn into_record(self) -> Result<TimeEntry, FreelanceError> {
        let mut entry = TimeEntry::new(self.project_id, self.work_date, self.hours);
        entry.description = self.description;
        entry.is_billable = self.is_billable.unwrap_or(true);
        validate_time_entry(&entry)?;
        Ok(entry)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTimeEntryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_billable: Option<bool>,
}

impl UpdateRequest for UpdateTimeEntryRequest {
    type Record = TimeEntry;
    type Error = FreelanceError;

    fn apply_to(self, entry: &mut TimeEntry) -> Result<(), FreelanceError> {
        let mut updated = entry.clone();
        if let Some(date) = self.work_date {
            updated.work_date = date;
        }
        if let Some(hours) = self.hours {
            updated.hours = hours;
        }
        if let Some(description) = self.description {
            updated.description = Some(description);
        }
        if let Some(billable) = self.is_billable {
            updated.is_billable = billable;
        }
        validate_time_entry(&updated)?;
        *entry = updated;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub client_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total_amount: Decimal,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

impl CreateRequest for CreateInvoiceRequest {
    type Record = Invoice;
    type Error = FreelanceError;

    fn into_record(self) -> Result<Invoice, FreelanceError> {
        let mut invoice = Invoice::new(
            self.client_id,
            self.invoice_number.trim(),
            self.invoice_date,
            self.due_date,
            self.total_amount,
        );
        invoice.project_id = self.project_id;
        if let Some(currency) = self.currency {
            invoice.currency = currency.to_uppercase();
        }
        invoice.notes = self.notes;
        validate_invoice(&invoice)?;
        Ok(invoice)
    }
}

/// Status is not editable here; use the send and pay endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInvoiceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Only `cancelled` is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
}

impl UpdateRequest for UpdateInvoiceRequest {
    type Record = Invoice;
    type Error = FreelanceError;

    fn apply_to(self, invoice: &mut Invoice) -> Result<(), FreelanceError> {
        let mut updated = invoice.clone();
        if let Some(date) = self.invoice_date {
            updated.invoice_date = date;
        }
        if let Some(due) = self.due_date {
            updated.due_date = due;
        }
        if let Some(amount) = self.total_amount {
            updated.total_amount = amount;
        }
        if let Some(notes) = self.notes {
            updated.notes = Some(notes);
        }
        match self.status {
            None => {}
            Some(InvoiceStatus::Cancelled) if updated.status != InvoiceStatus::Paid => {
                updated.status = InvoiceStatus::Cancelled;
            }
            Some(status) => {
                return Err(FreelanceError::InvalidTransition {
                    action: status.as_str(),
                    from: updated.status.as_str(),
                })
            }
        }
        validate_invoice(&updated)?;
        *invoice = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_project_defaults() {
        let project = CreateProjectRequest::new(Uuid::new_v4(), "  API Integration ")
            .into_record()
            .unwrap();
        assert_eq!(project.name, "API Integration");
        assert_eq!(project.status, ProjectStatus::Planning);
        assert_eq!(project.currency, "USD");
    }

    #[test]
    fn test_create_project_uppercases_currency() {
        let mut request = CreateProjectRequest::new(Uuid::new_v4(), "Audit");
        request.currency = Some("eur".to_string());
        assert_eq!(request.into_record().unwrap().currency, "EUR");
    }

    #[test]
    fn test_create_time_entry_from_json() {
        let json = format!(
            r#"{{"project_id":"{}","work_date":"2024-05-01","hours":"3.5","description":""}}"#,
            Uuid::new_v4()
        );
        let entry = serde_json::from_str::<CreateTimeEntryRequest>(&json)
            .unwrap()
            .into_record()
            .unwrap();
        assert_eq!(entry.hours, "3.5".parse::<Decimal>().unwrap());
        assert_eq!(entry.description, None);
        assert!(entry.is_billable);
        assert!(!entry.is_invoiced);
    }

    #[test]
    fn test_update_time_entry_rejects_hours_and_keeps_original() {
        let mut entry = TimeEntry::new(Uuid::new_v4(), date(2024, 5, 1), Decimal::from(2));
        let result = UpdateTimeEntryRequest {
            hours: Some(Decimal::from(30)),
            ..Default::default()
        }
        .apply_to(&mut entry);

        assert_eq!(result, Err(FreelanceError::InvalidHours));
        assert_eq!(entry.hours, Decimal::from(2));
    }

    #[test]
    fn test_update_invoice_cancel() {
        let mut invoice = Invoice::new(
            Uuid::new_v4(),
            "INV-202405-001",
            date(2024, 5, 1),
            date(2024, 5, 31),
            Decimal::from(100),
        );
        UpdateInvoiceRequest {
            status: Some(InvoiceStatus::Cancelled),
            ..Default::default()
        }
        .apply_to(&mut invoice)
        .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Cancelled);

        let result = UpdateInvoiceRequest {
            status: Some(InvoiceStatus::Paid),
            ..Default::default()
        }
        .apply_to(&mut invoice);
        assert!(matches!(
            result,
            Err(FreelanceError::InvalidTransition { action: "paid", .. })
        ));
    }

    #[test]
    fn test_create_invoice_validates_dates() {
        let request = CreateInvoiceRequest {
            client_id: Uuid::new_v4(),
            project_id: None,
            invoice_number: "INV-202405-001".to_string(),
            invoice_date: date(2024, 5, 10),
            due_date: date(2024, 5, 9),
            total_amount: Decimal::from(100),
            currency: None,
            notes: None,
        };
        assert_eq!(
            request.into_record().unwrap_err(),
            FreelanceError::DueBeforeInvoiceDate
        );
    }
}
