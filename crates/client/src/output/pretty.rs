//! Pretty output formatting.

use trackhub_core::events::ChangeEvent;
use trackhub_core::freelance::{Invoice, Project, ProjectSummary};
use trackhub_core::fuel::{EfficiencyReport, FillUp, Vehicle};
use trackhub_core::maintenance::{CompleteTaskResponse, Contractor, MaintenanceTask};

/// Formats a titled list, one block per item.
fn format_list<T>(title: &str, items: &[T], format_item: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return format!("No {} found.", title.to_lowercase());
    }
    let mut output = format!("{} ({})\n", title.to_uppercase(), items.len());
    output.push_str(&"-".repeat(40));
    for item in items {
        output.push_str(&format!("\n{}", format_item(item)));
        output.push('\n');
    }
    output
}

/// Format a vehicle for display.
pub fn format_vehicle(vehicle: &Vehicle) -> String {
    let mut output = format!(
        "{} {} {}\n  ID: {}",
        vehicle.year, vehicle.make, vehicle.model, vehicle.id
    );
    if let Some(plate) = &vehicle.license_plate {
        output.push_str(&format!("\n  Plate: {}", plate));
    }
    if let Some(capacity) = vehicle.tank_capacity {
        output.push_str(&format!("\n  Tank: {} gal", capacity));
    }
    output
}

pub fn format_vehicles(vehicles: &[Vehicle]) -> String {
    format_list("Vehicles", vehicles, format_vehicle)
}

/// Format a fill-up for display.
pub fn format_fill_up(fill_up: &FillUp) -> String {
    let mut output = format!(
        "{}  {} gal @ ${} = ${}\n  ID: {}\n  Odometer: {}",
        fill_up.date,
        fill_up.gallons,
        fill_up.price_per_gallon,
        fill_up.total_cost.round_dp(2),
        fill_up.id,
        fill_up.odometer
    );
    if let Some(mpg) = fill_up.miles_per_gallon {
        output.push_str(&format!("\n  MPG: {}", mpg));
    }
    if let Some(station) = &fill_up.gas_station {
        output.push_str(&format!("\n  Station: {}", station));
    }
    output
}

pub fn format_fill_ups(fill_ups: &[FillUp]) -> String {
    format_list("Fill-ups", fill_ups, format_fill_up)
}

pub fn format_efficiency(report: &EfficiencyReport) -> String {
    let mut output = format!(
        "Efficiency {} to {}\n  Fill-ups: {}\n  Miles: {}\n  Gallons: {}\n  Average MPG: {}\n  Fuel cost: ${}\n  Cost per mile: ${}",
        report.start_date,
        report.end_date,
        report.number_of_fill_ups,
        report.total_miles,
        report.total_gallons,
        report.average_mpg,
        report.total_fuel_cost,
        report.cost_per_mile
    );
    if let (Some(best), Some(worst)) = (report.best_mpg, report.worst_mpg) {
        output.push_str(&format!("\n  Best/worst MPG: {} / {}", best, worst));
    }
    output
}

/// Format a maintenance task for display.
pub fn format_task(task: &MaintenanceTask) -> String {
    let mut output = format!(
        "{} [{:?}] P{}\n  ID: {}",
        task.name, task.status, task.priority, task.id
    );
    if let Some(due) = task.due_date {
        output.push_str(&format!("\n  Due: {}", due));
    }
    if let Some(days) = task.recurrence_frequency_days {
        output.push_str(&format!("\n  Every: {} days", days));
    }
    if let Some(cost) = task.actual_cost.or(task.estimated_cost) {
        output.push_str(&format!("\n  Cost: ${}", cost));
    }
    output
}

pub fn format_tasks(tasks: &[MaintenanceTask]) -> String {
    format_list("Tasks", tasks, format_task)
}

pub fn format_completion(response: &CompleteTaskResponse) -> String {
    let mut output = format!("Completed:\n{}", format_task(&response.completed));
    if let Some(next) = &response.next {
        output.push_str(&format!("\nNext:\n{}", format_task(next)));
    }
    output
}

pub fn format_contractor(contractor: &Contractor) -> String {
    let mut output = format!("{}\n  ID: {}", contractor.name, contractor.id);
    if let Some(specialty) = &contractor.specialty {
        output.push_str(&format!("\n  Specialty: {}", specialty));
    }
    if let Some(phone) = &contractor.phone {
        output.push_str(&format!("\n  Phone: {}", phone));
    }
    if let Some(rating) = contractor.rating {
        output.push_str(&format!("\n  Rating: {}/5", rating));
    }
    output
}

pub fn format_contractors(contractors: &[Contractor]) -> String {
    format_list("Contractors", contractors, format_contractor)
}

/// Format a project for display.
pub fn format_project(project: &Project) -> String {
    let mut output = format!("{} [{:?}]\n  ID: {}", project.name, project.status, project.id);
    if let Some(rate) = project.hourly_rate {
        output.push_str(&format!("\n  Rate: {} {}/h", rate, project.currency));
    }
    if let Some(due) = project.due_date {
        output.push_str(&format!("\n  Due: {}", due));
    }
    output
}

pub fn format_projects(projects: &[Project]) -> String {
    format_list("Projects", projects, format_project)
}

pub fn format_summary(summary: &ProjectSummary) -> String {
    let mut output = format!(
        "Project {}\n  Hours: {} ({} billable, {} unbilled)\n  Billable: {} {}",
        summary.project_id,
        summary.total_hours,
        summary.billable_hours,
        summary.unbilled_hours,
        summary.billable_amount,
        summary.currency
    );
    if let Some(remaining) = summary.budget_remaining {
        output.push_str(&format!("\n  Budget remaining: {} {}", remaining, summary.currency));
    }
    output
}

/// Format an invoice for display.
pub fn format_invoice(invoice: &Invoice) -> String {
    let mut output = format!(
        "{} [{}] {} {}\n  ID: {}\n  Issued: {}  Due: {}",
        invoice.invoice_number,
        invoice.status.as_str(),
        invoice.total_amount,
        invoice.currency,
        invoice.id,
        invoice.invoice_date,
        invoice.due_date
    );
    if let Some(paid) = invoice.paid_date {
        output.push_str(&format!("\n  Paid: {}", paid));
    }
    output
}

pub fn format_invoices(invoices: &[Invoice]) -> String {
    format_list("Invoices", invoices, format_invoice)
}

/// One line per change event.
pub fn format_event(event_id: Option<u64>, event: &ChangeEvent) -> String {
    let id = event_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    format!("[{}] {} {}", id, event.event_type(), event.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use trackhub_core::record::RecordKind;
    use uuid::Uuid;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_vehicles(&[]), "No vehicles found.");
    }

    #[test]
    fn test_fill_up_shows_mpg() {
        let mut fill_up = FillUp::new(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            Decimal::from(25350),
            "11.2".parse().unwrap(),
            "3.45".parse().unwrap(),
        );
        fill_up.calculate_total_cost();
        fill_up.calculate_mpg(Decimal::from(25000));

        let output = format_fill_up(&fill_up);

        assert!(output.contains("$38.64"));
        assert!(output.contains("MPG: 31.25"));
    }

    #[test]
    fn test_format_event() {
        let id = Uuid::nil();
        let event = ChangeEvent::deleted(RecordKind::Invoice, id, None);
        assert_eq!(
            format_event(Some(3), &event),
            format!("[3] invoice.deleted {id}")
        );
    }
}
