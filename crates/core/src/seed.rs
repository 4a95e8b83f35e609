//! Demo data for local development.
//!
//! Pure functions building a small, deterministic data set with fixed ids so
//! the demo records can be addressed directly from the client CLI. Dates are
//! laid out relative to `today`.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::freelance::{Client, Invoice, Project, ProjectStatus, TimeEntry};
use crate::fuel::{FillUp, FuelType, Trip, TripType, Vehicle};
use crate::maintenance::{Contractor, MaintenanceTask, MaintenanceType, ServiceLog, TaskStatus};

pub const CAMRY_ID: Uuid = Uuid::from_u128(0xaaaaaaaa_aaaa_aaaa_aaaa_aaaaaaaaaaaa);
pub const CIVIC_ID: Uuid = Uuid::from_u128(0xbbbbbbbb_bbbb_bbbb_bbbb_bbbbbbbbbbbb);

pub const HVAC_CONTRACTOR_ID: Uuid = Uuid::from_u128(0xaaaaaaaa_aaaa_aaaa_aaaa_aaaaaaaaaaaa);
pub const PLUMBING_CONTRACTOR_ID: Uuid = Uuid::from_u128(0xbbbbbbbb_bbbb_bbbb_bbbb_bbbbbbbbbbbb);
pub const LANDSCAPING_CONTRACTOR_ID: Uuid =
    Uuid::from_u128(0xcccccccc_cccc_cccc_cccc_cccccccccccc);
pub const HVAC_FILTER_TASK_ID: Uuid = Uuid::from_u128(0x11111111_aaaa_aaaa_aaaa_aaaaaaaaaaaa);
pub const GUTTER_TASK_ID: Uuid = Uuid::from_u128(0x22222222_aaaa_aaaa_aaaa_aaaaaaaaaaaa);
pub const HVAC_INSPECTION_TASK_ID: Uuid = Uuid::from_u128(0x33333333_aaaa_aaaa_aaaa_aaaaaaaaaaaa);

pub const SMITH_CLIENT_ID: Uuid = Uuid::from_u128(0xaaaaaaaa_aaaa_aaaa_aaaa_aaaaaaaaaaaa);
pub const TECHSTART_CLIENT_ID: Uuid = Uuid::from_u128(0xbbbbbbbb_bbbb_bbbb_bbbb_bbbbbbbbbbbb);
pub const WEBSITE_PROJECT_ID: Uuid = Uuid::from_u128(0x11111111_aaaa_aaaa_aaaa_aaaaaaaaaaaa);
pub const MIGRATION_PROJECT_ID: Uuid = Uuid::from_u128(0x33333333_aaaa_aaaa_aaaa_aaaaaaaaaaaa);

/// Every demo record, grouped by kind.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub vehicles: Vec<Vehicle>,
    pub fill_ups: Vec<FillUp>,
    pub trips: Vec<Trip>,
    pub contractors: Vec<Contractor>,
    pub tasks: Vec<MaintenanceTask>,
    pub service_logs: Vec<ServiceLog>,
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub time_entries: Vec<TimeEntry>,
    pub invoices: Vec<Invoice>,
}

impl SeedData {
    pub fn len(&self) -> usize {
        self.vehicles.len()
            + self.fill_ups.len()
            + self.trips.len()
            + self.contractors.len()
            + self.tasks.len()
            + self.service_logs.len()
            + self.clients.len()
            + self.projects.len()
            + self.time_entries.len()
            + self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the complete demo data set.
///
/// # Example
///
/// ```
/// use trackhub_core::seed::{demo_data, CAMRY_ID};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let data = demo_data(today);
///
/// assert!(data.vehicles.iter().any(|v| v.id == CAMRY_ID));
/// ```
pub fn demo_data(today: NaiveDate) -> SeedData {
    let (vehicles, fill_ups, trips) = fuel_data(today);
    let (contractors, tasks, service_logs) = maintenance_data(today);
    let (clients, projects, time_entries, invoices) = freelance_data(today);

    SeedData {
        vehicles,
        fill_ups,
        trips,
        contractors,
        tasks,
        service_logs,
        clients,
        projects,
        time_entries,
        invoices,
    }
}

fn dec(units: i64, scale: u32) -> Decimal {
    Decimal::new(units, scale)
}

fn fuel_data(today: NaiveDate) -> (Vec<Vehicle>, Vec<FillUp>, Vec<Trip>) {
    let days_ago = |n: i64| today - Duration::days(n);

    let mut camry = Vehicle::new("Toyota", "Camry", 2020).with_id(CAMRY_ID);
    camry.vin = Some("1HGBH41JXMN109186".to_string());
    camry.license_plate = Some("ABC1234".to_string());
    camry.fuel_type = FuelType::Gasoline;
    camry.tank_capacity = Some(dec(158, 1));

    let mut civic = Vehicle::new("Honda", "Civic", 2019).with_id(CIVIC_ID);
    civic.tank_capacity = Some(dec(124, 1));

    // (id prefix, days ago, odometer, gallons, price, station)
    let readings = [
        (0x11111111u128, 30, 25000, dec(125, 1), dec(345, 2), "Gas Station A"),
        (0x22222222u128, 23, 25350, dec(112, 1), dec(352, 2), "Gas Station B"),
        (0x33333333u128, 16, 25720, dec(128, 1), dec(338, 2), "Gas Station A"),
    ];

    let mut fill_ups = Vec::with_capacity(readings.len());
    let mut previous: Option<Decimal> = None;
    for (prefix, ago, odometer, gallons, price, station) in readings {
        let odometer = Decimal::from(odometer);
        let mut fill_up = FillUp::new(CAMRY_ID, days_ago(ago), odometer, gallons, price)
            .with_id(Uuid::from_u128((prefix << 96) | 0xaaaa_aaaa_aaaa_aaaaaaaaaaaa))
            .full_tank();
        fill_up.gas_station = Some(station.to_string());
        if let Some(prev) = previous {
            fill_up.calculate_mpg(prev);
        }
        previous = Some(odometer);
        fill_ups.push(fill_up);
    }

    let mut business = Trip::new(CAMRY_ID, days_ago(20), Decimal::from(25350))
        .with_id(Uuid::from_u128(0x44444444_aaaa_aaaa_aaaa_aaaaaaaaaaaa))
        .ended(days_ago(18), Decimal::from(25720))
        .with_type(TripType::Business);
    business.purpose = Some("Client meeting in another city".to_string());

    let mut personal = Trip::new(CAMRY_ID, days_ago(10), Decimal::from(25720))
        .with_id(Uuid::from_u128(0x55555555_aaaa_aaaa_aaaa_aaaaaaaaaaaa))
        .ended(days_ago(9), Decimal::from(25850))
        .with_type(TripType::Personal);
    personal.purpose = Some("Weekend getaway".to_string());

    (vec![camry, civic], fill_ups, vec![business, personal])
}

fn maintenance_data(today: NaiveDate) -> (Vec<Contractor>, Vec<MaintenanceTask>, Vec<ServiceLog>) {
    let contractor = |id: Uuid, name: &str, specialty: &str, phone: &str, email: &str, rating: u8| {
        let mut c = Contractor::new(name)
            .with_id(id)
            .with_specialty(specialty);
        c.phone = Some(phone.to_string());
        c.email = Some(email.to_string());
        c.is_insured = true;
        c.rating = Some(rating);
        c
    };

    let contractors = vec![
        contractor(
            HVAC_CONTRACTOR_ID,
            "ABC HVAC Services",
            "Heating & Cooling",
            "555-0101",
            "info@abchvac.com",
            5,
        ),
        contractor(
            PLUMBING_CONTRACTOR_ID,
            "Smith Plumbing",
            "Plumbing",
            "555-0202",
            "contact@smithplumbing.com",
            4,
        ),
        contractor(
            LANDSCAPING_CONTRACTOR_ID,
            "Elite Landscaping",
            "Landscaping",
            "555-0303",
            "service@elitelandscaping.com",
            5,
        ),
    ];

    let mut filter = MaintenanceTask::new("HVAC Filter Replacement")
        .with_id(HVAC_FILTER_TASK_ID)
        .due_on(today + Duration::days(30))
        .every(90)
        .with_priority(2);
    filter.description = Some("Replace air filters in HVAC system".to_string());
    filter.estimated_cost = Some(Decimal::from(50));
    filter.location = Some("Basement".to_string());
    filter.contractor_id = Some(HVAC_CONTRACTOR_ID);

    let mut gutters = MaintenanceTask::new("Gutter Cleaning")
        .with_id(GUTTER_TASK_ID)
        .due_on(today + Duration::days(15))
        .every(180);
    gutters.description = Some("Clean gutters and downspouts".to_string());
    gutters.maintenance_type = MaintenanceType::Seasonal;
    gutters.estimated_cost = Some(Decimal::from(150));
    gutters.location = Some("Exterior".to_string());

    let mut inspection = MaintenanceTask::new("Annual HVAC Inspection")
        .with_id(HVAC_INSPECTION_TASK_ID)
        .due_on(today - Duration::days(40))
        .every(365)
        .with_priority(1);
    inspection.maintenance_type = MaintenanceType::Inspection;
    inspection.status = TaskStatus::Completed;
    inspection.completed_date = Some(today - Duration::days(36));
    inspection.estimated_cost = Some(Decimal::from(200));
    inspection.actual_cost = Some(Decimal::from(185));
    inspection.contractor_id = Some(HVAC_CONTRACTOR_ID);

    let mut heater = MaintenanceTask::new("Water Heater Flush")
        .with_id(Uuid::from_u128(0x44444444_aaaa_aaaa_aaaa_aaaaaaaaaaaa))
        .due_on(today - Duration::days(5))
        .every(365)
        .with_priority(2);
    heater.description = Some("Drain and flush water heater to remove sediment".to_string());
    heater.estimated_cost = Some(Decimal::from(100));
    heater.location = Some("Garage".to_string());
    heater.contractor_id = Some(PLUMBING_CONTRACTOR_ID);

    let mut log = ServiceLog::new(
        HVAC_INSPECTION_TASK_ID,
        today - Duration::days(36),
        "Annual inspection and tune-up",
    );
    log.id = Uuid::from_u128(0x66666666_aaaa_aaaa_aaaa_aaaaaaaaaaaa);
    log.contractor_id = Some(HVAC_CONTRACTOR_ID);
    log.cost = Some(Decimal::from(185));
    log.labor_hours = Some(dec(15, 1));

    (
        contractors,
        vec![filter, gutters, inspection, heater],
        vec![log],
    )
}

fn freelance_data(
    today: NaiveDate,
) -> (Vec<Client>, Vec<Project>, Vec<TimeEntry>, Vec<Invoice>) {
    let days_ago = |n: i64| today - Duration::days(n);

    let mut smith = Client::new("John Smith")
        .with_id(SMITH_CLIENT_ID)
        .with_company("Smith Industries");
    smith.email = Some("john.smith@smithind.com".to_string());
    smith.phone = Some("+1-555-0123".to_string());
    smith.notes = Some("Long-term client, prefers email communication".to_string());

    let mut techstart = Client::new("Sarah Johnson")
        .with_id(TECHSTART_CLIENT_ID)
        .with_company("TechStart Solutions");
    techstart.email = Some("sarah@techstart.io".to_string());
    techstart.phone = Some("+1-555-0456".to_string());

    let mut website = Project::new(SMITH_CLIENT_ID, "Website Redesign")
        .with_id(WEBSITE_PROJECT_ID)
        .with_hourly_rate(dec(15000, 2));
    website.description = Some("Complete redesign of corporate website".to_string());
    website.status = ProjectStatus::InProgress;
    website.start_date = Some(days_ago(60));
    website.due_date = Some(today + Duration::days(30));

    let mut migration = Project::new(SMITH_CLIENT_ID, "Database Migration")
        .with_id(MIGRATION_PROJECT_ID)
        .with_hourly_rate(dec(17500, 2));
    migration.status = ProjectStatus::Completed;
    migration.start_date = Some(days_ago(120));
    migration.due_date = Some(days_ago(30));
    migration.completion_date = Some(days_ago(35));

    let time_entries = vec![
        TimeEntry::new(WEBSITE_PROJECT_ID, days_ago(5), dec(65, 1))
            .with_id(Uuid::from_u128(0x44444444_aaaa_aaaa_aaaa_aaaaaaaaaaaa))
            .with_description("Implemented homepage responsive design"),
        TimeEntry::new(WEBSITE_PROJECT_ID, days_ago(3), dec(80, 1))
            .with_id(Uuid::from_u128(0x55555555_aaaa_aaaa_aaaa_aaaaaaaaaaaa))
            .with_description("Developed contact form with validation"),
    ];

    let mut invoice = Invoice::new(
        SMITH_CLIENT_ID,
        "INV-2024-001",
        days_ago(34),
        days_ago(4),
        Decimal::from(7000),
    )
    .for_project(MIGRATION_PROJECT_ID);
    invoice.id = Uuid::from_u128(0x77777777_aaaa_aaaa_aaaa_aaaaaaaaaaaa);
    invoice.status = crate::freelance::InvoiceStatus::Sent;

    (
        vec![smith, techstart],
        vec![website, migration],
        time_entries,
        vec![invoice],
    )
}
