use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::{Record, RecordKind};

/// Fuel a vehicle runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    #[default]
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
    FlexFuel,
}

/// Why a trip was taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    Business,
    #[default]
    Personal,
    Commute,
    Other,
}

/// A tracked vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(default)]
    pub fuel_type: FuelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tank_capacity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epa_city_mpg: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epa_highway_mpg: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            make: make.into(),
            model: model.into(),
            year,
            vin: None,
            license_plate: None,
            fuel_type: FuelType::default(),
            tank_capacity: None,
            epa_city_mpg: None,
            epa_highway_mpg: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// e.g. "2020 Toyota Camry"
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

impl Record for Vehicle {
    const KIND: RecordKind = RecordKind::Vehicle;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// A single refuelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillUp {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub odometer: Decimal,
    pub gallons: Decimal,
    pub price_per_gallon: Decimal,
    pub total_cost: Decimal,
    #[serde(default)]
    pub is_full_tank: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miles_per_gallon: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FillUp {
    /// Creates a fill-up with its total cost already computed.
    pub fn new(
        vehicle_id: Uuid,
        date: NaiveDate,
        odometer: Decimal,
        gallons: Decimal,
        price_per_gallon: Decimal,
    ) -> Self {
        let now = Utc::now();
        let mut fill_up = Self {
            id: Uuid::new_v4(),
            vehicle_id,
            date,
            odometer,
            gallons,
            price_per_gallon,
            total_cost: Decimal::ZERO,
            is_full_tank: false,
            fuel_grade: None,
            gas_station: None,
            miles_per_gallon: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        fill_up.calculate_total_cost();
        fill_up
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn full_tank(mut self) -> Self {
        self.is_full_tank = true;
        self
    }
}

impl Record for FillUp {
    const KIND: RecordKind = RecordKind::FillUp;

    fn id(&self) -> Uuid {
        self.id
    }

    fn parent_id(&self) -> Option<Uuid> {
        Some(self.vehicle_id)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// A logged trip between two odometer readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub start_odometer: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_odometer: Option<Decimal>,
    #[serde(default)]
    pub trip_type: TripType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    pub fn new(vehicle_id: Uuid, start_date: NaiveDate, start_odometer: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            start_date,
            end_date: None,
            start_odometer,
            end_odometer: None,
            trip_type: TripType::default(),
            purpose: None,
            start_location: None,
            end_location: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Closes the trip at the given date and odometer reading.
    pub fn ended(mut self, end_date: NaiveDate, end_odometer: Decimal) -> Self {
        self.end_date = Some(end_date);
        self.end_odometer = Some(end_odometer);
        self
    }

    pub fn with_type(mut self, trip_type: TripType) -> Self {
        self.trip_type = trip_type;
        self
    }

    /// Miles driven. Zero while the trip is still open.
    pub fn distance(&self) -> Decimal {
        self.end_odometer
            .map(|end| (end - self.start_odometer).max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO)
    }
}

impl Record for Trip {
    const KIND: RecordKind = RecordKind::Trip;

    fn id(&self) -> Uuid {
        self.id
    }

    fn parent_id(&self) -> Option<Uuid> {
        Some(self.vehicle_id)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Fuel efficiency of a vehicle over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyReport {
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_miles: Decimal,
    pub total_gallons: Decimal,
    pub average_mpg: Decimal,
    pub total_fuel_cost: Decimal,
    pub cost_per_mile: Decimal,
    pub number_of_fill_ups: usize,
    pub best_mpg: Option<Decimal>,
    pub worst_mpg: Option<Decimal>,
}

impl EfficiencyReport {
    pub fn new(vehicle_id: Uuid, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            vehicle_id,
            start_date,
            end_date,
            total_miles: Decimal::ZERO,
            total_gallons: Decimal::ZERO,
            average_mpg: Decimal::ZERO,
            total_fuel_cost: Decimal::ZERO,
            cost_per_mile: Decimal::ZERO,
            number_of_fill_ups: 0,
            best_mpg: None,
            worst_mpg: None,
        }
    }
}

/// Mileage totals for a set of trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub total_trips: usize,
    pub total_miles: Decimal,
    pub business_miles: Decimal,
    pub personal_miles: Decimal,
    pub commute_miles: Decimal,
    pub other_miles: Decimal,
}
