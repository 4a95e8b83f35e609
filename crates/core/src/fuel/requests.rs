//! API request types for the fuel tracker.
//!
//! Shared between the server and the client crate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::FuelError;
use super::operations::{validate_fill_up, validate_trip, validate_vehicle};
use super::types::{FillUp, FuelType, Trip, TripType, Vehicle};
use crate::record::{CreateRequest, UpdateRequest};
use crate::serde::deserialize_optional_string;

/// Request payload for registering a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVehicleRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub vin: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub license_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tank_capacity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epa_city_mpg: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epa_highway_mpg: Option<Decimal>,
}

impl CreateVehicleRequest {
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i32) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            vin: None,
            license_plate: None,
            fuel_type: None,
            tank_capacity: None,
            epa_city_mpg: None,
            epa_highway_mpg: None,
        }
    }

    pub fn with_fuel_type(mut self, fuel_type: FuelType) -> Self {
        self.fuel_type = Some(fuel_type);
        self
    }

    pub fn with_license_plate(mut self, plate: impl Into<String>) -> Self {
        self.license_plate = Some(plate.into());
        self
    }
}

impl CreateRequest for CreateVehicleRequest {
    type Record = Vehicle;
    type Error = FuelError;

    fn into_record(self) -> Result<Vehicle, FuelError> {
        let mut vehicle = Vehicle::new(self.make.trim(), self.model.trim(), self.year);
        vehicle.vin = self.vin;
        vehicle.license_plate = self.license_plate;
        vehicle.fuel_type = self.fuel_type.unwrap_or_default();
        vehicle.tank_capacity = self.tank_capacity;
        vehicle.epa_city_mpg = self.epa_city_mpg;
        vehicle.epa_highway_mpg = self.epa_highway_mpg;
        validate_vehicle(&vehicle)?;
        Ok(vehicle)
    }
}

/// Request payload for updating a vehicle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVehicleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tank_capacity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epa_city_mpg: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epa_highway_mpg: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateRequest for UpdateVehicleRequest {
    type Record = Vehicle;
    type Error = FuelError;

    fn apply_to(self, vehicle: &mut Vehicle) -> Result<(), FuelError> {
        let mut updated = vehicle.clone();
        if let Some(make) = self.make {
            updated.make = make;
        }
        if let Some(model) = self.model {
            updated.model = model;
        }
        if let Some(year) = self.year {
            updated.year = year;
        }
        if let Some(vin) = self.vin {
            updated.vin = Some(vin);
        }
        if let Some(plate) = self.license_plate {
            updated.license_plate = Some(plate);
        }
        if let Some(fuel_type) = self.fuel_type {
            updated.fuel_type = fuel_type;
        }
        if let Some(capacity) = self.tank_capacity {
            updated.tank_capacity = Some(capacity);
        }
        if let Some(mpg) = self.epa_city_mpg {
            updated.epa_city_mpg = Some(mpg);
        }
        if let Some(mpg) = self.epa_highway_mpg {
            updated.epa_highway_mpg = Some(mpg);
        }
        if let Some(active) = self.is_active {
            updated.is_active = active;
        }
        validate_vehicle(&updated)?;
        *vehicle = updated;
        Ok(())
    }
}

/// Request payload for logging a fill-up.
///
/// The total cost and mileage are derived, never accepted from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFillUpRequest {
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub odometer: Decimal,
    pub gallons: Decimal,
    pub price_per_gallon: Decimal,
    #[serde(default)]
    pub is_full_tank: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub fuel_grade: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas_station: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

impl CreateFillUpRequest {
    pub fn new(
        vehicle_id: Uuid,
        date: NaiveDate,
        odometer: Decimal,
        gallons: Decimal,
        price_per_gallon: Decimal,
    ) -> Self {
        Self {
            vehicle_id,
            date,
            odometer,
            gallons,
            price_per_gallon,
            is_full_tank: false,
            fuel_grade: None,
            gas_station: None,
            notes: None,
        }
    }

    pub fn full_tank(mut self) -> Self {
        self.is_full_tank = true;
        self
    }
}

impl CreateRequest for CreateFillUpRequest {
    type Record = FillUp;
    type Error = FuelError;

    fn into_record(self) -> Result<FillUp, FuelError> {
        let mut fill_up = FillUp::new(
            self.vehicle_id,
            self.date,
            self.odometer,
            self.gallons,
            self.price_per_gallon,
        );
        fill_up.is_full_tank = self.is_full_tank;
        fill_up.fuel_grade = self.fuel_grade;
        fill_up.gas_station = self.gas_station;
        fill_up.notes = self.notes;
        validate_fill_up(&fill_up)?;
        Ok(fill_up)
    }
}

/// Request payload for correcting a fill-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFillUpRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallons: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_gallon: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_full_tank: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpdateRequest for UpdateFillUpRequest {
    type Record = FillUp;
    type Error = FuelError;

    /// Recomputes the total cost. Mileage depends on sibling fill-ups and is
    /// recomputed by the caller.
    fn apply_to(self, fill_up: &mut FillUp) -> Result<(), FuelError> {
        let mut updated = fill_up.clone();
        if let Some(date) = self.date {
            updated.date = date;
        }
        if let Some(odometer) = self.odometer {
            updated.odometer = odometer;
        }
        if let Some(gallons) = self.gallons {
            updated.gallons = gallons;
        }
        if let Some(price) = self.price_per_gallon {
            updated.price_per_gallon = price;
        }
        if let Some(full) = self.is_full_tank {
            updated.is_full_tank = full;
        }
        if let Some(grade) = self.fuel_grade {
            updated.fuel_grade = Some(grade);
        }
        if let Some(station) = self.gas_station {
            updated.gas_station = Some(station);
        }
        if let Some(notes) = self.notes {
            updated.notes = Some(notes);
        }
        updated.calculate_total_cost();
        validate_fill_up(&updated)?;
        *fill_up = updated;
        Ok(())
    }
}

/// Request payload for logging a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTripRequest {
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub start_odometer: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_odometer: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_type: Option<TripType>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub purpose: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_location: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_location: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

impl CreateRequest for CreateTripRequest {
    type Record = Trip;
    type Error = FuelError;

    fn into_record(self) -> Result<Trip, FuelError> {
        let mut trip = Trip::new(self.vehicle_id, self.start_date, self.start_odometer);
        trip.end_date = self.end_date;
        trip.end_odometer = self.end_odometer;
        trip.trip_type = self.trip_type.unwrap_or_default();
        trip.purpose = self.purpose;
        trip.start_location = self.start_location;
        trip.end_location = self.end_location;
        trip.notes = self.notes;
        validate_trip(&trip)?;
        Ok(trip)
    }
}

/// Request payload for updating a trip, typically to close it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTripRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_odometer: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_odometer: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_type: Option<TripType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpdateRequest for UpdateTripRequest {
    type Record = Trip;
    type Error = FuelError;

    fn apply_to(self, trip: &mut Trip) -> Result<(), FuelError> {
        let mut updated = trip.clone();
        if let Some(date) = self.start_date {
            updated.start_date = date;
        }
        if let Some(date) = self.end_date {
            updated.end_date = Some(date);
        }
        if let Some(odometer) = self.start_odometer {
            updated.start_odometer = odometer;
        }
        if let Some(odometer) = self.end_odometer {
            updated.end_odometer = Some(odometer);
        }
        if let Some(trip_type) = self.trip_type {
            updated.trip_type = trip_type;
        }
        if let Some(purpose) = self.purpose {
            updated.purpose = Some(purpose);
        }
        if let Some(location) = self.end_location {
            updated.end_location = Some(location);
        }
        if let Some(notes) = self.notes {
            updated.notes = Some(notes);
        }
        validate_trip(&updated)?;
        *trip = updated;
        Ok(())
    }
}
