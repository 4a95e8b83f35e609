use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::FuelError;
use super::types::{EfficiencyReport, FillUp, Trip, TripSummary, TripType, Vehicle};
use crate::storage::DateRange;

const MAX_NAME_LEN: usize = 100;

impl FillUp {
    /// Sets `total_cost` to gallons times price per gallon.
    pub fn calculate_total_cost(&mut self) {
        self.total_cost = self.gallons * self.price_per_gallon;
    }

    /// Sets `miles_per_gallon` from the distance since the previous fill-up.
    ///
    /// Leaves the value untouched when no fuel was added or the odometer did
    /// not advance.
    pub fn calculate_mpg(&mut self, previous_odometer: Decimal) {
        if self.gallons > Decimal::ZERO && self.odometer > previous_odometer {
            let miles = self.odometer - previous_odometer;
            self.miles_per_gallon = Some((miles / self.gallons).round_dp(2));
        }
    }
}

impl EfficiencyReport {
    pub fn calculate_average_mpg(&mut self) {
        self.average_mpg = if self.total_gallons > Decimal::ZERO {
            (self.total_miles / self.total_gallons).round_dp(2)
        } else {
            Decimal::ZERO
        };
    }

    pub fn calculate_cost_per_mile(&mut self) {
        self.cost_per_mile = if self.total_miles > Decimal::ZERO {
            (self.total_fuel_cost / self.total_miles).round_dp(4)
        } else {
            Decimal::ZERO
        };
    }

    /// Fills totals, extremes and ratios from the given fill-ups.
    ///
    /// `total_miles` must already be set.
    pub fn generate_report(&mut self, fill_ups: &[FillUp]) {
        self.number_of_fill_ups = fill_ups.len();
        self.total_gallons = fill_ups.iter().map(|f| f.gallons).sum();
        self.total_fuel_cost = fill_ups.iter().map(|f| f.total_cost).sum();

        let mpgs = fill_ups.iter().filter_map(|f| f.miles_per_gallon);
        self.best_mpg = mpgs.clone().max();
        self.worst_mpg = mpgs.min();

        self.calculate_average_mpg();
        self.calculate_cost_per_mile();
    }
}

/// Builds the efficiency report for a vehicle over a date range.
///
/// Miles are measured between the lowest and highest odometer readings of
/// the fill-ups inside the range.
pub fn efficiency_report(
    vehicle_id: Uuid,
    fill_ups: &[FillUp],
    range: DateRange,
) -> EfficiencyReport {
    let mut in_range: Vec<FillUp> = fill_ups
        .iter()
        .filter(|f| f.vehicle_id == vehicle_id && range.contains(f.date))
        .cloned()
        .collect();
    in_range.sort_by(|a, b| a.odometer.cmp(&b.odometer));

    let start_date = in_range.iter().map(|f| f.date).min().unwrap_or(range.start);
    let end_date = in_range.iter().map(|f| f.date).max().unwrap_or(range.end);

    let mut report = EfficiencyReport::new(vehicle_id, start_date, end_date);
    if let (Some(first), Some(last)) = (in_range.first(), in_range.last()) {
        report.total_miles = last.odometer - first.odometer;
    }
    report.generate_report(&in_range);
    report
}

/// Highest odometer reading strictly below `odometer`, if any.
pub fn previous_odometer(fill_ups: &[FillUp], odometer: Decimal) -> Option<Decimal> {
    fill_ups
        .iter()
        .map(|f| f.odometer)
        .filter(|o| *o < odometer)
        .max()
}

/// Totals miles per trip type.
pub fn trip_summary(trips: &[Trip]) -> TripSummary {
    trips.iter().fold(TripSummary::default(), |mut summary, trip| {
        let miles = trip.distance();
        summary.total_trips += 1;
        summary.total_miles += miles;
        match trip.trip_type {
            TripType::Business => summary.business_miles += miles,
            TripType::Personal => summary.personal_miles += miles,
            TripType::Commute => summary.commute_miles += miles,
            TripType::Other => summary.other_miles += miles,
        }
        summary
    })
}

pub fn validate_vehicle(vehicle: &Vehicle) -> Result<(), FuelError> {
    validate_name("make", &vehicle.make)?;
    validate_name("model", &vehicle.model)?;
    if !(1900..=2100).contains(&vehicle.year) {
        return Err(FuelError::InvalidYear(vehicle.year));
    }
    for (field, value) in [
        ("tank_capacity", vehicle.tank_capacity),
        ("epa_city_mpg", vehicle.epa_city_mpg),
        ("epa_highway_mpg", vehicle.epa_highway_mpg),
    ] {
        if value.is_some_and(|v| v < Decimal::ZERO) {
            return Err(FuelError::Negative(field));
        }
    }
    Ok(())
}

pub fn validate_fill_up(fill_up: &FillUp) -> Result<(), FuelError> {
    if fill_up.gallons <= Decimal::ZERO {
        return Err(FuelError::NonPositiveGallons);
    }
    if fill_up.price_per_gallon < Decimal::ZERO {
        return Err(FuelError::Negative("price_per_gallon"));
    }
    if fill_up.odometer < Decimal::ZERO {
        return Err(FuelError::Negative("odometer"));
    }
    Ok(())
}

pub fn validate_trip(trip: &Trip) -> Result<(), FuelError> {
    if trip.start_odometer < Decimal::ZERO {
        return Err(FuelError::Negative("start_odometer"));
    }
    if trip.end_odometer.is_some_and(|end| end < trip.start_odometer) {
        return Err(FuelError::OdometerWentBackwards);
    }
    if trip.end_date.is_some_and(|end| end < trip.start_date) {
        return Err(FuelError::InvalidDateRange);
    }
    Ok(())
}

fn validate_name(field: &'static str, value: &str) -> Result<(), FuelError> {
    if value.trim().is_empty() {
        return Err(FuelError::EmptyField(field));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(FuelError::TooLong(field, MAX_NAME_LEN));
    }
    Ok(())
}
