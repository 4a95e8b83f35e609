//! Fuel economy tracking: vehicles, fill-ups, trips and efficiency reports.

mod error;
mod operations;
mod requests;
mod types;

pub use error::FuelError;
pub use operations::{
    efficiency_report, previous_odometer, trip_summary, validate_fill_up, validate_trip,
    validate_vehicle,
};
pub use requests::{
    CreateFillUpRequest, CreateTripRequest, CreateVehicleRequest, UpdateFillUpRequest,
    UpdateTripRequest, UpdateVehicleRequest,
};
pub use types::{EfficiencyReport, FillUp, FuelType, Trip, TripSummary, TripType, Vehicle};
