use thiserror::Error;

/// Validation errors for vehicles, fill-ups and trips.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FuelError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("{0} cannot exceed {1} characters")]
    TooLong(&'static str, usize),
    #[error("Model year {0} is out of range")]
    InvalidYear(i32),
    #[error("Gallons must be greater than zero")]
    NonPositiveGallons,
    #[error("{0} cannot be negative")]
    Negative(&'static str),
    #[error("End odometer must not be less than start odometer")]
    OdometerWentBackwards,
    #[error("End date must be on or after start date")]
    InvalidDateRange,
}
