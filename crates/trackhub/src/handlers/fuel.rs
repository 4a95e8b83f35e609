//! Fuel economy endpoints beyond plain CRUD.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use trackhub_core::fuel::{efficiency_report, trip_summary, EfficiencyReport, TripSummary, Vehicle};
use trackhub_core::serde::deserialize_optional_date;
use trackhub_core::storage::DateRange;

use crate::handlers::{records::find, AppError};
use crate::state::AppState;

/// Query parameters for the efficiency report. Missing bounds are open.
#[derive(Debug, Default, Deserialize)]
pub struct EfficiencyQuery {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
}

/// GET /vehicles/{id}/efficiency - Fuel efficiency over a date range.
pub async fn efficiency(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Query(query): Query<EfficiencyQuery>,
) -> Result<Json<EfficiencyReport>, AppError> {
    let range = DateRange::from_bounds(query.start_date, query.end_date)?;
    let vehicle = find::<Vehicle>(&state, vehicle_id).await?;

    let fill_ups = state.fill_ups.list(Some(vehicle.id)).await?;
    let report = efficiency_report(vehicle.id, &fill_ups, range);

    tracing::debug!(
        %vehicle_id,
        fill_ups = report.number_of_fill_ups,
        average_mpg = %report.average_mpg,
        "Built efficiency report"
    );
    Ok(Json(report))
}

/// GET /vehicles/{id}/trips/summary - Miles per trip type.
pub async fn trips_summary(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<TripSummary>, AppError> {
    let vehicle = find::<Vehicle>(&state, vehicle_id).await?;
    let trips = state.trips.list(Some(vehicle.id)).await?;
    Ok(Json(trip_summary(&trips)))
}
