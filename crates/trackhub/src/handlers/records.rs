//! Generic CRUD handlers shared by every record kind.
//!
//! Routes are instantiated per type, e.g. `get(records::list::<Vehicle>)`.

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use trackhub_core::freelance::{
    Client, CreateClientRequest, CreateInvoiceRequest, CreateProjectRequest,
    CreateTimeEntryRequest, Invoice, Project, TimeEntry, UpdateClientRequest,
    UpdateInvoiceRequest, UpdateProjectRequest, UpdateTimeEntryRequest,
};
use trackhub_core::fuel::{
    CreateFillUpRequest, CreateTripRequest, CreateVehicleRequest, FillUp, Trip,
    UpdateFillUpRequest, UpdateTripRequest, UpdateVehicleRequest, Vehicle,
};
use trackhub_core::maintenance::{
    Contractor, CreateContractorRequest, CreateServiceLogRequest, CreateTaskRequest,
    MaintenanceTask, ServiceLog, UpdateContractorRequest, UpdateServiceLogRequest,
    UpdateTaskRequest,
};
use trackhub_core::record::{CreateRequest, Record, UpdateRequest};
use trackhub_core::serde::deserialize_optional_uuid;
use trackhub_core::storage::RepositoryError;

use crate::handlers::AppError;
use crate::state::{AppState, Stored};

/// A record type exposed over the generic CRUD routes.
#[async_trait]
pub trait Resource: Stored {
    type Create: CreateRequest<Record = Self>;
    type Update: UpdateRequest<Record = Self>;

    /// Fills fields derived from other records, right before a write.
    async fn derive(_state: &AppState, _record: &mut Self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

macro_rules! impl_resource {
    ($($ty:ty => ($create:ty, $update:ty)),* $(,)?) => {
        $(
            #[async_trait]
            impl Resource for $ty {
                type Create = $create;
                type Update = $update;
            }
        )*
    };
}

impl_resource! {
    Vehicle => (CreateVehicleRequest, UpdateVehicleRequest),
    Trip => (CreateTripRequest, UpdateTripRequest),
    MaintenanceTask => (CreateTaskRequest, UpdateTaskRequest),
    ServiceLog => (CreateServiceLogRequest, UpdateServiceLogRequest),
    Contractor => (CreateContractorRequest, UpdateContractorRequest),
    Client => (CreateClientRequest, UpdateClientRequest),
    Project => (CreateProjectRequest, UpdateProjectRequest),
    TimeEntry => (CreateTimeEntryRequest, UpdateTimeEntryRequest),
    Invoice => (CreateInvoiceRequest, UpdateInvoiceRequest),
}

#[async_trait]
impl Resource for FillUp {
    type Create = CreateFillUpRequest;
    type Update = UpdateFillUpRequest;

    /// Mileage is measured from the vehicle's previous fill-up by odometer.
    async fn derive(state: &AppState, fill_up: &mut FillUp) -> Result<(), RepositoryError> {
        let siblings: Vec<FillUp> = state
            .fill_ups
            .list(Some(fill_up.vehicle_id))
            .await?
            .into_iter()
            .filter(|f| f.id != fill_up.id)
            .collect();

        fill_up.calculate_total_cost();
        fill_up.miles_per_gallon = None;
        if let Some(previous) = trackhub_core::fuel::previous_odometer(&siblings, fill_up.odometer)
        {
            fill_up.calculate_mpg(previous);
        }
        Ok(())
    }
}

/// Query parameters for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub parent_id: Option<Uuid>,
}

/// Fetches a record or fails with `NotFound`.
pub async fn find<T: Stored>(state: &AppState, id: Uuid) -> Result<T, RepositoryError> {
    state
        .repository::<T>()
        .get(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found(T::KIND, id))
}

/// GET /{plural}?parent_id= - List records, optionally scoped to a parent.
pub async fn list<T: Resource>(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<T>>, AppError> {
    let records = state.repository::<T>().list(query.parent_id).await?;
    Ok(Json(records))
}

/// GET /{parent plural}/{id}/{plural} - List the records owned by a parent.
pub async fn list_children<T: Resource>(
    State(state): State<AppState>,
    Path(parent_id): Path<Uuid>,
) -> Result<Json<Vec<T>>, AppError> {
    if let Some(parent_kind) = T::KIND.parent() {
        if !state.exists(parent_kind, parent_id).await? {
            return Err(RepositoryError::not_found(parent_kind, parent_id).into());
        }
    }

    let records = state.repository::<T>().list(Some(parent_id)).await?;
    Ok(Json(records))
}

/// GET /{plural}/{id} - Get a single record.
pub async fn get_one<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<T>, AppError> {
    Ok(Json(find::<T>(&state, id).await?))
}

/// POST /{plural} - Validate, build and store a new record.
pub async fn create<T: Resource>(
    State(state): State<AppState>,
    payload: Result<Json<T::Create>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), AppError> {
    let Json(request) = payload?;
    let mut record = request.into_record()?;

    state.check_references(&record).await?;
    T::derive(&state, &mut record).await?;
    state.repository::<T>().create(&record).await?;

    tracing::info!(kind = %T::KIND, id = %record.id(), "Created record");
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /{plural}/{id} - Apply a partial update.
pub async fn update<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<T::Update>, JsonRejection>,
) -> Result<Json<T>, AppError> {
    let Json(request) = payload?;
    let mut record = find::<T>(&state, id).await?;

    request.apply_to(&mut record)?;
    record.touch(Utc::now());

    state.check_references(&record).await?;
    T::derive(&state, &mut record).await?;
    state.repository::<T>().update(&record).await?;

    tracing::info!(kind = %T::KIND, %id, "Updated record");
    Ok(Json(record))
}

/// DELETE /{plural}/{id} - Delete a record and everything it owns.
pub async fn delete<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.delete_cascade(T::KIND, id).await?;

    tracing::info!(kind = %T::KIND, %id, "Deleted record");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    async fn state_with_vehicle() -> (AppState, Vehicle) {
        let state = AppState::default();
        let vehicle = Vehicle::new("Toyota", "Camry", 2020);
        state.vehicles.create(&vehicle).await.unwrap();
        (state, vehicle)
    }

    #[tokio::test]
    async fn test_create_fill_up_derives_mpg() {
        let (state, vehicle) = state_with_vehicle().await;

        let first = CreateFillUpRequest::new(
            vehicle.id,
            date(1),
            Decimal::from(25000),
            Decimal::from(10),
            "3.50".parse().unwrap(),
        );
        let (status, Json(first)) = create::<FillUp>(State(state.clone()), Ok(Json(first)))
            .await
            .ok()
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first.miles_per_gallon, None);

        let second = CreateFillUpRequest::new(
            vehicle.id,
            date(8),
            Decimal::from(25350),
            "11.2".parse().unwrap(),
            "3.45".parse().unwrap(),
        );
        let (_, Json(second)) = create::<FillUp>(State(state), Ok(Json(second)))
            .await
            .ok()
            .unwrap();
        assert_eq!(second.miles_per_gallon, Some("31.25".parse().unwrap()));
        assert_eq!(second.total_cost, "38.640".parse::<Decimal>().unwrap());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_parent() {
        let state = AppState::default();
        let request = CreateFillUpRequest::new(
            Uuid::new_v4(),
            date(1),
            Decimal::from(100),
            Decimal::from(10),
            Decimal::from(3),
        );

        let err = create::<FillUp>(State(state), Ok(Json(request)))
            .await
            .err()
            .unwrap();
        assert!(matches!(
            err.0.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn test_update_recomputes_mpg() {
        let (state, vehicle) = state_with_vehicle().await;
        let first = FillUp::new(
            vehicle.id,
            date(1),
            Decimal::from(1000),
            Decimal::from(10),
            Decimal::from(3),
        );
        let second = FillUp::new(
            vehicle.id,
            date(5),
            Decimal::from(1300),
            Decimal::from(10),
            Decimal::from(3),
        );
        state.fill_ups.create(&first).await.unwrap();
        state.fill_ups.create(&second).await.unwrap();

        let request = UpdateFillUpRequest {
            odometer: Some(Decimal::from(1250)),
            ..Default::default()
        };
        let Json(updated) = update::<FillUp>(State(state), Path(second.id), Ok(Json(request)))
            .await
            .ok()
            .unwrap();

        assert_eq!(updated.miles_per_gallon, Some(Decimal::from(25)));
    }

    #[tokio::test]
    async fn test_list_children_of_missing_parent_is_not_found() {
        let state = AppState::default();
        let err = list_children::<Trip>(State(state), Path(Uuid::new_v4()))
            .await
            .err()
            .unwrap();
        assert!(matches!(
            err.0.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::NotFound {
                entity_type: "Vehicle",
                ..
            })
        ));
    }
}
