use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use trackhub_core::freelance::{Client, Invoice, Project, TimeEntry};
use trackhub_core::fuel::{FillUp, Trip, Vehicle};
use trackhub_core::maintenance::{Contractor, MaintenanceTask, ServiceLog};

use crate::{
    handlers::{
        events::events_sse,
        freelance, fuel,
        health::{healthz, livez, readyz},
        maintenance,
        records::{self, Resource},
    },
    state::AppState,
};

/// Adds the list/create and get/update/delete routes for one record type.
fn crud<T: Resource>(router: Router<AppState>, plural: &str) -> Router<AppState> {
    router
        .route(
            &format!("/{plural}"),
            get(records::list::<T>).post(records::create::<T>),
        )
        .route(
            &format!("/{plural}/{{id}}"),
            get(records::get_one::<T>)
                .put(records::update::<T>)
                .delete(records::delete::<T>),
        )
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    let mut api_routes = Router::new();
    api_routes = crud::<Vehicle>(api_routes, "vehicles");
    api_routes = crud::<FillUp>(api_routes, "fill-ups");
    api_routes = crud::<Trip>(api_routes, "trips");
    api_routes = crud::<MaintenanceTask>(api_routes, "maintenance-tasks");
    api_routes = crud::<ServiceLog>(api_routes, "service-logs");
    api_routes = crud::<Contractor>(api_routes, "contractors");
    api_routes = crud::<Client>(api_routes, "clients");
    api_routes = crud::<Project>(api_routes, "projects");
    api_routes = crud::<TimeEntry>(api_routes, "time-entries");
    api_routes = crud::<Invoice>(api_routes, "invoices");

    let api_routes = api_routes
        // Fuel
        .route("/vehicles/{id}/fill-ups", get(records::list_children::<FillUp>))
        .route("/vehicles/{id}/trips", get(records::list_children::<Trip>))
        .route("/vehicles/{id}/efficiency", get(fuel::efficiency))
        .route("/vehicles/{id}/trips/summary", get(fuel::trips_summary))
        // Maintenance
        .route(
            "/maintenance-tasks/{id}/service-logs",
            get(records::list_children::<ServiceLog>),
        )
        .route("/maintenance-tasks/{id}/complete", post(maintenance::complete))
        .route("/maintenance-tasks/overdue", get(maintenance::overdue))
        // Freelance
        .route("/clients/{id}/projects", get(records::list_children::<Project>))
        .route("/clients/{id}/invoices", get(records::list_children::<Invoice>))
        .route(
            "/projects/{id}/time-entries",
            get(records::list_children::<TimeEntry>),
        )
        .route("/projects/{id}/status", put(freelance::update_status))
        .route("/projects/{id}/summary", get(freelance::summary))
        .route("/projects/{id}/invoices", post(freelance::create_invoice))
        .route("/invoices/{id}/send", post(freelance::send_invoice))
        .route("/invoices/{id}/pay", post(freelance::pay_invoice))
        .route("/invoices/overdue", get(freelance::overdue))
        // Change feed
        .route("/events", get(events_sse))
        .layer(cors);

    let request_timeout = state.request_timeout;

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
