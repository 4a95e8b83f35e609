//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Event history stats (fast, passive)
//! - `/readyz` - Readiness probe (active storage read)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStats {
    pub status: &'static str,
    pub event_history_size: usize,
    pub oldest_event_id: u64,
}

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Event history stats, no storage access.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Json<HealthStats> {
    Json(HealthStats {
        status: "ok",
        event_history_size: state.event_history_len(),
        oldest_event_id: state.oldest_event_id(),
    })
}

/// GET /readyz - Readiness probe.
///
/// Reads from storage to verify the backend answers. Returns 200 when it
/// does, 503 otherwise.
#[axum::debug_handler]
pub async fn readyz(State(state): State<AppState>) -> Response {
    match state.vehicles.list(None).await {
        Ok(_) => (StatusCode::OK, Json(serde_json::json!({ "ready": true }))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "ready": false, "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
