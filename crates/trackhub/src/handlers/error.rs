use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use trackhub_core::freelance::FreelanceError;
use trackhub_core::fuel::FuelError;
use trackhub_core::maintenance::MaintenanceError;
use trackhub_core::record::ParseKindError;
use trackhub_core::storage::{repository_error_to_status_code, DateRangeError, RepositoryError};

pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            return StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        }

        let is_validation = self.0.is::<FuelError>()
            || self.0.is::<MaintenanceError>()
            || self.0.is::<FreelanceError>()
            || self.0.is::<DateRangeError>()
            || self.0.is::<ParseKindError>()
            || self.0.is::<JsonRejection>();

        if is_validation {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
