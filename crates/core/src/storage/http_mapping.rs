//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404
/// - `AlreadyExists` -> 409
/// - `ConnectionFailed` -> 503
/// - `QueryFailed` and `Serialization` -> 500
/// - `InvalidData` -> 400
///
/// # Examples
///
/// ```
/// use trackhub_core::record::RecordKind;
/// use trackhub_core::storage::{RepositoryError, repository_error_to_status_code};
/// use uuid::Uuid;
///
/// let error = RepositoryError::not_found(RecordKind::Invoice, Uuid::nil());
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordKind;
    use uuid::Uuid;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::not_found(RecordKind::Trip, Uuid::nil());
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_already_exists_maps_to_409() {
        let error = RepositoryError::already_exists(RecordKind::Contractor, Uuid::nil());
        assert_eq!(repository_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = RepositoryError::ConnectionFailed("unable to open database file".to_string());
        assert_eq!(repository_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_server_side_failures_map_to_500() {
        let query = RepositoryError::QueryFailed("disk I/O error".to_string());
        let serde = RepositoryError::Serialization("expected value at line 1".to_string());
        assert_eq!(repository_error_to_status_code(&query), 500);
        assert_eq!(repository_error_to_status_code(&serde), 500);
    }

    #[test]
    fn test_missing_reference_maps_to_400() {
        let error = RepositoryError::missing_reference(RecordKind::Project, Uuid::nil());
        assert_eq!(repository_error_to_status_code(&error), 400);
    }
}
