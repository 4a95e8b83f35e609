use thiserror::Error;
use uuid::Uuid;

use crate::record::RecordKind;

/// Errors that can occur when constructing a date range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Invalid date range: start date must be before or equal to end date")]
    InvalidRange,
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    pub fn not_found(kind: RecordKind, id: Uuid) -> Self {
        Self::NotFound {
            entity_type: kind.label(),
            id: id.to_string(),
        }
    }

    pub fn already_exists(kind: RecordKind, id: Uuid) -> Self {
        Self::AlreadyExists {
            entity_type: kind.label(),
            id: id.to_string(),
        }
    }

    /// A write pointed at a record that does not exist.
    pub fn missing_reference(kind: RecordKind, id: Uuid) -> Self {
        Self::InvalidData(format!("referenced {} does not exist: {}", kind, id))
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
