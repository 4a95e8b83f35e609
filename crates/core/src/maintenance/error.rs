use thiserror::Error;

/// Validation errors for tasks, service logs and contractors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaintenanceError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("{0} cannot exceed {1} characters")]
    TooLong(&'static str, usize),
    #[error("Priority must be between 1 and 5, got {0}")]
    InvalidPriority(u8),
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("Recurrence must be between 1 and {} days", super::operations::MAX_RECURRENCE_DAYS)]
    InvalidRecurrence,
    #[error("{0} cannot be negative")]
    Negative(&'static str),
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Task is already {0}")]
    AlreadyClosed(&'static str),
    #[error("Use the complete action to complete a task")]
    CompletionRequired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            MaintenanceError::InvalidPriority(9).to_string(),
            "Priority must be between 1 and 5, got 9"
        );
        assert_eq!(
            MaintenanceError::InvalidEmail("nobody".to_string()).to_string(),
            "Invalid email address: nobody"
        );
        assert_eq!(
            MaintenanceError::AlreadyClosed("cancelled").to_string(),
            "Task is already cancelled"
        );
    }
}
