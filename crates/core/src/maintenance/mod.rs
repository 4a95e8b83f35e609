//! Home maintenance scheduling: recurring tasks, service history and contractors.

mod error;
mod operations;
mod requests;
mod types;

pub use error::MaintenanceError;
pub use operations::{
    overdue_tasks, validate_contractor, validate_service_log, validate_task, MAX_RECURRENCE_DAYS,
};
pub use requests::{
    CompleteTaskRequest, CompleteTaskResponse, CreateContractorRequest, CreateServiceLogRequest,
    CreateTaskRequest, UpdateContractorRequest, UpdateServiceLogRequest, UpdateTaskRequest,
};
pub use types::{
    Contractor, MaintenanceTask, MaintenanceType, ServiceLog, TaskStatus, DEFAULT_PRIORITY,
};
