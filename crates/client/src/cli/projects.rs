//! Project CLI commands.

use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use trackhub_core::freelance::ProjectStatus as CoreProjectStatus;

#[derive(Debug, Parser)]
pub struct ProjectsCommand {
    #[command(subcommand)]
    pub action: ProjectsAction,
}

/// CLI project status (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProjectStatus {
    Planning,
    InProgress,
    OnHold,
    UnderReview,
    Completed,
    Cancelled,
}

impl From<ProjectStatus> for CoreProjectStatus {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Planning => CoreProjectStatus::Planning,
            ProjectStatus::InProgress => CoreProjectStatus::InProgress,
            ProjectStatus::OnHold => CoreProjectStatus::OnHold,
            ProjectStatus::UnderReview => CoreProjectStatus::UnderReview,
            ProjectStatus::Completed => CoreProjectStatus::Completed,
            ProjectStatus::Cancelled => CoreProjectStatus::Cancelled,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ProjectsAction {
    /// List projects, optionally for one client.
    List {
        #[arg(long)]
        client_id: Option<Uuid>,
    },
    /// Change a project's status.
    Status {
        /// Project ID.
        id: Uuid,
        status: ProjectStatus,
    },
    /// Hours and billable amount.
    Summary {
        /// Project ID.
        id: Uuid,
    },
    /// Invoice the project's unbilled time.
    Invoice {
        /// Project ID.
        id: Uuid,
        /// Invoice number (next in the monthly sequence by default).
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        due_in_days: Option<u32>,
    },
}
