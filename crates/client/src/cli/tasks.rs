//! Maintenance task CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Parser)]
pub struct TasksCommand {
    #[command(subcommand)]
    pub action: TasksAction,
}

#[derive(Debug, Subcommand)]
pub enum TasksAction {
    /// List all maintenance tasks.
    List,
    /// Open tasks past their due date.
    Overdue,
    /// Complete a task, scheduling the next one if it recurs.
    Complete {
        /// Task ID.
        id: Uuid,
        /// Completion date (defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,
        /// What the work actually cost.
        #[arg(long)]
        cost: Option<Decimal>,
    },
}
