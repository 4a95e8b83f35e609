//! CLI command definitions.

pub mod contractors;
pub mod events;
pub mod fill_ups;
pub mod invoices;
pub mod projects;
pub mod tasks;
pub mod vehicles;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the trackhub API.
#[derive(Debug, Parser)]
#[command(name = "trackhub-client")]
#[command(about = "CLI client for the trackhub API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "TRACKHUB_URL", default_value = crate::client::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Vehicle management.
    Vehicles(vehicles::VehiclesCommand),
    /// Fill-up logging.
    FillUps(fill_ups::FillUpsCommand),
    /// Home maintenance tasks.
    Tasks(tasks::TasksCommand),
    /// Contractors.
    Contractors(contractors::ContractorsCommand),
    /// Freelance projects.
    Projects(projects::ProjectsCommand),
    /// Invoices.
    Invoices(invoices::InvoicesCommand),
    /// Watch real-time SSE events.
    Events(events::EventsCommand),
    /// Server health and readiness.
    Health,
}
