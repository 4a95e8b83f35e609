//! Vehicle CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Vehicle management commands.
#[derive(Debug, Parser)]
pub struct VehiclesCommand {
    #[command(subcommand)]
    pub action: VehiclesAction,
}

/// Available vehicle actions.
#[derive(Debug, Subcommand)]
pub enum VehiclesAction {
    /// List all vehicles.
    List,
    /// Get vehicle by ID.
    Get {
        /// Vehicle ID.
        id: Uuid,
    },
    /// Register a vehicle.
    Create {
        #[arg(long)]
        make: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        vin: Option<String>,
        #[arg(long)]
        license_plate: Option<String>,
        /// Tank capacity in gallons.
        #[arg(long)]
        tank_capacity: Option<Decimal>,
    },
    /// Delete a vehicle with its fill-ups and trips.
    Delete {
        /// Vehicle ID.
        id: Uuid,
    },
    /// Fuel efficiency report.
    Efficiency {
        /// Vehicle ID.
        id: Uuid,
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<NaiveDate>,
        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<NaiveDate>,
    },
}
