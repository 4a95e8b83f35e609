//! Fill-up CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Parser)]
pub struct FillUpsCommand {
    #[command(subcommand)]
    pub action: FillUpsAction,
}

#[derive(Debug, Subcommand)]
pub enum FillUpsAction {
    /// List fill-ups, optionally for one vehicle.
    List {
        #[arg(long)]
        vehicle_id: Option<Uuid>,
    },
    /// Log a fill-up. Cost and mileage are computed by the server.
    Create {
        #[arg(long)]
        vehicle_id: Uuid,
        /// Fill-up date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        odometer: Decimal,
        #[arg(long)]
        gallons: Decimal,
        #[arg(long)]
        price_per_gallon: Decimal,
        #[arg(long)]
        full_tank: bool,
        #[arg(long)]
        station: Option<String>,
    },
}
