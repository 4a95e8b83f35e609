//! Contractor CLI commands.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
pub struct ContractorsCommand {
    #[command(subcommand)]
    pub action: ContractorsAction,
}

#[derive(Debug, Subcommand)]
pub enum ContractorsAction {
    /// List all contractors.
    List,
}
