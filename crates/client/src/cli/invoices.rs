//! Invoice CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
pub struct InvoicesCommand {
    #[command(subcommand)]
    pub action: InvoicesAction,
}

#[derive(Debug, Subcommand)]
pub enum InvoicesAction {
    /// List invoices, optionally for one client.
    List {
        #[arg(long)]
        client_id: Option<Uuid>,
    },
    /// Send a draft invoice.
    Send {
        /// Invoice ID.
        id: Uuid,
    },
    /// Mark a sent invoice as paid.
    Pay {
        /// Invoice ID.
        id: Uuid,
    },
    /// Sent invoices past their due date.
    Overdue,
}
