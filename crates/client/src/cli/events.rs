//! Events CLI commands.

use clap::{Parser, Subcommand};

use trackhub_core::record::RecordKind;

/// Events management commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// Available events actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// Watch real-time SSE events.
    Watch {
        /// Kinds to watch, comma separated (all when omitted).
        #[arg(long, value_delimiter = ',')]
        kinds: Vec<RecordKind>,
        /// Resume from event ID.
        #[arg(long)]
        last_event_id: Option<u64>,
    },
}
