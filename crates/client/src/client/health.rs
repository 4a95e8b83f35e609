//! Health check operations.

use serde::{Deserialize, Serialize};

use super::TrackhubClient;
use crate::error::Result;

/// Body of `/healthz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStats {
    pub status: String,
    pub event_history_size: usize,
    pub oldest_event_id: u64,
}

/// Body of `/readyz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Readiness {
    pub ready: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl TrackhubClient {
    /// Passive health stats.
    pub async fn health(&self) -> Result<HealthStats> {
        self.get_json("/healthz").await
    }

    /// Whether the server can reach its storage.
    pub async fn ready(&self) -> Result<Readiness> {
        self.get_json("/readyz").await
    }
}
