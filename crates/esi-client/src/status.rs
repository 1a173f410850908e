//! Server status

use crate::error::Result;
use crate::executor::{EsiClient, EsiRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current state of the Tranquility cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    /// Players online
    pub players: u32,
    /// Running server version
    pub server_version: String,
    /// Server start time
    pub start_time: DateTime<Utc>,
    /// Whether the server is in VIP mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip: Option<bool>,
}

impl EsiClient {
    /// Get the status of the ESI cluster
    pub async fn server_status(&self) -> Result<ServerStatus> {
        self.fetch(EsiRequest::get("/v2/status/")).await
    }
}
