//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::WidgetStatus;

/// Status of every countdown on the hosted page
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub selector: String,
    pub widgets: Vec<WidgetStatus>,
    pub all_expired: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub timestamp: DateTime<Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
