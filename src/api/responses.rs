//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::Breakdown;

/// One-shot countdown computation
#[derive(Debug, Clone, Serialize)]
pub struct CountdownResponse {
    pub now: DateTime<Utc>,
    pub target: DateTime<Utc>,
    pub breakdown: Breakdown,
    pub total_seconds: u64,
    pub display: String,
    pub expired: bool,
}

impl CountdownResponse {
    pub fn new(now: DateTime<Utc>, target: DateTime<Utc>, breakdown: Breakdown) -> Self {
        Self {
            now,
            target,
            breakdown,
            total_seconds: breakdown.total_seconds(),
            display: breakdown.to_string(),
            expired: breakdown.is_zero(),
        }
    }
}

/// Service status with refresh information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub sections: usize,
    pub live_countdowns: usize,
    pub refresh_interval_secs: u64,
    pub last_refresh: Option<DateTime<Utc>>,
    pub last_refresh_error: Option<String>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Error body for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
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
