//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that returns 200 OK with process metadata when
//! the process is running. Used by Kubernetes, ECS, systemd, and load
//! balancers to verify the service is alive.

use axum::{extract::State, Json};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Literal reported in the `status` field.
pub const STATUS_HEALTHY: &str = "healthy";

/// Health probe body, built fresh for each request.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// ISO-8601 UTC with millisecond precision
    pub timestamp: String,
    pub version: String,
    /// Seconds since process start
    pub uptime: f64,
}

impl HealthStatus {
    pub fn new(now: DateTime<Utc>, version: &str, uptime_secs: f64) -> Self {
        Self {
            status: STATUS_HEALTHY,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            version: version.to_string(),
            uptime: uptime_secs,
        }
    }
}

/// Health check handler.
///
/// This is a liveness probe: it only checks that the process can respond to
/// HTTP, so it has no failure path.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::new(
        Utc::now(),
        &state.version,
        state.uptime().as_secs_f64(),
    ))
}
