use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Static liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub server: &'static str,
    pub version: &'static str,
    pub time: DateTime<Utc>,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        server: "edgegate",
        version: env!("CARGO_PKG_VERSION"),
        time: Utc::now(),
    })
}
