//! Health and version endpoints.
//!
//! - /api/health - liveness: 200 whenever the process is up
//! - /api/ping   - store reachability: 200 when the store answers, 503 otherwise
//! - /api/version - build info

use chrono::Utc;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::routes::{json_response, BoxBody};
use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub mode: &'static str,
}

/// Liveness probe. Does not touch the store.
pub async fn health_check(state: Arc<AppState>) -> Response<BoxBody> {
    let response = HealthResponse {
        healthy: true,
        status: "online",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
        mode: if state.args.dev_mode {
            "development"
        } else {
            "production"
        },
    };
    json_response(StatusCode::OK, &response)
}

/// Store reachability probe.
pub async fn ping_check(state: Arc<AppState>) -> Response<BoxBody> {
    match state.content.ping().await {
        Ok(()) => json_response(
            StatusCode::OK,
            &serde_json::json!({ "message": "pong", "store": "ok" }),
        ),
        Err(e) => json_response(
            StatusCode::SERVICE_UNAVAILABLE,
            &serde_json::json!({ "message": "pong", "store": e.to_string() }),
        ),
    }
}

#[derive(Serialize)]
pub struct VersionResponse {
    pub name: &'static str,
    pub version: &'static str,
}

pub async fn version_info() -> Response<BoxBody> {
    json_response(
        StatusCode::OK,
        &VersionResponse {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}
