//! Health check endpoint
//!
//! Reports liveness plus the build identification stamped by `build.rs`,
//! so a running instance can be matched to the commit it was built from.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// Build identification baked in at compile time
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    /// Short commit hash, `-dirty` when built from modified sources
    pub git_hash: &'static str,
    /// RFC 3339 UTC build time
    pub timestamp: &'static str,
    /// `debug` or `release`
    pub profile: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            git_hash: env!("GIT_HASH"),
            timestamp: env!("BUILD_TIMESTAMP"),
            profile: env!("BUILD_PROFILE"),
        }
    }
}

/// GET /health payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub build: BuildInfo,
    pub uptime_seconds: u64,
    /// Most recent upstream failure seen by a direct classify call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_seconds = Utc::now()
        .signed_duration_since(state.startup_time)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: "ok",
        module: "ecosort-ai",
        version: env!("CARGO_PKG_VERSION"),
        build: BuildInfo::current(),
        uptime_seconds,
        last_error: state.last_error.read().await.clone(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
