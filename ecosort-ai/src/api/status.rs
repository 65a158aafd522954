//! Configuration status endpoint
//!
//! GET /api/status reports which classifier is in front of the chain.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{config::ActiveModel, AppState};

/// GET /api/status response
#[derive(Debug, Serialize)]
pub struct ConfigurationStatus {
    /// True when at least one remote classifier has a key
    pub configured: bool,
    pub message: String,
    pub active_model: ActiveModel,
}

/// GET /api/status
pub async fn configuration_status(State(state): State<AppState>) -> Json<ConfigurationStatus> {
    let active_model = state.credentials.active_model();

    Json(ConfigurationStatus {
        configured: active_model.is_configured(),
        message: active_model.status_message().to_string(),
        active_model,
    })
}

/// Build status routes
pub fn status_routes() -> Router<AppState> {
    Router::new().route("/api/status", get(configuration_status))
}
