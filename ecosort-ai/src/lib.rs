//! ecosort-ai library interface
//!
//! Waste image classification: an ordered chain of classification
//! strategies with a guaranteed default, exposed over HTTP.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod label_mapper;
pub mod services;
pub mod strategies;
pub mod types;
pub mod utils;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::{ClassifierSettings, ServiceCredentials};
use crate::services::ClassificationOrchestrator;
use crate::strategies::OpenAiVisionClassifier;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Full fallback chain used by /api/classify
    pub orchestrator: Arc<ClassificationOrchestrator>,
    /// Stand-alone vision strategy for /api/classify-openai (None without a key)
    pub openai: Option<Arc<OpenAiVisionClassifier>>,
    /// Resolved credentials, for status reporting
    pub credentials: ServiceCredentials,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last upstream failure for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    /// Build the standard chain and the direct vision client from credentials
    pub fn new(
        credentials: ServiceCredentials,
        settings: &ClassifierSettings,
    ) -> ecosort_common::Result<Self> {
        let orchestrator = ClassificationOrchestrator::from_credentials(&credentials, settings)?;

        let openai = match credentials.openai_api_key.as_ref() {
            Some(key) if credentials.has_openai() => Some(Arc::new(OpenAiVisionClassifier::new(
                key.clone(),
                settings,
            )?)),
            _ => None,
        };

        Ok(Self::from_parts(orchestrator, openai, credentials))
    }

    /// Assemble state from prebuilt parts
    pub fn from_parts(
        orchestrator: ClassificationOrchestrator,
        openai: Option<Arc<OpenAiVisionClassifier>>,
        credentials: ServiceCredentials,
    ) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            openai,
            credentials,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::classify_routes())
        .merge(api::status_routes())
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
