//! Shared outbound HTTP client construction

use crate::config::ClassifierSettings;
use ecosort_common::{Error, Result};
use reqwest::Client;

const USER_AGENT: &str = concat!("ecosort-ai/", env!("CARGO_PKG_VERSION"));

/// Build a client with the configured total and connect timeouts
///
/// A hung remote call stalls only its own request, and only until the
/// timeout fires; the orchestrator then moves to the next tier.
pub fn build_http_client(settings: &ClassifierSettings) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(settings.request_timeout)
        .connect_timeout(settings.connect_timeout)
        .build()
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
}
