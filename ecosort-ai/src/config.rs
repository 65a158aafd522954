//! Configuration resolution for ecosort-ai
//!
//! Credentials resolve with ENV → TOML priority. The result is an explicit
//! `ServiceCredentials` value handed to the orchestrator at construction;
//! nothing deeper in the pipeline reads the environment.

use ecosort_common::config::{is_valid_key, TomlConfig};
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable for the Hugging Face API key
pub const HUGGINGFACE_KEY_ENV: &str = "ECOSORT_HUGGINGFACE_API_KEY";

/// Environment variable for the OpenAI API key
pub const OPENAI_KEY_ENV: &str = "ECOSORT_OPENAI_API_KEY";

/// API keys for the remote strategies
///
/// A strategy is only placed in the chain when its key is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCredentials {
    pub huggingface_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl ServiceCredentials {
    /// No remote credentials: chain starts at the local heuristic
    pub fn none() -> Self {
        Self::default()
    }

    pub fn has_huggingface(&self) -> bool {
        self.huggingface_api_key.as_deref().is_some_and(is_valid_key)
    }

    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_deref().is_some_and(is_valid_key)
    }

    /// First configured tier, as shown on the status badge
    pub fn active_model(&self) -> ActiveModel {
        if self.has_huggingface() {
            ActiveModel::HuggingFace
        } else if self.has_openai() {
            ActiveModel::OpenAi
        } else {
            ActiveModel::Fallback
        }
    }
}

/// Highest-priority classifier that is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActiveModel {
    #[serde(rename = "huggingface")]
    HuggingFace,
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "fallback")]
    Fallback,
}

impl ActiveModel {
    /// Human-readable configuration status
    pub fn status_message(&self) -> &'static str {
        match self {
            ActiveModel::HuggingFace => "Hugging Face API configured",
            ActiveModel::OpenAi => "OpenAI API configured",
            ActiveModel::Fallback => {
                "No AI API keys configured. Using fallback classification."
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, ActiveModel::Fallback)
    }
}

/// Endpoint, model and timeout settings for the strategies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierSettings {
    /// Base URL; model id is appended as a path segment
    pub huggingface_endpoint: String,
    pub huggingface_model: String,
    /// Full chat completions URL
    pub openai_endpoint: String,
    pub openai_model: String,
    /// Total timeout per outbound HTTP call (including image fetches)
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self::from_toml(&TomlConfig::default())
    }
}

impl ClassifierSettings {
    /// Build settings from TOML
    ///
    /// A zero timeout would fail every outbound call immediately, so it is
    /// replaced by the default with a warning.
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = TomlConfig::default();
        Self {
            huggingface_endpoint: config
                .huggingface_endpoint
                .trim_end_matches('/')
                .to_string(),
            huggingface_model: config.huggingface_model.clone(),
            openai_endpoint: config.openai_endpoint.clone(),
            openai_model: config.openai_model.clone(),
            request_timeout: nonzero_timeout(
                "request_timeout_secs",
                config.request_timeout_secs,
                defaults.request_timeout_secs,
            ),
            connect_timeout: nonzero_timeout(
                "connect_timeout_secs",
                config.connect_timeout_secs,
                defaults.connect_timeout_secs,
            ),
        }
    }
}

fn nonzero_timeout(key: &str, secs: u64, default_secs: u64) -> Duration {
    if secs == 0 {
        warn!(
            "{} = 0 in TOML config is not usable, using default of {}s",
            key, default_secs
        );
        return Duration::from_secs(default_secs);
    }
    Duration::from_secs(secs)
}

/// Resolve both API keys (ENV → TOML)
pub fn resolve_credentials(toml_config: &TomlConfig) -> ServiceCredentials {
    ServiceCredentials {
        huggingface_api_key: resolve_api_key(
            "Hugging Face",
            HUGGINGFACE_KEY_ENV,
            toml_config.huggingface_api_key.as_deref(),
        ),
        openai_api_key: resolve_api_key(
            "OpenAI",
            OPENAI_KEY_ENV,
            toml_config.openai_api_key.as_deref(),
        ),
    }
}

/// Resolve one API key from the environment, then TOML
///
/// Blank values are treated as absent. Returns `None` when neither source
/// has a usable key, which simply leaves that strategy out of the chain.
pub fn resolve_api_key(service: &str, env_var: &str, toml_key: Option<&str>) -> Option<String> {
    let env_key = std::env::var(env_var).ok().filter(|k| is_valid_key(k));
    let toml_key = toml_key.filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "{} API key found in both environment and TOML. Using environment (highest priority).",
            service
        );
    }

    if let Some(key) = env_key {
        info!("{} API key loaded from environment variable", service);
        return Some(key);
    }

    if let Some(key) = toml_key {
        info!("{} API key loaded from TOML config", service);
        return Some(key.to_string());
    }

    info!("{} API key not configured, strategy disabled", service);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_model_precedence() {
        let both = ServiceCredentials {
            huggingface_api_key: Some("hf".to_string()),
            openai_api_key: Some("sk".to_string()),
        };
        assert_eq!(both.active_model(), ActiveModel::HuggingFace);

        let openai_only = ServiceCredentials {
            huggingface_api_key: None,
            openai_api_key: Some("sk".to_string()),
        };
        assert_eq!(openai_only.active_model(), ActiveModel::OpenAi);

        assert_eq!(
            ServiceCredentials::none().active_model(),
            ActiveModel::Fallback,
        );
        assert!(!ActiveModel::Fallback.is_configured());
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let creds = ServiceCredentials {
            huggingface_api_key: Some("  ".to_string()),
            openai_api_key: None,
        };
        assert!(!creds.has_huggingface());
        assert_eq!(creds.active_model(), ActiveModel::Fallback);
    }

    #[test]
    fn test_settings_from_toml() {
        let toml = TomlConfig {
            huggingface_endpoint: "http://localhost:9000/models/".to_string(),
            request_timeout_secs: 2,
            ..TomlConfig::default()
        };
        let settings = ClassifierSettings::from_toml(&toml);
        assert_eq!(
            settings.huggingface_endpoint,
            "http://localhost:9000/models",
        );
        assert_eq!(settings.request_timeout, Duration::from_secs(2));
        assert_eq!(settings.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_zero_timeouts_fall_back_to_defaults() {
        let toml = TomlConfig {
            request_timeout_secs: 0,
            connect_timeout_secs: 0,
            ..TomlConfig::default()
        };
        let settings = ClassifierSettings::from_toml(&toml);
        assert_eq!(settings.request_timeout, Duration::from_secs(15));
        assert_eq!(settings.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_active_model_serialization() {
        assert_eq!(
            serde_json::to_value(ActiveModel::Fallback).unwrap(),
            "fallback",
        );
    }
}
