//! Configuration loading and config file resolution
//!
//! Bootstrap configuration lives in a TOML file. Every field has a
//! built-in default, so a missing file is never fatal.
//!
//! # Config file priority
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. Platform config directory (`<config_dir>/ecosort/<module>.toml`)
//! 4. Built-in defaults (no file)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "ECOSORT_CONFIG";

/// Bootstrap configuration loaded from TOML
///
/// Cannot change while the service runs; restart to pick up edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Hugging Face Inference API key (generic image labeler)
    #[serde(default)]
    pub huggingface_api_key: Option<String>,

    /// Hugging Face model identifier
    #[serde(default = "default_huggingface_model")]
    pub huggingface_model: String,

    /// Hugging Face Inference API base URL (model id is appended)
    #[serde(default = "default_huggingface_endpoint")]
    pub huggingface_endpoint: String,

    /// OpenAI API key (structured vision prompt)
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI chat completions URL
    #[serde(default = "default_openai_endpoint")]
    pub openai_endpoint: String,

    /// OpenAI vision-capable model
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Total timeout for each outbound HTTP call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connection timeout for each outbound HTTP call, in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            logging: LoggingConfig::default(),
            huggingface_api_key: None,
            huggingface_model: default_huggingface_model(),
            huggingface_endpoint: default_huggingface_endpoint(),
            openai_api_key: None,
            openai_endpoint: default_openai_endpoint(),
            openai_model: default_openai_model(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    5760
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_huggingface_model() -> String {
    "google/vit-base-patch16-224".to_string()
}

fn default_huggingface_endpoint() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_connect_timeout_secs() -> u64 {
    5
}

/// Resolve which config file to read, if any
///
/// Returns `None` when no explicit path was given and the platform
/// default file does not exist.
pub fn resolve_config_path(cli_arg: Option<&Path>, module_name: &str) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    default_config_path(module_name).filter(|path| path.exists())
}

/// Platform config file location for a module
pub fn default_config_path(module_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ecosort").join(format!("{}.toml", module_name)))
}

/// Load TOML config from `path`
///
/// A missing file logs a warning and yields defaults. A file that exists
/// but cannot be read or parsed is an error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file {} not found, using built-in defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Resolve and load the config for a module in one step
pub fn load_module_config(cli_arg: Option<&Path>, module_name: &str) -> Result<TomlConfig> {
    match resolve_config_path(cli_arg, module_name) {
        Some(path) => load_toml_config(&path),
        None => {
            info!("No config file found for {}, using built-in defaults", module_name);
            Ok(TomlConfig::default())
        }
    }
}

/// Validate an API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
