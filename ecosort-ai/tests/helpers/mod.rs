//! Test Helper Utilities
//!
//! Shared utilities for testing ecosort-ai

#![allow(dead_code)]

pub mod image_generator;
pub mod mock_upstream;

pub use image_generator::{mixed_png, solid_jpeg, solid_png, BLACK, LEAF_GREEN, STEEL_GREY};
pub use mock_upstream::{chat_completion, closed_port_url, MockUpstream};

use ecosort_ai::config::ClassifierSettings;
use std::time::Duration;

/// Hugging Face model path the mock serves
pub const HF_MODEL: &str = "test/vit";

/// Settings pointing both remote strategies at local mock servers
pub fn settings_for(huggingface_base: &str, openai_url: &str) -> ClassifierSettings {
    ClassifierSettings {
        huggingface_endpoint: format!("{}/models", huggingface_base),
        huggingface_model: HF_MODEL.to_string(),
        openai_endpoint: openai_url.to_string(),
        openai_model: "gpt-4o".to_string(),
        request_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
    }
}

/// Path the mock Hugging Face server must serve
pub fn hf_path() -> String {
    format!("/models/{}", HF_MODEL)
}
