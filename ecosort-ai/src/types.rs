//! Core Types and Trait Definitions for ecosort-ai
//!
//! Defines the strategy trait the classification fallback chain is built
//! from, the inbound image reference, and strategy-level errors.
//!
//! # Architecture
//! - **Strategies:** independent ways of classifying one image
//!   (remote labeler, remote vision prompt, local colour heuristic)
//! - **Orchestrator:** tries strategies in order, first success wins,
//!   synthesized default when all are unavailable

use base64::Engine;
use ecosort_common::ClassificationResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Common Types
// ============================================================================

/// Image reference supplied by a caller
///
/// The pipeline does not care whether the image came from a camera, a file
/// picker, or a demo asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Raw encoded image bytes (PNG, JPEG, ...)
    Bytes {
        data: Vec<u8>,
        /// MIME type reported by the uploader, if any
        content_type: Option<String>,
    },
    /// `http(s)://` or `data:` URL
    Url(String),
}

impl ImageSource {
    /// Wrap raw bytes
    pub fn from_bytes(data: impl Into<Vec<u8>>, content_type: Option<String>) -> Self {
        ImageSource::Bytes {
            data: data.into(),
            content_type,
        }
    }

    /// Wrap a URL
    pub fn from_url(url: impl Into<String>) -> Self {
        ImageSource::Url(url.into())
    }

    /// URL form of this image
    ///
    /// Bytes become a base64 `data:` URL. The MIME type falls back to one
    /// sniffed from the bytes when the uploader did not report one.
    pub fn to_url(&self) -> String {
        match self {
            ImageSource::Url(url) => url.clone(),
            ImageSource::Bytes { data, content_type } => {
                let mime = content_type
                    .as_deref()
                    .filter(|m| !m.trim().is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| sniff_mime_type(data).to_string());
                format!(
                    "data:{};base64,{}",
                    mime,
                    base64::engine::general_purpose::STANDARD.encode(data)
                )
            }
        }
    }

    /// Short description for log fields (never the payload itself)
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Bytes { data, .. } => format!("bytes({})", data.len()),
            ImageSource::Url(url) if url.starts_with("data:") => {
                format!("data-url({})", url.len())
            }
            ImageSource::Url(url) => url.clone(),
        }
    }
}

fn sniff_mime_type(data: &[u8]) -> &'static str {
    image::guess_format(data)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

/// Decoded image pixels, 4 bytes per pixel (R, G, B, A)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl PixelBuffer {
    /// Number of whole pixels described by `width * height`
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Which tier of the fallback chain produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationTier {
    /// Remote generic image labeler
    #[serde(rename = "huggingface")]
    HuggingFace,
    /// Remote structured vision prompt
    #[serde(rename = "openai")]
    OpenAi,
    /// Local colour heuristic
    #[serde(rename = "local_heuristic")]
    LocalHeuristic,
    /// Synthesized default (nothing else succeeded)
    #[serde(rename = "default")]
    Default,
}

impl ClassificationTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationTier::HuggingFace => "huggingface",
            ClassificationTier::OpenAi => "openai",
            ClassificationTier::LocalHeuristic => "local_heuristic",
            ClassificationTier::Default => "default",
        }
    }
}

impl fmt::Display for ClassificationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result with provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    #[serde(flatten)]
    pub result: ClassificationResult,
    /// Tier that produced the result
    #[serde(rename = "source")]
    pub tier: ClassificationTier,
}

// ============================================================================
// Strategy Trait
// ============================================================================

/// One independent way of classifying an image
///
/// A strategy makes at most one attempt per call and never retries. Any
/// failure is reported as a `StrategyError`, which the orchestrator reads
/// as "unavailable, try the next one".
///
/// # Example
/// ```rust,ignore
/// use ecosort_ai::types::{ClassificationStrategy, ImageSource};
///
/// let strategy = HuggingFaceClassifier::new(api_key, &settings)?;
/// match strategy.attempt_classify(&ImageSource::from_url(url)).await {
///     Ok(result) => println!("{} ({}%)", result.item_label, result.confidence),
///     Err(e) => println!("{} unavailable: {}", strategy.name(), e),
/// }
/// ```
#[async_trait::async_trait]
pub trait ClassificationStrategy: Send + Sync {
    /// Strategy name for logs and status reporting
    fn name(&self) -> &'static str;

    /// Tier reported for results from this strategy
    fn tier(&self) -> ClassificationTier;

    /// Attempt to classify `image`
    ///
    /// # Errors
    /// Returns `StrategyError` when the strategy cannot produce a result;
    /// never panics on malformed external input.
    async fn attempt_classify(
        &self,
        image: &ImageSource,
    ) -> Result<ClassificationResult, StrategyError>;
}

/// Strategy failure (always recoverable by the orchestrator)
#[derive(Debug, Error)]
pub enum StrategyError {
    /// Transport failure (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Remote service answered with a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// Response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Response was well-formed but carried no usable prediction
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Image bytes could not be obtained
    #[error("Image load error: {0}")]
    ImageLoad(String),

    /// Image bytes could not be decoded to pixels
    #[error("Image decode error: {0}")]
    Decode(String),
}
