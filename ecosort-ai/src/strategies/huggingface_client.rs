//! Hugging Face Image Classifier (Strategy A)
//!
//! Sends raw image bytes to a hosted image-classification model and maps
//! the top predicted label onto the catalog.
//!
//! # Confidence
//! Model score (0.0-1.0) is scaled to a percentage and floored at 75:
//! - 0.92 → 92
//! - 0.50 → 75
//!
//! # API Reference
//! - Endpoint: `{base}/{model}` (default base
//!   `https://api-inference.huggingface.co/models`)
//! - Response: `[{"label": "...", "score": 0.97}, ...]`, best first

use crate::catalog;
use crate::config::ClassifierSettings;
use crate::label_mapper::map_label_to_key;
use crate::types::{ClassificationStrategy, ClassificationTier, ImageSource, StrategyError};
use crate::utils::http_client::build_http_client;
use crate::utils::image_loader::load_image_bytes;
use async_trait::async_trait;
use ecosort_common::ClassificationResult;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

/// Minimum confidence reported for a labeler-derived result
pub const CONFIDENCE_FLOOR: u8 = 75;

/// One label prediction
#[derive(Debug, Clone, Deserialize)]
pub struct LabelPrediction {
    pub label: String,
    pub score: f64,
}

/// Hugging Face Classifier
///
/// # Example
/// ```rust,ignore
/// use ecosort_ai::strategies::HuggingFaceClassifier;
///
/// let classifier = HuggingFaceClassifier::new(api_key, &settings)?;
/// let result = classifier.attempt_classify(&image).await?;
/// ```
pub struct HuggingFaceClassifier {
    http_client: Client,
    api_key: String,
    /// `{base}/{model}`
    model_url: String,
}

impl HuggingFaceClassifier {
    /// Create a classifier with its own HTTP client
    pub fn new(api_key: String, settings: &ClassifierSettings) -> ecosort_common::Result<Self> {
        let http_client = build_http_client(settings)?;
        Ok(Self::with_client(http_client, api_key, settings))
    }

    /// Create a classifier sharing an existing HTTP client
    pub fn with_client(
        http_client: Client,
        api_key: String,
        settings: &ClassifierSettings,
    ) -> Self {
        let model_url = format!(
            "{}/{}",
            settings.huggingface_endpoint.trim_end_matches('/'),
            settings.huggingface_model
        );
        Self {
            http_client,
            api_key,
            model_url,
        }
    }

    /// Request predictions for encoded image bytes
    async fn predict(&self, bytes: Vec<u8>) -> Result<Vec<LabelPrediction>, StrategyError> {
        debug!(url = %self.model_url, bytes = bytes.len(), "Querying Hugging Face model");

        let response = self
            .http_client
            .post(&self.model_url)
            .bearer_auth(&self.api_key)
            .body(bytes)
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StrategyError::Api(format!(
                "Hugging Face returned {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        response
            .json::<Vec<LabelPrediction>>()
            .await
            .map_err(|e| StrategyError::Parse(e.to_string()))
    }
}

/// Map the best prediction to a catalog result
///
/// Returns `None` for an empty prediction list.
pub fn result_from_predictions(predictions: &[LabelPrediction]) -> Option<ClassificationResult> {
    let top = predictions.first()?;
    let key = map_label_to_key(&top.label);
    let reported = score_to_percent(top.score);

    Some(catalog::lookup(key).with_confidence_floor(reported, CONFIDENCE_FLOOR))
}

/// Scale a 0.0-1.0 score to a rounded 0-100 percentage
fn score_to_percent(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

#[async_trait]
impl ClassificationStrategy for HuggingFaceClassifier {
    fn name(&self) -> &'static str {
        "HuggingFace"
    }

    fn tier(&self) -> ClassificationTier {
        ClassificationTier::HuggingFace
    }

    async fn attempt_classify(
        &self,
        image: &ImageSource,
    ) -> Result<ClassificationResult, StrategyError> {
        let bytes = load_image_bytes(&self.http_client, image)
            .await?
            .into_owned();
        let predictions = self.predict(bytes).await?;

        let result = result_from_predictions(&predictions)
            .ok_or_else(|| StrategyError::EmptyResponse("no predictions".to_string()))?;

        if let Some(top) = predictions.first() {
            info!(
                label = %top.label,
                score = top.score,
                item = %result.item_label,
                confidence = result.confidence,
                "Hugging Face classification successful"
            );
        }

        Ok(result)
    }
}
