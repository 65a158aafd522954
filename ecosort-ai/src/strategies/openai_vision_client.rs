//! OpenAI Vision Classifier (Strategy B)
//!
//! Asks a vision-capable chat model to classify the image directly into a
//! waste category and name the item. The model reply is expected to be a
//! bare JSON object, optionally wrapped in a markdown code fence:
//!
//! ```text
//! {"type": "recyclable", "item": "Plastic Water Bottle", "confidence": 88}
//! ```
//!
//! Disposal instructions, tips and impact are not requested from the model;
//! they come from the category guidance in the catalog.

use crate::catalog::{self, DEFAULT_CONFIDENCE};
use crate::config::ClassifierSettings;
use crate::types::{ClassificationStrategy, ClassificationTier, ImageSource, StrategyError};
use crate::utils::http_client::build_http_client;
use crate::utils::image_loader::check_inline_size;
use async_trait::async_trait;
use ecosort_common::waste::UNIDENTIFIED_ITEM;
use ecosort_common::{ClassificationResult, WasteCategory};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

const MAX_TOKENS: u32 = 150;

const CLASSIFY_PROMPT: &str = r#"Analyze this waste item image and classify it into one of these categories:

1. "biodegradable" - organic waste like food scraps, plant matter, paper
2. "recyclable" - plastic bottles, metal cans, glass, cardboard
3. "hazardous" - batteries, electronics, chemicals, medical waste

Respond with ONLY a JSON object in this exact format:
{
  "type": "biodegradable|recyclable|hazardous",
  "item": "specific item name",
  "confidence": 85
}

Be specific about the item (e.g., "Plastic Water Bottle", "Banana Peel", "AA Battery")."#;

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Classification object produced by the model
#[derive(Debug, Clone, Deserialize)]
pub struct VisionVerdict {
    #[serde(rename = "type")]
    pub category: String,
    #[serde(default)]
    pub item: Option<String>,
    /// Number or numeric string; anything else falls back to the default
    #[serde(default)]
    pub confidence: Option<Value>,
}

/// OpenAI Vision Classifier
pub struct OpenAiVisionClassifier {
    http_client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAiVisionClassifier {
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
        Self {
            http_client,
            api_key,
            endpoint: settings.openai_endpoint.clone(),
            model: settings.openai_model.clone(),
        }
    }

    /// Send the prompt and return the raw message content
    async fn complete(&self, image_url: String) -> Result<String, StrategyError> {
        let body = json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": CLASSIFY_PROMPT },
                    { "type": "image_url", "image_url": { "url": image_url } }
                ]
            }],
            "max_tokens": MAX_TOKENS,
        });

        debug!(endpoint = %self.endpoint, model = %self.model, "Querying OpenAI vision model");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StrategyError::Api(format!(
                "OpenAI returned {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| StrategyError::Parse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| StrategyError::EmptyResponse("No response from OpenAI".to_string()))
    }
}

/// Pull the JSON payload out of a model reply
///
/// Handles ```` ```json ```` fences, bare ```` ``` ```` fences, and
/// unwrapped JSON.
pub fn extract_json_str(content: &str) -> &str {
    let trimmed = content.trim();

    if let Some(start) = trimmed.find("```json") {
        let after_marker = &trimmed[start + 7..];
        return match after_marker.find("```") {
            Some(end) => after_marker[..end].trim(),
            None => after_marker.trim(),
        };
    }

    if let Some(start) = trimmed.find("```") {
        let after_marker = &trimmed[start + 3..];
        let after_newline = after_marker
            .find('\n')
            .map_or(after_marker, |i| &after_marker[i + 1..]);
        return match after_newline.find("```") {
            Some(end) => after_newline[..end].trim(),
            None => after_newline.trim(),
        };
    }

    trimmed
}

/// Validate a model reply and build the full result
pub fn parse_verdict(content: &str) -> Result<ClassificationResult, StrategyError> {
    let verdict: VisionVerdict = serde_json::from_str(extract_json_str(content))
        .map_err(|e| StrategyError::Parse(format!("Invalid classification JSON: {}", e)))?;

    let category: WasteCategory = verdict
        .category
        .parse()
        .map_err(|_| StrategyError::Parse(format!("Unknown waste type '{}'", verdict.category)))?;

    let item_label = verdict
        .item
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .unwrap_or_else(|| UNIDENTIFIED_ITEM.to_string());

    let confidence = verdict
        .confidence
        .as_ref()
        .and_then(confidence_percent)
        .unwrap_or(DEFAULT_CONFIDENCE);

    let guidance = catalog::category_guidance(category);

    Ok(ClassificationResult {
        category,
        confidence,
        item_label,
        instructions: guidance.instructions(),
        tips: guidance.tips(),
        impact_statement: guidance.impact.to_string(),
    })
}

/// Read a model-reported confidence as a 0-100 percentage
fn confidence_percent(value: &Value) -> Option<u8> {
    let number: f64 = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim_end().parse().ok()?,
        _ => return None,
    };

    number
        .is_finite()
        .then(|| number.round().clamp(0.0, 100.0) as u8)
}

#[async_trait]
impl ClassificationStrategy for OpenAiVisionClassifier {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn tier(&self) -> ClassificationTier {
        ClassificationTier::OpenAi
    }

    async fn attempt_classify(
        &self,
        image: &ImageSource,
    ) -> Result<ClassificationResult, StrategyError> {
        check_inline_size(image)?;
        let content = self.complete(image.to_url()).await?;
        let result = parse_verdict(&content)?;

        info!(
            category = %result.category,
            item = %result.item_label,
            confidence = result.confidence,
            "OpenAI classification successful"
        );

        Ok(result)
    }
}
