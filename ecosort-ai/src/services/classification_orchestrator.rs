//! Classification Orchestrator
//!
//! Runs the fallback chain for one image:
//! 1. Hugging Face labeler (if a key is configured)
//! 2. OpenAI vision prompt (if a key is configured)
//! 3. Local colour heuristic
//! 4. Synthesized default result
//!
//! Strategies are tried strictly in order, one attempt each. The first
//! well-formed result wins. `classify` never fails.

use crate::catalog;
use crate::config::{ClassifierSettings, ServiceCredentials};
use crate::strategies::{HuggingFaceClassifier, LocalHeuristicClassifier, OpenAiVisionClassifier};
use crate::types::{Classification, ClassificationStrategy, ClassificationTier, ImageSource};
use crate::utils::http_client::build_http_client;
use crate::utils::image_loader::RasterImageDecoder;
use ecosort_common::ClassificationResult;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Ordered strategy chain with a default fallback
pub struct ClassificationOrchestrator {
    strategies: Vec<Arc<dyn ClassificationStrategy>>,
}

impl ClassificationOrchestrator {
    /// Create an orchestrator over an explicit, ordered strategy list
    pub fn new(strategies: Vec<Arc<dyn ClassificationStrategy>>) -> Self {
        Self { strategies }
    }

    /// Build the standard chain from the configured credentials
    ///
    /// One HTTP client is shared by every strategy and by the image decoder.
    pub fn from_credentials(
        credentials: &ServiceCredentials,
        settings: &ClassifierSettings,
    ) -> ecosort_common::Result<Self> {
        let http_client = build_http_client(settings)?;
        let mut strategies: Vec<Arc<dyn ClassificationStrategy>> = Vec::new();

        if let Some(key) = credentials
            .huggingface_api_key
            .as_ref()
            .filter(|_| credentials.has_huggingface())
        {
            strategies.push(Arc::new(HuggingFaceClassifier::with_client(
                http_client.clone(),
                key.clone(),
                settings,
            )));
        }

        if let Some(key) = credentials
            .openai_api_key
            .as_ref()
            .filter(|_| credentials.has_openai())
        {
            strategies.push(Arc::new(OpenAiVisionClassifier::with_client(
                http_client.clone(),
                key.clone(),
                settings,
            )));
        }

        strategies.push(Arc::new(LocalHeuristicClassifier::new(Arc::new(
            RasterImageDecoder::new(http_client),
        ))));

        let orchestrator = Self::new(strategies);
        info!(chain = ?orchestrator.strategy_names(), "Classification chain configured");
        Ok(orchestrator)
    }

    /// Names of the strategies in chain order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Classify an image; always returns a well-formed result
    pub async fn classify(&self, image: &ImageSource) -> ClassificationResult {
        self.classify_with_provenance(image).await.result
    }

    /// Classify an image and report which tier produced the result
    pub async fn classify_with_provenance(&self, image: &ImageSource) -> Classification {
        let request_id = Uuid::new_v4();
        let span = info_span!("classify", request_id = %request_id, image = %image.describe());

        self.run_chain(image).instrument(span).await
    }

    async fn run_chain(&self, image: &ImageSource) -> Classification {
        for strategy in &self.strategies {
            debug!(strategy = strategy.name(), "Attempting classification");

            match strategy.attempt_classify(image).await {
                Ok(result) if result.is_well_formed() => {
                    info!(
                        strategy = strategy.name(),
                        item = %result.item_label,
                        category = %result.category,
                        confidence = result.confidence,
                        "Classification complete"
                    );
                    return Classification {
                        result,
                        tier: strategy.tier(),
                    };
                }
                Ok(result) => {
                    warn!(
                        strategy = strategy.name(),
                        item = %result.item_label,
                        "Strategy returned a malformed result, trying next"
                    );
                }
                Err(e) => {
                    warn!(
                        strategy = strategy.name(),
                        error = %e,
                        "Strategy unavailable, trying next"
                    );
                }
            }
        }

        warn!("All strategies unavailable, using default classification");
        Classification {
            result: catalog::default_classification(),
            tier: ClassificationTier::Default,
        }
    }
}
