//! Local Heuristic Classifier
//!
//! Last strategy in the chain. Decodes the image and classifies it by
//! colour distribution alone (see `services::color_analyzer`). Needs no
//! credentials; it only fails when the image cannot be decoded.

use crate::catalog;
use crate::services::color_analyzer;
use crate::types::{ClassificationStrategy, ClassificationTier, ImageSource, StrategyError};
use crate::utils::image_loader::ImageDecoder;
use async_trait::async_trait;
use ecosort_common::ClassificationResult;
use std::sync::Arc;
use tracing::debug;

pub struct LocalHeuristicClassifier {
    decoder: Arc<dyn ImageDecoder>,
}

impl LocalHeuristicClassifier {
    pub fn new(decoder: Arc<dyn ImageDecoder>) -> Self {
        Self { decoder }
    }
}

#[async_trait]
impl ClassificationStrategy for LocalHeuristicClassifier {
    fn name(&self) -> &'static str {
        "LocalHeuristic"
    }

    fn tier(&self) -> ClassificationTier {
        ClassificationTier::LocalHeuristic
    }

    async fn attempt_classify(
        &self,
        image: &ImageSource,
    ) -> Result<ClassificationResult, StrategyError> {
        let buffer = self.decoder.decode(image).await?;
        let key = color_analyzer::analyze_buffer(&buffer);

        debug!(key = %key, "Local heuristic selected catalog entry");

        Ok(catalog::lookup(key))
    }
}
