//! Classification Strategies
//!
//! Each strategy implements `ClassificationStrategy` from the `types` module
//! and is tried in order by the orchestrator.
//!
//! # Strategies
//! 1. **huggingface_client** - Remote generic image labeler (label + score)
//! 2. **openai_vision_client** - Remote vision model with a structured prompt
//! 3. **local_heuristic** - Pixel colour heuristic, no network access
//!
//! A strategy that fails is skipped; it never blocks the ones after it.

pub mod huggingface_client;
pub mod local_heuristic;
pub mod openai_vision_client;

pub use huggingface_client::HuggingFaceClassifier;
pub use local_heuristic::LocalHeuristicClassifier;
pub use openai_vision_client::OpenAiVisionClassifier;

// ============================================================================
// Mock Strategy for Testing
// ============================================================================
