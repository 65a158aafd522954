//! Service modules for image classification
//!
//! - `color_analyzer`: pixel colour heuristic used by the local strategy
//! - `classification_orchestrator`: ordered fallback chain over strategies

pub mod classification_orchestrator;
pub mod color_analyzer;

pub use classification_orchestrator::ClassificationOrchestrator;
pub use color_analyzer::{ColorBuckets, ColorRatios};
