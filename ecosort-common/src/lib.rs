//! # EcoSort Common Library
//!
//! Shared code for EcoSort services:
//! - Waste classification domain types
//! - Error types
//! - Configuration loading

pub mod config;
pub mod error;
pub mod waste;

pub use error::{Error, Result};
pub use waste::{ClassificationResult, WasteCategory};
