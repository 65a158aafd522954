//! Waste classification domain types
//!
//! Shared between the classification pipeline and anything that renders
//! or relays its output. The JSON shape (`type`, `item`, `impact`) is the
//! one the browser UI consumes.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label substituted when a strategy cannot name the item
pub const UNIDENTIFIED_ITEM: &str = "Unidentified Item";

/// Disposal category of a waste item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteCategory {
    /// Compostable organic matter
    Biodegradable,
    /// Goes in a recycling stream
    Recyclable,
    /// Needs a dedicated hazardous or e-waste facility
    Hazardous,
}

impl WasteCategory {
    /// All categories in display order
    pub const ALL: [WasteCategory; 3] = [
        WasteCategory::Biodegradable,
        WasteCategory::Recyclable,
        WasteCategory::Hazardous,
    ];

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteCategory::Biodegradable => "biodegradable",
            WasteCategory::Recyclable => "recyclable",
            WasteCategory::Hazardous => "hazardous",
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "biodegradable" => Ok(WasteCategory::Biodegradable),
            "recyclable" => Ok(WasteCategory::Recyclable),
            "hazardous" => Ok(WasteCategory::Hazardous),
            other => Err(Error::InvalidInput(format!(
                "Unknown waste category: '{}'",
                other
            ))),
        }
    }
}

/// Result of classifying one image
///
/// Built fresh per request and never mutated after it is handed to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Disposal category
    #[serde(rename = "type")]
    pub category: WasteCategory,
    /// Confidence percentage (0-100)
    pub confidence: u8,
    /// Human-readable item name, e.g. "Plastic Bottle"
    #[serde(rename = "item")]
    pub item_label: String,
    /// Numbered disposal steps (order matters)
    pub instructions: Vec<String>,
    /// Educational facts (order does not matter)
    pub tips: Vec<String>,
    /// One sentence on the benefit of correct disposal
    #[serde(rename = "impact")]
    pub impact_statement: String,
}

impl ClassificationResult {
    /// Check the invariants every result handed to a caller must satisfy
    pub fn is_well_formed(&self) -> bool {
        self.confidence <= 100
            && !self.item_label.trim().is_empty()
            && !self.instructions.is_empty()
    }

    /// Return a copy with confidence raised to at least `floor`
    pub fn with_confidence_floor(mut self, reported: u8, floor: u8) -> Self {
        self.confidence = reported.max(floor).min(100);
        self
    }
}
