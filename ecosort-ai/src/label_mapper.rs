//! Label Mapper
//!
//! Maps a free-text label from an image model (unconstrained vocabulary,
//! e.g. "water bottle, pop bottle") to a canonical catalog key.
//!
//! Matching is by substring against an ordered keyword table; the first
//! keyword found in the label wins, so earlier rows take priority when a
//! label contains several keywords.

use crate::catalog::CanonicalItemKey;

/// Key returned when no keyword matches (most common recyclable)
pub const DEFAULT_KEY: CanonicalItemKey = CanonicalItemKey::Bottle;

/// Ordered (keyword, key) table. Order is significant.
const KEYWORD_TABLE: &[(&str, CanonicalItemKey)] = &[
    // Food and organic
    ("banana", CanonicalItemKey::Plant),
    ("apple", CanonicalItemKey::Food),
    ("orange", CanonicalItemKey::Food),
    ("food", CanonicalItemKey::Food),
    ("fruit", CanonicalItemKey::Food),
    ("vegetable", CanonicalItemKey::Food),
    ("leaf", CanonicalItemKey::Plant),
    ("flower", CanonicalItemKey::Plant),
    ("plant", CanonicalItemKey::Plant),
    // Recyclables
    ("bottle", CanonicalItemKey::Bottle),
    ("plastic", CanonicalItemKey::Bottle),
    ("can", CanonicalItemKey::Can),
    ("metal", CanonicalItemKey::Can),
    ("aluminum", CanonicalItemKey::Can),
    ("paper", CanonicalItemKey::Paper),
    ("cardboard", CanonicalItemKey::Cardboard),
    ("box", CanonicalItemKey::Cardboard),
    // Electronics and hazardous
    ("battery", CanonicalItemKey::Battery),
    ("phone", CanonicalItemKey::Electronics),
    ("computer", CanonicalItemKey::Electronics),
    ("electronic", CanonicalItemKey::Electronics),
    ("chemical", CanonicalItemKey::Chemical),
    ("container", CanonicalItemKey::Chemical),
];

/// Map a model label to a canonical key. Total: never fails.
pub fn map_label_to_key(label: &str) -> CanonicalItemKey {
    let label = label.to_lowercase();

    KEYWORD_TABLE
        .iter()
        .find(|(keyword, _)| label.contains(keyword))
        .map(|(_, key)| *key)
        .unwrap_or(DEFAULT_KEY)
}
