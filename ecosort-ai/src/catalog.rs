//! Category Catalog
//!
//! Static classification records keyed by canonical item, plus generic
//! per-category guidance and the synthesized default result.
//!
//! # Coverage
//! - Biodegradable: food, plant
//! - Recyclable: paper, bottle, can, cardboard (paper is recyclable on
//!   purpose, despite its organic origin)
//! - Hazardous: battery, electronics, chemical

use ecosort_common::waste::UNIDENTIFIED_ITEM;
use ecosort_common::{ClassificationResult, WasteCategory};
use std::fmt;

/// Confidence reported by the synthesized default result
pub const DEFAULT_CONFIDENCE: u8 = 85;

/// Internal lookup key grouping free-text labels into one catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalItemKey {
    Food,
    Plant,
    Paper,
    Bottle,
    Can,
    Cardboard,
    Battery,
    Electronics,
    Chemical,
}

impl CanonicalItemKey {
    /// Every key, in catalog order
    pub const ALL: [CanonicalItemKey; 9] = [
        CanonicalItemKey::Food,
        CanonicalItemKey::Plant,
        CanonicalItemKey::Paper,
        CanonicalItemKey::Bottle,
        CanonicalItemKey::Can,
        CanonicalItemKey::Cardboard,
        CanonicalItemKey::Battery,
        CanonicalItemKey::Electronics,
        CanonicalItemKey::Chemical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalItemKey::Food => "food",
            CanonicalItemKey::Plant => "plant",
            CanonicalItemKey::Paper => "paper",
            CanonicalItemKey::Bottle => "bottle",
            CanonicalItemKey::Can => "can",
            CanonicalItemKey::Cardboard => "cardboard",
            CanonicalItemKey::Battery => "battery",
            CanonicalItemKey::Electronics => "electronics",
            CanonicalItemKey::Chemical => "chemical",
        }
    }

    /// Parse a key name; `None` for anything not in the catalog
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for CanonicalItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static catalog record
struct ItemTemplate {
    category: WasteCategory,
    confidence: u8,
    item_label: &'static str,
    instructions: &'static [&'static str],
    tips: &'static [&'static str],
    impact: &'static str,
}

impl ItemTemplate {
    fn to_result(&self) -> ClassificationResult {
        ClassificationResult {
            category: self.category,
            confidence: self.confidence,
            item_label: self.item_label.to_string(),
            instructions: to_owned_list(self.instructions),
            tips: to_owned_list(self.tips),
            impact_statement: self.impact.to_string(),
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// Biodegradable

const FOOD: ItemTemplate = ItemTemplate {
    category: WasteCategory::Biodegradable,
    confidence: 95,
    item_label: "Food Waste",
    instructions: &[
        "Add to your compost bin or organic waste collection",
        "If no composting available, wrap and dispose in biodegradable waste bin",
        "Remove any packaging before composting",
        "Avoid adding meat or dairy to home compost",
    ],
    tips: &[
        "Food waste makes excellent compost for gardens",
        "Composting reduces methane emissions from landfills",
        "One ton of food waste can produce 460kg of compost",
    ],
    impact: "Composting this food waste prevents methane emissions and creates nutrient-rich soil!",
};

const PLANT: ItemTemplate = ItemTemplate {
    category: WasteCategory::Biodegradable,
    confidence: 98,
    item_label: "Plant Material",
    instructions: &[
        "Add to garden compost or green waste bin",
        "Can be used directly as mulch for plants",
        "Chop larger pieces for faster decomposition",
        "Mix with brown materials like dry leaves",
    ],
    tips: &[
        "Green plant matter is rich in nitrogen for composting",
        "Decomposes naturally in 2-8 weeks depending on size",
        "Great for creating natural fertilizer",
    ],
    impact: "This organic matter will enrich soil and support plant growth!",
};

// Recyclable

const PAPER: ItemTemplate = ItemTemplate {
    category: WasteCategory::Recyclable,
    confidence: 90,
    item_label: "Paper Product",
    instructions: &[
        "Remove any plastic coating or tape",
        "Place in paper recycling bin",
        "Keep dry and clean for best recycling results",
        "Shred sensitive documents before recycling",
    ],
    tips: &[
        "Recycled paper uses 60% less energy than new paper",
        "One ton of recycled paper saves 17 trees",
        "Paper can be recycled 5-7 times before fibers break down",
    ],
    impact: "Recycling this paper saves trees and reduces energy consumption!",
};

const BOTTLE: ItemTemplate = ItemTemplate {
    category: WasteCategory::Recyclable,
    confidence: 95,
    item_label: "Plastic Bottle",
    instructions: &[
        "Remove cap and label if possible",
        "Rinse with water to remove residue",
        "Check recycling number on bottom",
        "Place in plastic recycling bin",
    ],
    tips: &[
        "PET bottles (#1) are highly recyclable",
        "One recycled bottle saves enough energy to power a 60W bulb for 6 hours",
        "Recycled bottles can become new bottles or clothing",
    ],
    impact: "Recycling this bottle saves 0.5kg of CO2 emissions!",
};

const CAN: ItemTemplate = ItemTemplate {
    category: WasteCategory::Recyclable,
    confidence: 97,
    item_label: "Metal Can",
    instructions: &[
        "Rinse to remove food residue",
        "Remove paper labels if easily detachable",
        "Place in metal recycling bin",
        "Aluminum cans are infinitely recyclable",
    ],
    tips: &[
        "Aluminum cans can be recycled indefinitely without quality loss",
        "Recycling one can saves enough energy to run a TV for 3 hours",
        "95% less energy needed than producing new aluminum",
    ],
    impact: "This can will be back on shelves as a new product in 60 days!",
};

const CARDBOARD: ItemTemplate = ItemTemplate {
    category: WasteCategory::Recyclable,
    confidence: 92,
    item_label: "Cardboard",
    instructions: &[
        "Remove all tape, staples, and plastic",
        "Flatten boxes to save space",
        "Keep dry and clean",
        "Place in cardboard recycling bin",
    ],
    tips: &[
        "Corrugated cardboard is made from recycled materials",
        "Can be recycled 5-7 times before fibers weaken",
        "Recycling cardboard uses 75% less energy than making new",
    ],
    impact: "Recycling this cardboard saves trees and landfill space!",
};

// Hazardous

const BATTERY: ItemTemplate = ItemTemplate {
    category: WasteCategory::Hazardous,
    confidence: 98,
    item_label: "Battery",
    instructions: &[
        "Never throw in regular trash or recycling",
        "Take to designated e-waste collection center",
        "Many electronics stores accept old batteries",
        "Keep terminals covered to prevent short circuits",
    ],
    tips: &[
        "Batteries contain toxic metals like lithium, mercury, and lead",
        "One battery can contaminate 20,000 liters of groundwater",
        "Rechargeable batteries can often be refurbished",
    ],
    impact: "Proper disposal prevents soil and water contamination!",
};

const ELECTRONICS: ItemTemplate = ItemTemplate {
    category: WasteCategory::Hazardous,
    confidence: 94,
    item_label: "Electronic Device",
    instructions: &[
        "Remove personal data before disposal",
        "Take to certified e-waste recycling facility",
        "Check if manufacturer has take-back program",
        "Never put in regular trash",
    ],
    tips: &[
        "E-waste contains valuable metals like gold and silver",
        "Improper disposal releases toxic chemicals",
        "Many components can be refurbished or recycled",
    ],
    impact: "Proper e-waste recycling recovers valuable materials and prevents pollution!",
};

const CHEMICAL: ItemTemplate = ItemTemplate {
    category: WasteCategory::Hazardous,
    confidence: 96,
    item_label: "Chemical Container",
    instructions: &[
        "Do not empty contents down drains",
        "Take to hazardous waste collection facility",
        "Keep in original container with label",
        "Follow local hazardous waste disposal guidelines",
    ],
    tips: &[
        "Household chemicals can contaminate water supplies",
        "Many communities have special collection days",
        "Some chemicals can be neutralized safely at home",
    ],
    impact: "Safe disposal protects water sources and ecosystems!",
};

// Synthesized default

const DEFAULT_ITEM: ItemTemplate = ItemTemplate {
    category: WasteCategory::Recyclable,
    confidence: DEFAULT_CONFIDENCE,
    item_label: UNIDENTIFIED_ITEM,
    instructions: &[
        "Check local recycling guidelines",
        "When in doubt, place in general waste",
        "Look for recycling symbols or numbers",
        "Contact local waste management for guidance",
    ],
    tips: &[
        "Different materials require different disposal methods",
        "Local recycling programs may vary",
        "When unsure, it's better to ask than contaminate recycling",
    ],
    impact: "Every small action towards proper waste disposal makes a difference!",
};

fn template(key: CanonicalItemKey) -> &'static ItemTemplate {
    match key {
        CanonicalItemKey::Food => &FOOD,
        CanonicalItemKey::Plant => &PLANT,
        CanonicalItemKey::Paper => &PAPER,
        CanonicalItemKey::Bottle => &BOTTLE,
        CanonicalItemKey::Can => &CAN,
        CanonicalItemKey::Cardboard => &CARDBOARD,
        CanonicalItemKey::Battery => &BATTERY,
        CanonicalItemKey::Electronics => &ELECTRONICS,
        CanonicalItemKey::Chemical => &CHEMICAL,
    }
}

/// Catalog record for `key`
pub fn lookup(key: CanonicalItemKey) -> ClassificationResult {
    template(key).to_result()
}

/// Catalog record for a key name; `None` when the name is not catalogued
pub fn lookup_str(name: &str) -> Option<ClassificationResult> {
    CanonicalItemKey::from_name(name).map(lookup)
}

/// Synthesized result used when nothing better is available
///
/// Catalog-independent and performs no I/O, so it cannot fail.
pub fn default_classification() -> ClassificationResult {
    DEFAULT_ITEM.to_result()
}

/// Generic disposal guidance for a whole category
#[derive(Debug, Clone, Copy)]
pub struct CategoryGuidance {
    pub instructions: &'static [&'static str],
    pub tips: &'static [&'static str],
    pub impact: &'static str,
}

impl CategoryGuidance {
    pub fn instructions(&self) -> Vec<String> {
        to_owned_list(self.instructions)
    }

    pub fn tips(&self) -> Vec<String> {
        to_owned_list(self.tips)
    }
}

const BIODEGRADABLE_GUIDANCE: CategoryGuidance = CategoryGuidance {
    instructions: &[
        "Add to your compost bin or organic waste collection",
        "If composting at home, mix with brown materials",
        "Avoid adding meat or dairy to home compost",
        "Decomposes naturally in 2-8 weeks",
    ],
    tips: &[
        "Organic waste makes excellent fertilizer",
        "Composting reduces methane emissions from landfills",
        "Can be used to enrich garden soil naturally",
    ],
    impact:
        "Composting this organic waste prevents methane emissions and creates nutrient-rich soil!",
};

const RECYCLABLE_GUIDANCE: CategoryGuidance = CategoryGuidance {
    instructions: &[
        "Clean the item to remove any residue",
        "Check local recycling guidelines",
        "Place in appropriate recycling bin",
        "Remove caps and labels if required",
    ],
    tips: &[
        "Recycling saves energy and natural resources",
        "Clean items recycle better than dirty ones",
        "Check recycling numbers on plastic items",
    ],
    impact: "Recycling this item saves energy and reduces landfill waste!",
};

const HAZARDOUS_GUIDANCE: CategoryGuidance = CategoryGuidance {
    instructions: &[
        "Never throw in regular trash",
        "Take to designated hazardous waste facility",
        "Check for manufacturer take-back programs",
        "Keep away from children and water",
    ],
    tips: &[
        "Hazardous waste can contaminate soil and water",
        "Many electronics stores accept old devices",
        "Proper disposal protects the environment",
    ],
    impact: "Proper disposal prevents environmental contamination!",
};

/// Generic guidance for `category`
pub fn category_guidance(category: WasteCategory) -> CategoryGuidance {
    match category {
        WasteCategory::Biodegradable => BIODEGRADABLE_GUIDANCE,
        WasteCategory::Recyclable => RECYCLABLE_GUIDANCE,
        WasteCategory::Hazardous => HAZARDOUS_GUIDANCE,
    }
}
