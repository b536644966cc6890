//! Intent classification types
//!
//! An [`Intent`] is the transient classification of one user utterance.
//! It is created fresh per query and never persisted beyond the current
//! turn, except as `previous_intent` inside a
//! [`QueryContext`](crate::context::QueryContext).

use serde::{Deserialize, Serialize};

/// Classified purpose of a single utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum IntentKind {
    ShowProducts,
    ShowCategories,
    ShowRecommendations,
    PriceQuery,
    BrandQuery,
    FilterQuery,
    Comparison,
    #[default]
    GeneralHelp,
}

impl IntentKind {
    /// Wire/action label, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::ShowProducts => "show_products",
            IntentKind::ShowCategories => "show_categories",
            IntentKind::ShowRecommendations => "show_recommendations",
            IntentKind::PriceQuery => "price_query",
            IntentKind::BrandQuery => "brand_query",
            IntentKind::FilterQuery => "filter_query",
            IntentKind::Comparison => "comparison",
            IntentKind::GeneralHelp => "general_help",
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price bounds extracted from an utterance or accumulated as a preference.
/// Either bound may be absent; absent bounds are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl PriceRange {
    pub fn under(max: f32) -> Self {
        Self { min: None, max: Some(max) }
    }

    pub fn above(min: f32) -> Self {
        Self { min: Some(min), max: None }
    }

    pub fn between(min: f32, max: f32) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    pub fn exactly(price: f32) -> Self {
        Self { min: Some(price), max: Some(price) }
    }

    /// Inclusive containment check; missing bounds default to [0, +inf)
    pub fn contains(&self, price: f32) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }
}

/// Structured values extracted from an utterance. Extraction runs
/// independently of the kind decision, so the fields stay on one struct
/// rather than a per-kind variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentEntities {
    /// Canonical lowercase catalog category (e.g. "jacket")
    pub category: Option<String>,
    /// Canonical lowercase brand (e.g. "wink")
    pub brand: Option<String>,
    pub price_range: Option<PriceRange>,
    pub product_type: Option<String>,
    /// Descriptive features as "kind:matched text" strings
    pub features: Vec<String>,
    /// Product names the user wants compared
    pub comparison_targets: Vec<String>,
}

/// Result-shaping parameters extracted from an utterance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentParameters {
    pub limit: Option<usize>,
    pub sort_by: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Price,
    Rating,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Classified intent for one utterance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "type")]
    pub kind: IntentKind,
    /// Confidence in [0, 1]; signals add up and are clamped once at the end
    pub confidence: f32,
    pub entities: IntentEntities,
    pub parameters: IntentParameters,
}
