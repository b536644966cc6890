//! Ranking weights and options

use serde::{Deserialize, Serialize};

/// Per-factor weights for the additive product score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub category: f32,
    pub brand: f32,
    pub price: f32,
    pub rating: f32,
    pub popularity: f32,
    pub relevance: f32,
    pub recency: f32,
    /// Reserved. The seasonal effect is a multiplier over the whole
    /// accumulated score and never reads this weight; it is kept so
    /// weight tables stay stable if an additive seasonal term lands.
    pub seasonality: f32,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            category: 2.0,
            brand: 1.5,
            price: 1.2,
            rating: 1.8,
            popularity: 1.3,
            relevance: 2.5,
            recency: 0.8,
            seasonality: 1.0,
        }
    }
}

/// Per-call ranking options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingOptions {
    /// Override the ranker's weights for this call
    pub weights: Option<RankingWeights>,
    /// Truncate the ranked list
    pub max_results: Option<usize>,
    /// Apply the recency boost
    pub boost_new_products: bool,
    /// Apply the seasonal multiplier
    pub consider_seasonality: bool,
    /// Drop products rated below this, after scoring
    pub min_rating: Option<f32>,
    /// Drop products priced above this, after scoring
    pub max_price: Option<f32>,
}
