//! Multi-factor product ranking
//!
//! Scores are additive per factor, with the seasonal multiplier applied
//! once at the end over the whole accumulated score. The popularity
//! store is injected so callers control its lifecycle.

use std::sync::Arc;

use shop_assistant_core::{Intent, PopularityStore, Product, QueryContext};

use crate::seasonal::Season;
use crate::weights::{RankingOptions, RankingWeights};

pub struct ProductRanker {
    weights: RankingWeights,
    popularity: Arc<dyn PopularityStore>,
    /// Pin the season for deterministic scoring; `None` follows the clock
    season_override: Option<Season>,
}

impl ProductRanker {
    pub fn new(popularity: Arc<dyn PopularityStore>) -> Self {
        Self {
            weights: RankingWeights::default(),
            popularity,
            season_override: None,
        }
    }

    pub fn with_weights(mut self, weights: RankingWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season_override = Some(season);
        self
    }

    fn season(&self) -> Season {
        self.season_override.unwrap_or_else(Season::current)
    }

    /// Rank products descending by score. Rating/price filters apply to
    /// the scored list, then the result is truncated to `max_results`.
    pub fn rank(
        &self,
        products: &[Product],
        context: &QueryContext,
        query: Option<&str>,
        intent: Option<&Intent>,
        options: &RankingOptions,
    ) -> Vec<Product> {
        let weights = options.weights.unwrap_or(self.weights);

        let mut scored: Vec<(f32, &Product)> = products
            .iter()
            .map(|product| {
                (
                    self.score_product(product, context, &weights, options, query, intent),
                    product,
                )
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        if let Some(min_rating) = options.min_rating {
            scored.retain(|(_, product)| product.rating >= min_rating);
        }
        if let Some(max_price) = options.max_price {
            scored.retain(|(_, product)| product.price <= max_price);
        }
        if let Some(max_results) = options.max_results {
            scored.truncate(max_results);
        }

        tracing::debug!(candidates = products.len(), ranked = scored.len(), "ranking done");
        scored.into_iter().map(|(_, product)| product.clone()).collect()
    }

    /// Score one product. Public so callers can verify an ordering
    /// against the same function the ranker used.
    pub fn score_product(
        &self,
        product: &Product,
        context: &QueryContext,
        weights: &RankingWeights,
        options: &RankingOptions,
        query: Option<&str>,
        intent: Option<&Intent>,
    ) -> f32 {
        let mut score = 0.0f32;
        let prefs = &context.user_preferences;

        // Preference terms are "has preference and matches" gates: an
        // empty preference contributes nothing either way.
        if !prefs.preferred_categories.is_empty()
            && prefs.preferred_categories.iter().any(|c| product.in_category(c))
        {
            score += weights.category;
        }

        if !prefs.favorite_brands.is_empty()
            && !product.brand.is_empty()
            && prefs.favorite_brands.iter().any(|b| product.from_brand(b))
        {
            score += weights.brand;
        }

        // Hard fit inside the preferred range; no stated range reads
        // as [0, inf) and fits everything.
        let price_fits = prefs
            .price_range
            .as_ref()
            .map_or(true, |range| range.contains(product.price));
        if price_fits {
            score += weights.price;
        }

        if let Some(range) = &prefs.price_range {
            // Soft preference peaking at the range midpoint, zero at
            // either edge. Needs a bounded range of positive width.
            if let (Some(min), Some(max)) = (range.min, range.max) {
                let width = max - min;
                if width > 0.0 {
                    let normalized = ((product.price - min) / width).clamp(0.0, 1.0);
                    let midpoint_affinity = 1.0 - (normalized - 0.5).abs() * 2.0;
                    score += midpoint_affinity * weights.price * 0.5;
                }
            }
        }

        score += product.rating * weights.rating;

        let popularity = self.popularity.score(product.id) as f32;
        score += (popularity / 10.0) * weights.popularity;

        if let (Some(query), Some(intent)) = (query, intent) {
            score += self.relevance_score(product, query, intent) * weights.relevance;
        }

        if options.boost_new_products {
            score += recency_boost(product) * weights.recency;
        }

        // History reinforcement: literal mentions in prior utterances.
        let brand_lower = product.brand.to_lowercase();
        let category_lower = product.category.to_lowercase();
        let mentioned = |needle: &str| {
            !needle.is_empty()
                && context
                    .conversation_history
                    .iter()
                    .any(|utterance| utterance.to_lowercase().contains(needle))
        };
        if mentioned(&brand_lower) {
            score += 0.5 * weights.brand;
        }
        if mentioned(&category_lower) {
            score += 0.5 * weights.category;
        }

        // Multiplicative, so it must come after every additive term.
        if options.consider_seasonality {
            score *= self.season().multiplier(&product.category);
        }

        score
    }

    /// Query/intent relevance on a 0-5 scale
    pub fn relevance_score(&self, product: &Product, query: &str, intent: &Intent) -> f32 {
        let mut score = 0.0f32;
        let query_lower = query.to_lowercase();
        let name_lower = product.name.to_lowercase();
        let brand_lower = product.brand.to_lowercase();
        let category_lower = product.category.to_lowercase();
        let description_lower = product.description.to_lowercase();

        if name_lower.contains(&query_lower) {
            score += 3.0;
        }
        if !brand_lower.is_empty() && brand_lower.contains(&query_lower) {
            score += 2.0;
        }
        if category_lower.contains(&query_lower) {
            score += 1.5;
        }
        if !description_lower.is_empty() && description_lower.contains(&query_lower) {
            score += 1.0;
        }

        for word in query_lower.split_whitespace().filter(|w| w.chars().count() > 2) {
            if name_lower.contains(word) {
                score += 0.5;
            }
            if brand_lower.contains(word) {
                score += 0.3;
            }
            if category_lower.contains(word) {
                score += 0.2;
            }
            if description_lower.contains(word) {
                score += 0.1;
            }
        }

        if let Some(category) = &intent.entities.category {
            if category_lower.contains(&category.to_lowercase()) {
                score += 2.0;
            }
        }
        if let Some(brand) = &intent.entities.brand {
            if brand_lower.contains(&brand.to_lowercase()) {
                score += 1.5;
            }
        }
        if let Some(range) = &intent.entities.price_range {
            if range.contains(product.price) {
                score += 1.5;
            }
        }

        score.min(5.0)
    }

    /// Order by value for money (rating per rupee, 0.7) blended with
    /// proximity to the stated budget (0.3).
    pub fn rank_by_price_sensitivity(&self, products: &[Product], budget: f32) -> Vec<Product> {
        let score = |product: &Product| {
            let value = product.rating / non_zero(product.price);
            let proximity = 1.0 - (product.price - budget).abs() / non_zero(budget);
            value * 0.7 + proximity * 0.3
        };
        let mut ranked: Vec<Product> = products.to_vec();
        ranked.sort_by(|a, b| {
            score(b)
                .partial_cmp(&score(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    /// Order by whichever comparison criteria the user named
    /// (price/cheap, rating/quality, popular/trend, new/latest).
    pub fn rank_for_comparison(&self, products: &[Product], criteria: &[&str]) -> Vec<Product> {
        let score = |product: &Product| {
            let mut total = 0.0f32;
            for criterion in criteria {
                let criterion = criterion.to_lowercase();
                if criterion.contains("price") || criterion.contains("cheap") {
                    total += 1.0 / non_zero(product.price);
                }
                if criterion.contains("rating") || criterion.contains("quality") {
                    total += product.rating;
                }
                if criterion.contains("popular") || criterion.contains("trend") {
                    total += self.popularity.score(product.id) as f32;
                }
                if criterion.contains("new") || criterion.contains("latest") {
                    total += product.id as f32;
                }
            }
            total
        };
        let mut ranked: Vec<Product> = products.to_vec();
        ranked.sort_by(|a, b| {
            score(b)
                .partial_cmp(&score(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    /// Engagement-weighted value for money
    pub fn product_value(&self, product: &Product) -> f32 {
        let popularity = self.popularity.score(product.id) as f32 + 1.0;
        (product.rating * popularity) / non_zero(product.price)
    }

    /// Best value-for-money products first
    pub fn best_value(&self, products: &[Product], limit: usize) -> Vec<Product> {
        let mut ranked: Vec<Product> = products.to_vec();
        ranked.sort_by(|a, b| {
            self.product_value(b)
                .partial_cmp(&self.product_value(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(limit);
        ranked
    }
}

/// Ratio denominators fall back to 1 instead of dividing by zero
fn non_zero(value: f32) -> f32 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}

/// Newness on a unitless scale: real listing age when known, otherwise
/// the id proxy (higher id reads as newer).
fn recency_boost(product: &Product) -> f32 {
    match product.created_at {
        Some(created_at) => {
            let age_days = (chrono::Utc::now() - created_at).num_days().max(0) as f32;
            (1.0 - age_days / 365.0).max(0.0)
        }
        None => product.id as f32 / 1000.0,
    }
}
