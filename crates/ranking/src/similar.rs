//! Pairwise product similarity and complementary recommendations
//!
//! Every finder returns `SimilarityScore` entries sorted descending,
//! with zero-score candidates dropped before the limit is applied.
//! Scores live on a 0-100 scale; confidence is exactly score / 100.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shop_assistant_core::{PopularityStore, Product};
use unicode_segmentation::UnicodeSegmentation;

/// Category pairs that commonly go together in an outfit
const RELATED_CATEGORIES: [[&str; 2]; 2] = [["jacket", "hoodie"], ["pants", "gloves"]];

/// Style vocabulary matched against product descriptions
const STYLE_WORDS: [&str; 6] = ["casual", "formal", "sporty", "streetwear", "minimal", "luxury"];

const KEYWORD_STOP_WORDS: [&str; 18] = [
    "with", "from", "this", "that", "your", "have", "been", "will", "would", "should", "could",
    "them", "they", "what", "when", "more", "most", "very",
];

#[derive(Debug, Clone, Serialize)]
pub struct SimilarityScore {
    pub product: Product,
    pub score: f32,
    pub confidence: f32,
    pub reasons: Vec<String>,
}

impl SimilarityScore {
    fn new(product: &Product, score: f32, reasons: Vec<String>) -> Self {
        Self {
            product: product.clone(),
            score,
            confidence: score / 100.0,
            reasons,
        }
    }
}

/// Attribute criteria for feature-driven lookups
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimilarityCriteria {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f32>,
    pub max_price: Option<f32>,
    pub min_rating: Option<f32>,
    pub style_keywords: Vec<String>,
}

pub struct SimilarProductFinder {
    popularity: Arc<dyn PopularityStore>,
}

impl SimilarProductFinder {
    pub fn new(popularity: Arc<dyn PopularityStore>) -> Self {
        Self { popularity }
    }

    /// Products most like `reference`, excluding the reference itself
    /// and anything in `exclude_ids`.
    pub fn find_similar(
        &self,
        products: &[Product],
        reference: &Product,
        limit: usize,
        exclude_ids: &[u32],
    ) -> Vec<SimilarityScore> {
        let scored = products
            .iter()
            .filter(|p| p.id != reference.id && !exclude_ids.contains(&p.id))
            .map(|candidate| {
                let (score, reasons) = self.similarity(reference, candidate);
                SimilarityScore::new(candidate, score, reasons)
            });
        collect_ranked(scored, limit)
    }

    /// Products that go with `base` rather than replace it.
    pub fn find_complementary(
        &self,
        products: &[Product],
        base: &Product,
        limit: usize,
    ) -> Vec<SimilarityScore> {
        let scored = products
            .iter()
            .filter(|p| p.id != base.id)
            .map(|candidate| {
                let (score, reasons) = complementarity(base, candidate);
                SimilarityScore::new(candidate, score, reasons)
            });
        collect_ranked(scored, limit)
    }

    /// Catalog-wide match against explicit attribute criteria.
    pub fn find_by_features(
        &self,
        products: &[Product],
        criteria: &SimilarityCriteria,
        limit: usize,
    ) -> Vec<SimilarityScore> {
        let scored = products.iter().map(|candidate| {
            let (score, reasons) = self.feature_match(candidate, criteria);
            SimilarityScore::new(candidate, score, reasons)
        });
        collect_ranked(scored, limit)
    }

    /// Recommendations anchored on the most recently viewed product.
    /// Everything already viewed is excluded from the results.
    pub fn find_from_user_behavior(
        &self,
        products: &[Product],
        viewed_ids: &[u32],
        limit: usize,
    ) -> Vec<SimilarityScore> {
        let Some(anchor_id) = viewed_ids.last() else {
            return Vec::new();
        };
        let Some(anchor) = products.iter().find(|p| p.id == *anchor_id) else {
            return Vec::new();
        };
        self.find_similar(products, anchor, limit, viewed_ids)
    }

    /// Pairwise similarity on a 0-100 scale with human-readable reasons
    pub fn similarity(&self, reference: &Product, candidate: &Product) -> (f32, Vec<String>) {
        let mut score = 0.0f32;
        let mut reasons = Vec::new();

        if reference.in_category(&candidate.category) {
            score += 35.0;
            reasons.push(format!("Same category: {}", reference.category));
        } else if categories_related(&reference.category, &candidate.category) {
            score += 20.0;
            reasons.push(format!(
                "Related categories: {} \u{2192} {}",
                reference.category, candidate.category
            ));
        }

        if !reference.brand.is_empty() && reference.from_brand(&candidate.brand) {
            score += 20.0;
            reasons.push(format!("Same brand: {}", reference.brand));
        }

        let larger = reference.price.max(candidate.price).max(1.0);
        let price_delta = (reference.price - candidate.price).abs() / larger;
        if price_delta < 0.25 {
            score += 15.0;
            reasons.push(format!(
                "Similar price range: \u{20b9}{} \u{2192} \u{20b9}{}",
                reference.price, candidate.price
            ));
        } else if price_delta < 0.5 {
            score += 7.0;
        }

        if (reference.rating - candidate.rating).abs() < 0.5 {
            score += 10.0;
            reasons.push(format!(
                "Similar quality: {} \u{2192} {} stars",
                reference.rating, candidate.rating
            ));
        }

        let (overlap, shared) = keyword_overlap(&reference.description, &candidate.description);
        score += overlap * 10.0;
        if !shared.is_empty() {
            let sample: Vec<&str> = shared.iter().take(3).map(String::as_str).collect();
            reasons.push(format!("Shared features: {}", sample.join(", ")));
        }

        score += (self.popularity.score(reference.id) as f32).min(10.0);

        (score.min(100.0), reasons)
    }

    fn feature_match(
        &self,
        product: &Product,
        criteria: &SimilarityCriteria,
    ) -> (f32, Vec<String>) {
        let mut score = 0.0f32;
        let mut reasons = Vec::new();

        if let Some(category) = &criteria.category {
            if product
                .category
                .to_lowercase()
                .contains(&category.to_lowercase())
            {
                score += 30.0;
                reasons.push(format!("Category: {category}"));
            }
        }

        if let Some(brand) = &criteria.brand {
            if product.brand.to_lowercase().contains(&brand.to_lowercase()) {
                score += 25.0;
                reasons.push(format!("Brand: {brand}"));
            }
        }

        if let (Some(min), Some(max)) = (criteria.min_price, criteria.max_price) {
            if product.price >= min && product.price <= max {
                score += 25.0;
                reasons.push(format!("Price: \u{20b9}{min}-\u{20b9}{max}"));
            }
        }

        if let Some(min_rating) = criteria.min_rating {
            if product.rating >= min_rating {
                score += 10.0;
                reasons.push(format!("Rating: {min_rating}+ stars"));
            }
        }

        if !criteria.style_keywords.is_empty() {
            let description = product.description.to_lowercase();
            let matched: Vec<&String> = criteria
                .style_keywords
                .iter()
                .filter(|keyword| description.contains(&keyword.to_lowercase()))
                .collect();
            if !matched.is_empty() {
                score += (matched.len() as f32 * 8.0).min(20.0);
                let names: Vec<&str> = matched.iter().map(|k| k.as_str()).collect();
                reasons.push(format!("Style: {}", names.join(", ")));
            }
        }

        score += (self.popularity.score(product.id) as f32).min(10.0);

        (score.min(100.0), reasons)
    }

    /// Conversational framing of how alike two products are
    pub fn explanation(&self, reference: &Product, candidate: &Product) -> String {
        let (score, reasons) = self.similarity(reference, candidate);
        if score >= 80.0 {
            let top: Vec<&str> = reasons.iter().take(2).map(String::as_str).collect();
            format!(
                "Very similar to {}! They share {}.",
                reference.name,
                top.join(" and ")
            )
        } else if score >= 60.0 {
            format!(
                "Quite similar to {}. {}",
                reference.name,
                reasons
                    .first()
                    .map(String::as_str)
                    .unwrap_or("They have comparable features.")
            )
        } else if score >= 40.0 {
            format!(
                "Somewhat similar to {}. {}",
                reference.name,
                reasons
                    .first()
                    .map(String::as_str)
                    .unwrap_or("Consider this alternative.")
            )
        } else {
            format!(
                "Alternative option to {}. Different but worth considering.",
                reference.name
            )
        }
    }
}

fn collect_ranked(
    scored: impl Iterator<Item = SimilarityScore>,
    limit: usize,
) -> Vec<SimilarityScore> {
    let mut ranked: Vec<SimilarityScore> = scored.filter(|entry| entry.score > 0.0).collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

fn complementarity(base: &Product, candidate: &Product) -> (f32, Vec<String>) {
    let mut score = 0.0f32;
    let mut reasons = Vec::new();

    if !base.in_category(&candidate.category) {
        score += 30.0;
        reasons.push(format!("Complements your {}", base.category));
    }

    if !base.brand.is_empty() && base.from_brand(&candidate.brand) {
        score += 25.0;
        reasons.push(format!("Matching {} brand", base.brand));
    }

    if candidate.price < base.price * 0.6 {
        score += 15.0;
        reasons.push("Affordable add-on".to_string());
    }

    if style_overlap(&base.description, &candidate.description) > 0.6 {
        score += 20.0;
        reasons.push("Coordinated style".to_string());
    }

    (score.min(100.0), reasons)
}

fn categories_related(a: &str, b: &str) -> bool {
    RELATED_CATEGORIES.iter().any(|group| {
        group.iter().any(|g| a.eq_ignore_ascii_case(g))
            && group.iter().any(|g| b.eq_ignore_ascii_case(g))
    })
}

/// Jaccard-like overlap between description keyword sets, with the
/// shared keywords for reason strings. Denominator is the larger set.
fn keyword_overlap(description_a: &str, description_b: &str) -> (f32, Vec<String>) {
    let keywords_a = description_keywords(description_a);
    let keywords_b = description_keywords(description_b);

    let max_possible = keywords_a.len().max(keywords_b.len());
    if max_possible == 0 {
        return (0.0, Vec::new());
    }

    let mut shared: Vec<String> = keywords_a.intersection(&keywords_b).cloned().collect();
    shared.sort();
    let overlap = shared.len() as f32 / max_possible as f32;
    (overlap, shared)
}

fn description_keywords(description: &str) -> HashSet<String> {
    description
        .unicode_words()
        .map(str::to_lowercase)
        .filter(|word| {
            word.chars().count() > 3
                && !word.chars().all(|c| c.is_ascii_digit())
                && !KEYWORD_STOP_WORDS.contains(&word.as_str())
        })
        .collect()
}

/// Fraction of the combined style vocabulary both descriptions share
fn style_overlap(description_a: &str, description_b: &str) -> f32 {
    let a = description_a.to_lowercase();
    let b = description_b.to_lowercase();

    let styles_a: HashSet<&str> = STYLE_WORDS.iter().copied().filter(|w| a.contains(w)).collect();
    let styles_b: HashSet<&str> = STYLE_WORDS.iter().copied().filter(|w| b.contains(w)).collect();

    let union = styles_a.union(&styles_b).count();
    if union == 0 {
        return 0.0;
    }
    styles_a.intersection(&styles_b).count() as f32 / union as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_assistant_core::{EngagementAction, InMemoryPopularityStore};

    fn product(
        id: u32,
        name: &str,
        price: f32,
        rating: f32,
        category: &str,
        brand: &str,
        description: &str,
    ) -> Product {
        Product {
            id,
            name: name.into(),
            price,
            image: String::new(),
            rating,
            category: category.into(),
            brand: brand.into(),
            description: description.into(),
            created_at: None,
        }
    }

    fn sample_catalog() -> Vec<Product> {
        vec![
            product(1, "SKULL PRINTED JACKET", 399.0, 4.8, "Jacket", "Wink", ""),
            product(2, "BLACK HOODIE", 155.0, 4.2, "Hoodie", "Uniqlo", ""),
            product(3, "ARM GLOVES", 250.0, 4.5, "Gloves", "Zara", ""),
            product(4, "TRACK PANTS", 150.0, 4.9, "Pants", "Wink", ""),
        ]
    }

    fn finder() -> SimilarProductFinder {
        SimilarProductFinder::new(InMemoryPopularityStore::shared())
    }

    #[test]
    fn test_scores_stay_in_range_with_exact_confidence() {
        let finder = finder();
        let catalog = sample_catalog();
        for reference in &catalog {
            for entry in finder.find_similar(&catalog, reference, 10, &[]) {
                assert!((0.0..=100.0).contains(&entry.score));
                assert!((entry.confidence - entry.score / 100.0).abs() < 1e-6);
            }
            for entry in finder.find_complementary(&catalog, reference, 10) {
                assert!((0.0..=100.0).contains(&entry.score));
                assert!((entry.confidence - entry.score / 100.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_related_category_bonus_lifts_hoodie_over_gloves() {
        let finder = finder();
        let catalog = sample_catalog();
        let jacket = &catalog[0];

        let similar = finder.find_similar(&catalog, jacket, 10, &[]);
        let position = |id: u32| similar.iter().position(|e| e.product.id == id).unwrap();

        // Hoodie: related category (+20). Gloves: close-ish price (+7)
        // and close rating (+10). Pants: same brand (+20) and close
        // rating (+10) win outright.
        assert!(position(2) < position(3));
        assert_eq!(similar[0].product.id, 4);
        assert!(similar
            .iter()
            .find(|e| e.product.id == 2)
            .unwrap()
            .reasons
            .iter()
            .any(|r| r.starts_with("Related categories")));
    }

    #[test]
    fn test_same_category_scores_thirty_five() {
        let finder = finder();
        let a = product(1, "A", 100.0, 4.0, "Jacket", "Wink", "");
        let b = product(2, "B", 500.0, 1.0, "Jacket", "Zara", "");
        // Price delta 0.8 and rating delta 3.0 contribute nothing.
        let (score, reasons) = finder.similarity(&a, &b);
        assert!((score - 35.0).abs() < 1e-4);
        assert!(reasons.iter().any(|r| r.starts_with("Same category")));
    }

    #[test]
    fn test_keyword_overlap_uses_larger_set_as_denominator() {
        let (overlap, shared) = keyword_overlap(
            "warm insulated winter jacket",
            "insulated winter gear protection layer",
        );
        // Shared: insulated, winter. Sets: 4 vs 5 keywords.
        assert_eq!(shared, vec!["insulated".to_string(), "winter".to_string()]);
        assert!((overlap - 2.0 / 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_reference_popularity_capped_at_ten() {
        let store = InMemoryPopularityStore::new();
        for _ in 0..20 {
            store.record(1, EngagementAction::Purchase);
        }
        let finder = SimilarProductFinder::new(Arc::new(store));

        let a = product(1, "A", 100.0, 4.0, "Jacket", "Wink", "");
        let b = product(2, "B", 500.0, 1.0, "Pants", "Zara", "");
        // No attribute overlap at all, so only the capped popularity
        // of the reference remains.
        let (score, _) = finder.similarity(&a, &b);
        assert!((score - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_complementary_prefers_cheap_cross_category_same_brand() {
        let finder = finder();
        let base = product(1, "JACKET", 400.0, 4.8, "Jacket", "Wink", "streetwear look");
        let catalog = vec![
            base.clone(),
            product(2, "GLOVES", 150.0, 4.5, "Gloves", "Wink", "streetwear accessory"),
            product(3, "OTHER JACKET", 380.0, 4.6, "Jacket", "Wink", ""),
        ];

        let complements = finder.find_complementary(&catalog, &base, 5);
        assert_eq!(complements[0].product.id, 2);
        // Different category + same brand + under 60% of base price +
        // full style overlap.
        assert!((complements[0].score - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_score_candidates_are_dropped() {
        let finder = finder();
        let base = product(1, "JACKET", 400.0, 4.8, "Jacket", "Wink", "");
        let catalog = vec![
            base.clone(),
            // Same category, other brand, close price: complementarity 0.
            product(2, "JACKET II", 390.0, 4.7, "Jacket", "Uniqlo", ""),
        ];
        assert!(finder.find_complementary(&catalog, &base, 5).is_empty());
    }

    #[test]
    fn test_feature_match_style_bonus_capped() {
        let finder = finder();
        let catalog = vec![product(
            1,
            "JACKET",
            400.0,
            4.8,
            "Jacket",
            "Wink",
            "casual sporty streetwear minimal",
        )];
        let criteria = SimilarityCriteria {
            style_keywords: vec![
                "casual".into(),
                "sporty".into(),
                "streetwear".into(),
                "minimal".into(),
            ],
            ..Default::default()
        };

        let matched = finder.find_by_features(&catalog, &criteria, 5);
        // Four matches at 8 points each would be 32; the term caps at 20.
        assert!((matched[0].score - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_user_behavior_anchors_on_last_viewed() {
        let finder = finder();
        let catalog = sample_catalog();

        // Last viewed is the jacket; the pants view only excludes.
        let recommendations = finder.find_from_user_behavior(&catalog, &[4, 1], 5);
        assert!(recommendations.iter().all(|e| e.product.id != 1));
        assert!(recommendations.iter().all(|e| e.product.id != 4));
        assert!(!recommendations.is_empty());

        assert!(finder.find_from_user_behavior(&catalog, &[], 5).is_empty());
        assert!(finder.find_from_user_behavior(&catalog, &[99], 5).is_empty());
    }

    #[test]
    fn test_explanation_tiers() {
        let store = InMemoryPopularityStore::new();
        for _ in 0..4 {
            store.record(1, EngagementAction::Purchase);
        }
        let finder = SimilarProductFinder::new(Arc::new(store));

        let a = product(1, "SKULL JACKET", 400.0, 4.8, "Jacket", "Wink", "warm winter layer");
        let twin = product(2, "SKULL JACKET II", 390.0, 4.7, "Jacket", "Wink", "warm winter layer");
        // 35 + 20 + 15 + 10 + 10 + 10 = 100
        assert!(finder.explanation(&a, &twin).starts_with("Very similar"));

        let unrelated = product(3, "TRACK PANTS", 150.0, 3.0, "Pants", "Zara", "");
        assert!(finder
            .explanation(&a, &unrelated)
            .starts_with("Alternative option"));
    }
}
