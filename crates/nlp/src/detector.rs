//! Rule-based intent detection
//!
//! Kind selection runs an explicit ordered rule cascade: every rule whose
//! pattern matches overwrites the running result, so later rules in the
//! table win over earlier ones. This is deliberate last-match-wins
//! behavior, not a priority ranking. Entity extraction is independent of
//! the kind decision and only accumulates confidence.

use serde::{Deserialize, Serialize};

use shop_assistant_core::{
    Intent, IntentEntities, IntentKind, IntentParameters, PriceRange, QueryContext, SortKey,
    SortOrder,
};

use crate::patterns::{
    BRAND_PATTERNS, CATEGORY_PATTERNS, FEATURE_PATTERNS, INTENT_PATTERNS, PRICE_PATTERNS,
};
use crate::tokenizer;

/// Result of interpreting one utterance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpResponse {
    pub intent: Intent,
    pub normalized_query: String,
    /// Same as `intent.kind`; kept separate for UI dispatch
    pub action: IntentKind,
    pub suggestions: Vec<String>,
}

/// How a matching rule updates the running confidence
#[derive(Debug, Clone, Copy)]
enum ConfidenceUpdate {
    /// Replace the running confidence
    Set(f32),
    /// Keep the running confidence if it is already higher
    AtLeast(f32),
}

/// One entry of the kind-selection cascade
struct KindRule {
    kind: IntentKind,
    update: ConfidenceUpdate,
    matches: fn(&str) -> bool,
}

const BASE_CONFIDENCE: f32 = 0.7;

/// Rule-based intent detector over the static pattern tables
pub struct IntentDetector {
    cascade: Vec<KindRule>,
}

impl IntentDetector {
    pub fn new() -> Self {
        // Fixed evaluation order; reordering changes which kind wins for
        // text that triggers several patterns.
        let cascade = vec![
            KindRule {
                kind: IntentKind::ShowProducts,
                update: ConfidenceUpdate::Set(0.9),
                matches: |text| INTENT_PATTERNS.show_products.is_match(text),
            },
            KindRule {
                kind: IntentKind::ShowRecommendations,
                update: ConfidenceUpdate::AtLeast(0.85),
                matches: |text| INTENT_PATTERNS.recommendations.is_match(text),
            },
            KindRule {
                kind: IntentKind::Comparison,
                update: ConfidenceUpdate::Set(0.8),
                matches: |text| INTENT_PATTERNS.comparison.is_match(text),
            },
            KindRule {
                kind: IntentKind::ShowCategories,
                update: ConfidenceUpdate::Set(0.9),
                matches: |text| INTENT_PATTERNS.categories.is_match(text),
            },
        ];
        tracing::debug!(rules = cascade.len(), "intent cascade ready");
        Self { cascade }
    }

    /// Classify one utterance, optionally informed by session context
    pub fn detect(&self, text: &str, context: Option<&QueryContext>) -> NlpResponse {
        let normalized_query = tokenizer::normalize(text);
        let intent = self.analyze(&normalized_query, context);
        let suggestions = self.suggestions(&intent);

        NlpResponse {
            action: intent.kind,
            intent,
            normalized_query,
            suggestions,
        }
    }

    fn analyze(&self, text: &str, context: Option<&QueryContext>) -> Intent {
        let mut kind = IntentKind::GeneralHelp;
        let mut confidence = BASE_CONFIDENCE;

        for rule in &self.cascade {
            if (rule.matches)(text) {
                kind = rule.kind;
                confidence = match rule.update {
                    ConfidenceUpdate::Set(value) => value,
                    ConfidenceUpdate::AtLeast(value) => confidence.max(value),
                };
            }
        }

        let mut entities = IntentEntities::default();

        // First matching category wins; the catch-all pattern is not an
        // entity.
        for pattern in CATEGORY_PATTERNS.iter() {
            if pattern.regex.is_match(text) {
                entities.category = Some(pattern.canonical.to_string());
                confidence += 0.10;
                break;
            }
        }

        // Brands iterate fully: the last matching brand wins the entity
        // slot, but every match adds confidence.
        for pattern in BRAND_PATTERNS.iter() {
            if pattern.regex.is_match(text) {
                entities.brand = Some(pattern.canonical.to_string());
                confidence += 0.05;
            }
        }

        if let Some(range) = extract_price_range(text) {
            entities.price_range = Some(range);
            confidence += 0.15;
        }

        for pattern in FEATURE_PATTERNS.iter() {
            if let Some(found) = pattern.regex.find(text) {
                entities
                    .features
                    .push(format!("{}:{}", pattern.canonical, found.as_str()));
                confidence += 0.05;
            }
        }

        let parameters = extract_parameters(text);

        if let Some(context) = context {
            // Follow-up queries inherit the previous category when this
            // one names none.
            if kind == IntentKind::ShowProducts && entities.category.is_none() {
                if let Some(previous) = &context.previous_intent {
                    entities.category = previous.entities.category.clone();
                }
            }
            if !context.conversation_history.is_empty() {
                confidence += 0.10;
            }
        }

        Intent {
            kind,
            confidence: confidence.clamp(0.0, 1.0),
            entities,
            parameters,
        }
    }

    /// Up to three follow-up suggestions for the final intent
    fn suggestions(&self, intent: &Intent) -> Vec<String> {
        let mut suggestions = Vec::new();

        match intent.kind {
            IntentKind::ShowProducts => {
                if let Some(category) = &intent.entities.category {
                    suggestions.push(format!("Show me more {category}"));
                    suggestions.push(format!("What are the best {category}?"));
                }
                if let Some(range) = &intent.entities.price_range {
                    if let Some(max) = range.max {
                        suggestions.push(format!("Show me products under ₹{max:.0}"));
                    }
                }
            }
            IntentKind::ShowRecommendations => {
                suggestions.push("Show me trending products".into());
                suggestions.push("What are the best sellers?".into());
                suggestions.push("Recommend based on my previous interests".into());
            }
            IntentKind::PriceQuery => {
                suggestions.push("Show me cheaper alternatives".into());
                suggestions.push("What is the price range for this category?".into());
            }
            _ => {}
        }

        suggestions.truncate(3);
        suggestions
    }
}

impl Default for IntentDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract price bounds, trying the explicit phrasings first and falling
/// back to bare numbers when the text carries a price marker.
fn extract_price_range(text: &str) -> Option<PriceRange> {
    if let Some(caps) = PRICE_PATTERNS.under.captures(text) {
        return caps[2].parse().ok().map(PriceRange::under);
    }
    if let Some(caps) = PRICE_PATTERNS.above.captures(text) {
        return caps[2].parse().ok().map(PriceRange::above);
    }
    if let Some(caps) = PRICE_PATTERNS.between.captures(text) {
        // Bounds are taken as written, without reordering.
        let min: f32 = caps[2].parse().ok()?;
        let max: f32 = caps[3].parse().ok()?;
        return Some(PriceRange::between(min, max));
    }
    if let Some(caps) = PRICE_PATTERNS.exact.captures(text) {
        return caps[2].parse().ok().map(PriceRange::exactly);
    }

    if tokenizer::contains_any(text, &["₹", "$", "rupee", "price"]) {
        let numbers = tokenizer::extract_numbers(text);
        match numbers.as_slice() {
            [only] => return Some(PriceRange::under(*only)),
            [first, second] => {
                return Some(PriceRange::between(first.min(*second), first.max(*second)));
            }
            _ => {}
        }
    }

    None
}

fn extract_parameters(text: &str) -> IntentParameters {
    let mut parameters = IntentParameters::default();

    if text.contains("top") || text.contains("best") {
        let limit = crate::patterns::TOP_N
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(5);
        parameters.limit = Some(limit);
    }

    if text.contains("cheap") || text.contains("lowest") {
        parameters.sort_by = Some(SortKey::Price);
        parameters.sort_order = Some(SortOrder::Asc);
    } else if text.contains("expensive") || text.contains("highest") {
        parameters.sort_by = Some(SortKey::Price);
        parameters.sort_order = Some(SortOrder::Desc);
    } else if text.contains("rating") {
        parameters.sort_by = Some(SortKey::Rating);
        parameters.sort_order = Some(SortOrder::Desc);
    }

    parameters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> NlpResponse {
        IntentDetector::new().detect(text, None)
    }

    #[test]
    fn test_show_jackets_under_400() {
        let response = detect("show me jackets under ₹400");
        assert_eq!(response.intent.kind, IntentKind::ShowProducts);
        assert_eq!(response.intent.entities.category.as_deref(), Some("jacket"));
        assert_eq!(
            response.intent.entities.price_range.unwrap().max,
            Some(400.0)
        );
        assert!(response.intent.confidence >= 0.9);
    }

    #[test]
    fn test_recommend_something() {
        let response = detect("recommend something");
        assert_eq!(response.intent.kind, IntentKind::ShowRecommendations);
        assert!(response.intent.confidence >= 0.85);
    }

    #[test]
    fn test_no_pattern_falls_back_to_general_help() {
        let response = detect("hmm okay");
        assert_eq!(response.intent.kind, IntentKind::GeneralHelp);
        assert!((response.intent.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_later_cascade_rules_win() {
        // Both "show" and "categories" match; the categories rule runs
        // later in the cascade and takes the kind.
        let response = detect("show me your categories");
        assert_eq!(response.intent.kind, IntentKind::ShowCategories);
        assert!((response.intent.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_recommendation_keeps_higher_running_confidence() {
        // "show" sets 0.9; the recommendations rule takes the kind but
        // only raises confidence to at least 0.85, so 0.9 survives.
        let response = detect("show me the most popular item");
        assert_eq!(response.intent.kind, IntentKind::ShowRecommendations);
        assert!(response.intent.confidence >= 0.9);
    }

    #[test]
    fn test_price_phrasings() {
        assert_eq!(
            detect("anything above 200").intent.entities.price_range,
            Some(PriceRange::above(200.0))
        );
        assert_eq!(
            detect("between ₹100 and ₹300").intent.entities.price_range,
            Some(PriceRange::between(100.0, 300.0))
        );
        assert_eq!(
            detect("costing 250").intent.entities.price_range,
            Some(PriceRange::exactly(250.0))
        );
    }

    #[test]
    fn test_bare_number_fallback_needs_price_marker() {
        assert_eq!(
            detect("price around 300").intent.entities.price_range,
            Some(PriceRange::under(300.0))
        );
        let two = detect("price 500 or 200").intent.entities.price_range.unwrap();
        assert_eq!(two.min, Some(200.0));
        assert_eq!(two.max, Some(500.0));
        assert_eq!(detect("give me 300 of them").intent.entities.price_range, None);
    }

    #[test]
    fn test_features_accumulate() {
        let response = detect("black cotton hoodie for winter");
        let features = &response.intent.entities.features;
        assert!(features.contains(&"color:black".to_string()));
        assert!(features.contains(&"material:cotton".to_string()));
        assert!(features.contains(&"season:winter".to_string()));
    }

    #[test]
    fn test_parameters_top_n_and_sorting() {
        let response = detect("show the top 3 cheap hoodies");
        assert_eq!(response.intent.parameters.limit, Some(3));
        assert_eq!(response.intent.parameters.sort_by, Some(SortKey::Price));
        assert_eq!(response.intent.parameters.sort_order, Some(SortOrder::Asc));

        let response = detect("best hoodies");
        assert_eq!(response.intent.parameters.limit, Some(5));
    }

    #[test]
    fn test_context_carries_category_forward() {
        let detector = IntentDetector::new();
        let mut context = QueryContext::new();
        let first = detector.detect("show me jackets", Some(&context));
        context.record_utterance("show me jackets");
        context.absorb_intent(&first.intent);

        let second = detector.detect("show me something cheaper", Some(&context));
        assert_eq!(second.intent.entities.category.as_deref(), Some("jacket"));
        // History bonus saturates at the clamp.
        assert!(second.intent.confidence <= 1.0);
    }

    #[test]
    fn test_confidence_is_clamped_to_one() {
        let detector = IntentDetector::new();
        let mut context = QueryContext::new();
        context.record_utterance("earlier turn");

        let response = detector.detect(
            "show me black cotton wink jackets under ₹400 for winter",
            Some(&context),
        );
        assert!(response.intent.confidence <= 1.0);
        assert!(response.intent.confidence >= 0.99);
    }

    #[test]
    fn test_suggestions_cap_at_three() {
        let response = detect("recommend something");
        assert_eq!(response.suggestions.len(), 3);

        let response = detect("show me jackets under ₹400");
        assert!(response.suggestions.len() <= 3);
        assert!(response
            .suggestions
            .iter()
            .any(|s| s.contains("jacket")));
    }
}
