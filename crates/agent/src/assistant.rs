//! Conversation orchestrator
//!
//! One `ShoppingAssistant` serves many sessions. Each query runs the
//! full pipeline against the session's context as it stood before the
//! query, then folds the detected intent back into that context.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use shop_assistant_config::Settings;
use shop_assistant_core::{
    Catalog, EngagementAction, InMemoryPopularityStore, Intent, IntentKind, PopularityStore,
    Product,
};
use shop_assistant_nlp::{IntentDetector, ResponseGenerator};
use shop_assistant_ranking::{ProductRanker, SimilarProductFinder, SimilarityScore};

use crate::session::SessionManager;
use crate::{AgentError, Result};

/// Everything one turn of conversation produces
#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    pub text: String,
    pub suggestions: Vec<String>,
    pub products: Vec<Product>,
    pub intent: Intent,
    pub normalized_query: String,
}

pub struct ShoppingAssistant {
    catalog: Catalog,
    settings: Settings,
    detector: IntentDetector,
    ranker: ProductRanker,
    finder: SimilarProductFinder,
    popularity: Arc<dyn PopularityStore>,
    sessions: SessionManager,
}

impl ShoppingAssistant {
    pub fn new() -> Result<Self> {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Result<Self> {
        Self::with_popularity_store(settings, InMemoryPopularityStore::shared())
    }

    /// Full constructor with an injected engagement store, for callers
    /// that persist or share popularity counts.
    pub fn with_popularity_store(
        settings: Settings,
        popularity: Arc<dyn PopularityStore>,
    ) -> Result<Self> {
        let catalog = match &settings.catalog.path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::bundled()?,
        };
        tracing::info!(products = catalog.len(), "assistant ready");

        let ranker = ProductRanker::new(Arc::clone(&popularity))
            .with_weights(settings.ranking.weights);
        let finder = SimilarProductFinder::new(Arc::clone(&popularity));

        Ok(Self {
            catalog,
            settings,
            detector: IntentDetector::new(),
            ranker,
            finder,
            popularity,
            sessions: SessionManager::new(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn create_session(&self) -> Uuid {
        self.sessions.create()
    }

    /// Drop a session and all its accumulated context.
    pub fn clear_session(&self, session_id: Uuid) -> bool {
        self.sessions.clear(session_id)
    }

    /// Run one utterance through the pipeline for the given session.
    pub fn handle_query(&self, session_id: Uuid, text: &str) -> Result<AssistantReply> {
        let state = self
            .sessions
            .get(session_id)
            .ok_or(AgentError::SessionNotFound(session_id))?;

        let nlp = self.detector.detect(text, Some(&state.context));
        let intent = nlp.intent;
        tracing::debug!(
            session_id = %session_id,
            kind = %intent.kind,
            confidence = intent.confidence,
            "intent detected"
        );

        let candidates = self.filter_candidates(&intent);
        let products = self.order_candidates(&candidates, &state.context, &nlp.normalized_query, &intent);

        let generated = ResponseGenerator::generate(&intent, &products);

        self.sessions.update(session_id, |state| {
            state.context.record_utterance(text);
            state.context.absorb_intent(&intent);
        });

        // Detector suggestions are query-specific; the generator's are
        // the fallback.
        let mut suggestions = nlp.suggestions;
        if suggestions.is_empty() {
            suggestions = generated.suggestions;
        }
        suggestions.truncate(self.settings.assistant.max_suggestions);

        Ok(AssistantReply {
            text: generated.text,
            suggestions,
            products,
            intent,
            normalized_query: nlp.normalized_query,
        })
    }

    /// Record an engagement event. A session id attributes views to
    /// that session's history for behavior-based recommendations.
    pub fn track(
        &self,
        session_id: Option<Uuid>,
        product_id: u32,
        action: EngagementAction,
    ) -> Result<()> {
        if self.catalog.get(product_id).is_none() {
            return Err(AgentError::UnknownProduct(product_id));
        }
        self.popularity.record(product_id, action);

        if let (Some(session_id), EngagementAction::View) = (session_id, action) {
            self.sessions
                .update(session_id, |state| state.viewed_products.push(product_id))
                .ok_or(AgentError::SessionNotFound(session_id))?;
        }
        Ok(())
    }

    pub fn similar_products(&self, product_id: u32, limit: usize) -> Result<Vec<SimilarityScore>> {
        let reference = self
            .catalog
            .get(product_id)
            .ok_or(AgentError::UnknownProduct(product_id))?;
        Ok(self
            .finder
            .find_similar(self.catalog.all(), reference, limit, &[]))
    }

    pub fn complementary_products(
        &self,
        product_id: u32,
        limit: usize,
    ) -> Result<Vec<SimilarityScore>> {
        let base = self
            .catalog
            .get(product_id)
            .ok_or(AgentError::UnknownProduct(product_id))?;
        Ok(self.finder.find_complementary(self.catalog.all(), base, limit))
    }

    /// Recommendations seeded by what the session has viewed.
    pub fn recommendations_for(&self, session_id: Uuid) -> Result<Vec<SimilarityScore>> {
        let state = self
            .sessions
            .get(session_id)
            .ok_or(AgentError::SessionNotFound(session_id))?;
        Ok(self.finder.find_from_user_behavior(
            self.catalog.all(),
            &state.viewed_products,
            self.settings.assistant.similar_limit,
        ))
    }

    fn filter_candidates(&self, intent: &Intent) -> Vec<Product> {
        let mut candidates: Vec<Product> = self.catalog.all().to_vec();

        if let Some(category) = &intent.entities.category {
            candidates.retain(|p| p.in_category(category));
        }
        if let Some(brand) = &intent.entities.brand {
            candidates.retain(|p| p.from_brand(brand));
        }
        if let Some(range) = &intent.entities.price_range {
            candidates.retain(|p| range.contains(p.price));
        }

        candidates
    }

    fn order_candidates(
        &self,
        candidates: &[Product],
        context: &shop_assistant_core::QueryContext,
        query: &str,
        intent: &Intent,
    ) -> Vec<Product> {
        match intent.kind {
            IntentKind::Comparison if !intent.entities.comparison_targets.is_empty() => {
                let targets: Vec<&str> = intent
                    .entities
                    .comparison_targets
                    .iter()
                    .map(String::as_str)
                    .collect();
                self.ranker.rank_for_comparison(candidates, &targets)
            }
            IntentKind::PriceQuery => {
                let budget = intent.entities.price_range.as_ref().and_then(|range| {
                    match (range.min, range.max) {
                        (Some(min), Some(max)) => Some((min + max) / 2.0),
                        (_, Some(max)) => Some(max),
                        (Some(min), None) => Some(min),
                        (None, None) => None,
                    }
                });
                match budget {
                    Some(budget) => self.ranker.rank_by_price_sensitivity(candidates, budget),
                    None => self.rank_default(candidates, context, query, intent),
                }
            }
            _ => self.rank_default(candidates, context, query, intent),
        }
    }

    fn rank_default(
        &self,
        candidates: &[Product],
        context: &shop_assistant_core::QueryContext,
        query: &str,
        intent: &Intent,
    ) -> Vec<Product> {
        let mut options = self.settings.ranking.options.clone();
        if intent.kind == IntentKind::ShowRecommendations {
            // Recommendations lean on engagement and the calendar, not
            // just the literal query.
            options.consider_seasonality = true;
            options.boost_new_products = true;
            options.max_results = Some(
                options
                    .max_results
                    .unwrap_or(self.settings.assistant.recommendation_limit),
            );
        }
        self.ranker
            .rank(candidates, context, Some(query), Some(intent), &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant() -> ShoppingAssistant {
        ShoppingAssistant::new().unwrap()
    }

    #[test]
    fn test_jackets_under_budget_scenario() {
        let assistant = assistant();
        let session = assistant.create_session();

        let reply = assistant
            .handle_query(session, "show me jackets under \u{20b9}400")
            .unwrap();

        assert_eq!(reply.intent.kind, IntentKind::ShowProducts);
        assert!(!reply.products.is_empty());
        assert!(reply
            .products
            .iter()
            .all(|p| p.in_category("jacket") && p.price <= 400.0));
        assert!(!reply.text.is_empty());
        assert!(reply.suggestions.len() <= 3);
    }

    #[test]
    fn test_context_carries_category_into_next_turn() {
        let assistant = assistant();
        let session = assistant.create_session();

        assistant.handle_query(session, "show me jackets").unwrap();
        // No category in the follow-up; the previous one carries over.
        let reply = assistant.handle_query(session, "show me more of those").unwrap();

        assert_eq!(reply.intent.entities.category.as_deref(), Some("jacket"));
        assert!(reply.products.iter().all(|p| p.in_category("jacket")));
    }

    #[test]
    fn test_preferences_accumulate_across_turns() {
        let assistant = assistant();
        let session = assistant.create_session();

        assistant.handle_query(session, "show me jackets").unwrap();
        assistant.handle_query(session, "find hoodies from uniqlo").unwrap();

        let state = assistant.sessions.get(session).unwrap();
        let prefs = &state.context.user_preferences;
        assert!(prefs.preferred_categories.contains(&"jacket".to_string()));
        assert!(prefs.preferred_categories.contains(&"hoodie".to_string()));
        assert!(prefs.favorite_brands.contains(&"uniqlo".to_string()));
        assert_eq!(state.context.conversation_history.len(), 2);
    }

    #[test]
    fn test_tracked_views_drive_recommendations() {
        let assistant = assistant();
        let session = assistant.create_session();

        assistant
            .track(Some(session), 1, EngagementAction::View)
            .unwrap();
        let recommendations = assistant.recommendations_for(session).unwrap();

        assert!(!recommendations.is_empty());
        assert!(recommendations.iter().all(|r| r.product.id != 1));
    }

    #[test]
    fn test_track_rejects_unknown_product() {
        let assistant = assistant();
        let err = assistant
            .track(None, 9999, EngagementAction::Click)
            .unwrap_err();
        assert!(matches!(err, AgentError::UnknownProduct(9999)));
    }

    #[test]
    fn test_cleared_session_is_gone() {
        let assistant = assistant();
        let session = assistant.create_session();
        assert!(assistant.clear_session(session));

        let err = assistant.handle_query(session, "hello").unwrap_err();
        assert!(matches!(err, AgentError::SessionNotFound(_)));
    }

    #[test]
    fn test_similar_products_exclude_reference() {
        let assistant = assistant();
        let similar = assistant.similar_products(1, 5).unwrap();
        assert!(!similar.is_empty());
        assert!(similar.iter().all(|s| s.product.id != 1));
        assert!(similar.len() <= 5);
    }

    #[test]
    fn test_no_products_matched_still_replies() {
        let assistant = assistant();
        let session = assistant.create_session();

        let reply = assistant
            .handle_query(session, "show me jackets under \u{20b9}1")
            .unwrap();
        assert!(reply.products.is_empty());
        assert!(!reply.text.is_empty());
    }
}
