//! Engagement counters
//!
//! A popularity score is a running per-product counter incremented by
//! view/click/purchase events with weights 1/2/3. There is no decay,
//! reset, or per-session isolation: the store is a single running total
//! for its own lifetime.
//!
//! The store is a trait rather than a module-level singleton so callers
//! decide the lifecycle (process-wide vs per-test) and a server
//! deployment gets atomic increments for free from the `DashMap` impl.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Engagement event kinds and their counter weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementAction {
    View,
    Click,
    Purchase,
}

impl EngagementAction {
    /// Counter increment for this action
    pub fn weight(&self) -> u64 {
        match self {
            EngagementAction::View => 1,
            EngagementAction::Click => 2,
            EngagementAction::Purchase => 3,
        }
    }
}

/// Injectable engagement counter store
pub trait PopularityStore: Send + Sync {
    /// Add the action's weight to the product's running total
    fn record(&self, product_id: u32, action: EngagementAction);

    /// Current accumulated score for a product (0 when never seen)
    fn score(&self, product_id: u32) -> u64;
}

/// Process-wide in-memory store with atomic per-key increments
#[derive(Debug, Default)]
pub struct InMemoryPopularityStore {
    scores: DashMap<u32, u64>,
}

impl InMemoryPopularityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for injection points taking `Arc<dyn _>`
    pub fn shared() -> Arc<dyn PopularityStore> {
        Arc::new(Self::new())
    }
}

impl PopularityStore for InMemoryPopularityStore {
    fn record(&self, product_id: u32, action: EngagementAction) {
        let mut entry = self.scores.entry(product_id).or_insert(0);
        *entry += action.weight();
        tracing::debug!(product_id, score = *entry, action = ?action, "popularity recorded");
    }

    fn score(&self, product_id: u32) -> u64 {
        self.scores.get(&product_id).map(|entry| *entry).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_weights() {
        assert_eq!(EngagementAction::View.weight(), 1);
        assert_eq!(EngagementAction::Click.weight(), 2);
        assert_eq!(EngagementAction::Purchase.weight(), 3);
    }

    #[test]
    fn test_unknown_product_scores_zero() {
        let store = InMemoryPopularityStore::new();
        assert_eq!(store.score(42), 0);
    }

    #[test]
    fn test_two_purchases_add_exactly_six() {
        let store = InMemoryPopularityStore::new();
        store.record(4, EngagementAction::View);
        let before = store.score(4);

        store.record(4, EngagementAction::Purchase);
        store.record(4, EngagementAction::Purchase);

        assert_eq!(store.score(4), before + 6);
    }

    #[test]
    fn test_counters_are_per_product() {
        let store = InMemoryPopularityStore::new();
        store.record(1, EngagementAction::Click);
        store.record(2, EngagementAction::View);

        assert_eq!(store.score(1), 2);
        assert_eq!(store.score(2), 1);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let store = Arc::new(InMemoryPopularityStore::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    store.record(9, EngagementAction::View);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.score(9), 800);
    }
}
