//! Conversation-scoped accumulated state
//!
//! A [`QueryContext`] lives for one chat session. Its history is
//! append-only and its preference sets only grow; nothing is pruned until
//! the session is cleared.

use serde::{Deserialize, Serialize};

use crate::intent::{Intent, PriceRange};

/// Preferences derived from what the user has asked about so far.
/// Category and brand sets grow by union; the price range is last-write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub preferred_categories: Vec<String>,
    pub favorite_brands: Vec<String>,
    pub price_range: Option<PriceRange>,
}

impl UserPreferences {
    fn add_unique(list: &mut Vec<String>, value: &str) {
        if !list.iter().any(|existing| existing.eq_ignore_ascii_case(value)) {
            list.push(value.to_string());
        }
    }
}

/// Session-scoped conversation state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryContext {
    pub previous_intent: Option<Intent>,
    /// Raw utterances in order of arrival
    pub conversation_history: Vec<String>,
    pub user_preferences: UserPreferences,
}

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw utterance to the history
    pub fn record_utterance(&mut self, text: &str) {
        self.conversation_history.push(text.to_string());
    }

    /// Merge a freshly detected intent's entities into the accumulated
    /// preferences and remember it as the previous intent.
    pub fn absorb_intent(&mut self, intent: &Intent) {
        if let Some(category) = &intent.entities.category {
            UserPreferences::add_unique(&mut self.user_preferences.preferred_categories, category);
        }
        if let Some(brand) = &intent.entities.brand {
            UserPreferences::add_unique(&mut self.user_preferences.favorite_brands, brand);
        }
        if let Some(range) = intent.entities.price_range {
            self.user_preferences.price_range = Some(range);
        }
        self.previous_intent = Some(intent.clone());
    }
}
