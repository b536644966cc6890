//! Per-session conversation state
//!
//! Sessions are keyed by UUID and live until explicitly cleared. The
//! context inside only accumulates: history appends, preferences grow.

use std::collections::HashMap;

use parking_lot::RwLock;
use shop_assistant_core::QueryContext;
use uuid::Uuid;

/// One chat session's accumulated state
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub context: QueryContext,
    /// Product ids in view order; the tail is the most recent
    pub viewed_products: Vec<u32>,
}

#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, SessionState>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().insert(id, SessionState::default());
        tracing::debug!(session_id = %id, "session created");
        id
    }

    pub fn get(&self, id: Uuid) -> Option<SessionState> {
        self.sessions.read().get(&id).cloned()
    }

    /// Run a closure against a session's state under the write lock.
    /// Returns `None` for unknown sessions.
    pub fn update<T>(&self, id: Uuid, apply: impl FnOnce(&mut SessionState) -> T) -> Option<T> {
        self.sessions.write().get_mut(&id).map(apply)
    }

    /// Drop a session and everything it accumulated
    pub fn clear(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().remove(&id).is_some();
        if removed {
            tracing::debug!(session_id = %id, "session cleared");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
