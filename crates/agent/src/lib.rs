//! Session-aware conversational shopping assistant
//!
//! Ties the pipeline together: utterance in, intent detection, catalog
//! filtering, ranking, response generation, and per-session context
//! updates.

pub mod assistant;
pub mod session;

pub use assistant::{AssistantReply, ShoppingAssistant};
pub use session::{SessionManager, SessionState};

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Unknown session: {0}")]
    SessionNotFound(Uuid),

    #[error("Unknown product id: {0}")]
    UnknownProduct(u32),

    #[error(transparent)]
    Core(#[from] shop_assistant_core::CoreError),

    #[error(transparent)]
    Config(#[from] shop_assistant_config::ConfigError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
