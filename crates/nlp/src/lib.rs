//! Query interpretation for the storefront assistant
//!
//! Pipeline pieces in dependency order:
//! - [`tokenizer`]: normalization, token and literal extraction
//! - [`patterns`]: static regex tables for categories, brands, prices,
//!   intent verbs and features
//! - [`detector`]: ordered-cascade intent classification with entity
//!   extraction and conversation-context carryover
//! - [`response`]: reply text and follow-up suggestions

pub mod detector;
pub mod patterns;
pub mod response;
pub mod tokenizer;

pub use detector::{IntentDetector, NlpResponse};
pub use response::{GeneratedResponse, ResponseGenerator};
