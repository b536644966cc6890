//! Core types and shared state for the storefront assistant
//!
//! This crate provides the foundational types used across all other crates:
//! - Catalog records ([`Product`]) and the in-memory [`Catalog`]
//! - Intent classification types ([`Intent`], [`IntentKind`], entities)
//! - Conversation-scoped state ([`QueryContext`], [`UserPreferences`])
//! - Engagement counters ([`PopularityStore`] and its in-memory impl)
//! - The shopping cart collaborator ([`Cart`], [`CartItem`])
//! - Error types

pub mod cart;
pub mod catalog;
pub mod context;
pub mod error;
pub mod intent;
pub mod popularity;
pub mod product;

pub use cart::{Cart, CartItem};
pub use catalog::Catalog;
pub use context::{QueryContext, UserPreferences};
pub use error::{CoreError, Result};
pub use intent::{
    Intent, IntentEntities, IntentKind, IntentParameters, PriceRange, SortKey, SortOrder,
};
pub use popularity::{EngagementAction, InMemoryPopularityStore, PopularityStore};
pub use product::Product;
