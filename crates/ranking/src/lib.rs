//! Product ranking, seasonality, and similarity scoring

pub mod ranker;
pub mod seasonal;
pub mod similar;
pub mod weights;

pub use ranker::ProductRanker;
pub use seasonal::Season;
pub use similar::{SimilarProductFinder, SimilarityCriteria, SimilarityScore};
pub use weights::{RankingOptions, RankingWeights};
