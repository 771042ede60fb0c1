//! Orchestration services for similarity queries.

mod query;

pub use query::{MatcherError, SimilarityMatch, SimilarityMatcher, DEFAULT_MIN_SCORE};
