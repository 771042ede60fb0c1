//! Cosine-similarity queries over the embedding store.

use crate::matcher::{
    domain::{EmbeddingDomainError, ProjectEmbedding, ProjectId},
    ports::{EmbeddingRepository, EmbeddingRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Default similarity threshold for best-match lookups.
///
/// Matches below this score are treated as "no existing project".
pub const DEFAULT_MIN_SCORE: f32 = 0.2;

/// One scored query result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityMatch {
    /// Matched project.
    pub project_id: ProjectId,
    /// Cosine similarity against the query vector.
    pub score: f32,
}

/// Service-level errors for similarity operations.
#[derive(Debug, Error)]
pub enum MatcherError {
    /// The vector's dimension does not match the index dimension.
    #[error("vector dimension {actual} does not match index dimension {expected}")]
    DimensionMismatch {
        /// Dimension the index was created with.
        expected: usize,
        /// Dimension of the offending vector.
        actual: usize,
    },
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] EmbeddingDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] EmbeddingRepositoryError),
}

/// Nearest-neighbour matcher over a fixed-dimension embedding store.
///
/// Queries are stable: repeated calls with the same vector and store state
/// return the same matches in the same order. Results are sorted by
/// descending cosine similarity with ties broken by insertion order, and
/// are never padded — fewer than `k` matches come back when fewer clear
/// the score threshold.
pub struct SimilarityMatcher<E>
where
    E: EmbeddingRepository,
{
    repository: Arc<E>,
    dimension: usize,
}

impl<E> Clone for SimilarityMatcher<E>
where
    E: EmbeddingRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            dimension: self.dimension,
        }
    }
}

impl<E> SimilarityMatcher<E>
where
    E: EmbeddingRepository,
{
    /// Creates a matcher over vectors of the given dimension.
    #[must_use]
    pub const fn new(repository: Arc<E>, dimension: usize) -> Self {
        Self {
            repository,
            dimension,
        }
    }

    /// Returns the index dimension.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Appends a project embedding to the index.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::DimensionMismatch`] when the embedding's
    /// dimension differs from the index dimension, or a repository error
    /// when the project already has an embedding.
    pub async fn insert(&self, embedding: ProjectEmbedding) -> Result<(), MatcherError> {
        self.check_dimension(embedding.dimension())?;
        self.repository.append(&embedding).await?;
        Ok(())
    }

    /// Returns up to `k` projects scoring at least `min_score` against the
    /// query vector, best first.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::DimensionMismatch`] on a wrong-sized query
    /// vector, a domain error on non-finite components, or a repository
    /// error when the store read fails.
    pub async fn query(
        &self,
        vector: &[f32],
        k: usize,
        min_score: f32,
    ) -> Result<Vec<SimilarityMatch>, MatcherError> {
        self.check_dimension(vector.len())?;
        if let Some(position) = vector.iter().position(|component| !component.is_finite()) {
            return Err(EmbeddingDomainError::NonFiniteComponent { position }.into());
        }

        let mut matches: Vec<SimilarityMatch> = self
            .repository
            .list()
            .await?
            .iter()
            .map(|embedding| SimilarityMatch {
                project_id: embedding.project_id(),
                score: cosine_similarity(vector, embedding.vector()),
            })
            .filter(|candidate| candidate.score >= min_score)
            .collect();

        // Stable sort: equal scores keep their insertion order.
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(k);
        Ok(matches)
    }

    /// Returns the single best match above [`DEFAULT_MIN_SCORE`], if any.
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`SimilarityMatcher::query`].
    pub async fn best_match(&self, vector: &[f32]) -> Result<Option<SimilarityMatch>, MatcherError> {
        let matches = self.query(vector, 1, DEFAULT_MIN_SCORE).await?;
        Ok(matches.into_iter().next())
    }

    fn check_dimension(&self, actual: usize) -> Result<(), MatcherError> {
        if actual != self.dimension {
            return Err(MatcherError::DimensionMismatch {
                expected: self.dimension,
                actual,
            });
        }
        Ok(())
    }
}

/// Cosine similarity of two equal-length vectors.
///
/// A zero-magnitude vector on either side scores 0.0 rather than dividing
/// by zero.
#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity is inherently floating point"
)]
#[must_use]
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let magnitude = norm_a.sqrt() * norm_b.sqrt();
    if magnitude == 0.0 {
        return 0.0;
    }
    dot / magnitude
}
