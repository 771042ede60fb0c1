//! Repository port for append-only embedding storage.

use crate::matcher::domain::{ProjectEmbedding, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for embedding repository operations.
pub type EmbeddingRepositoryResult<T> = Result<T, EmbeddingRepositoryError>;

/// Embedding persistence contract.
///
/// The store is append-only: embeddings are never updated or deleted
/// individually. Insertion order is observable and must be preserved by
/// `list`, since query tie-breaking depends on it.
#[async_trait]
pub trait EmbeddingRepository: Send + Sync {
    /// Appends a new embedding.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingRepositoryError::DuplicateProject`] when an
    /// embedding for the project already exists.
    async fn append(&self, embedding: &ProjectEmbedding) -> EmbeddingRepositoryResult<()>;

    /// Returns all embeddings in insertion order.
    async fn list(&self) -> EmbeddingRepositoryResult<Vec<ProjectEmbedding>>;

    /// Clears the store atomically.
    async fn reset_all(&self) -> EmbeddingRepositoryResult<()>;
}

/// Errors returned by embedding repository implementations.
#[derive(Debug, Clone, Error)]
pub enum EmbeddingRepositoryError {
    /// An embedding for the project already exists.
    #[error("duplicate project embedding: {0}")]
    DuplicateProject(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EmbeddingRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
