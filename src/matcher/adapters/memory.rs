//! Thread-safe in-memory embedding repository.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::matcher::{
    domain::{ProjectEmbedding, ProjectId},
    ports::{EmbeddingRepository, EmbeddingRepositoryError, EmbeddingRepositoryResult},
};

/// In-memory append-only embedding store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmbeddingRepository {
    state: Arc<RwLock<InMemoryEmbeddingState>>,
}

#[derive(Debug, Default)]
struct InMemoryEmbeddingState {
    embeddings: Vec<ProjectEmbedding>,
    known_projects: HashSet<ProjectId>,
}

impl InMemoryEmbeddingRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> EmbeddingRepositoryError {
    EmbeddingRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl EmbeddingRepository for InMemoryEmbeddingRepository {
    async fn append(&self, embedding: &ProjectEmbedding) -> EmbeddingRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.known_projects.insert(embedding.project_id()) {
            return Err(EmbeddingRepositoryError::DuplicateProject(
                embedding.project_id(),
            ));
        }
        state.embeddings.push(embedding.clone());
        Ok(())
    }

    async fn list(&self) -> EmbeddingRepositoryResult<Vec<ProjectEmbedding>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.embeddings.clone())
    }

    async fn reset_all(&self) -> EmbeddingRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        *state = InMemoryEmbeddingState::default();
        Ok(())
    }
}
