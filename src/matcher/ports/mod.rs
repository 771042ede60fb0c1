//! Port contracts for embedding persistence.

mod repository;

pub use repository::{EmbeddingRepository, EmbeddingRepositoryError, EmbeddingRepositoryResult};
