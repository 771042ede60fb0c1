//! Domain model for project embeddings.

mod embedding;
mod error;

pub use embedding::{ProjectEmbedding, ProjectId, ProjectMetadata};
pub use error::EmbeddingDomainError;
