//! Error types for the embedding domain.

use thiserror::Error;

/// Errors returned while constructing embedding domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmbeddingDomainError {
    /// The vector has no components.
    #[error("embedding vector must not be empty")]
    EmptyVector,

    /// A vector component is NaN or infinite.
    #[error("embedding component at position {position} is not finite")]
    NonFiniteComponent {
        /// Index of the offending component.
        position: usize,
    },
}
