//! Project embedding records.

use super::EmbeddingDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a project known to the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Creates a new random project identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a project identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Descriptive metadata stored alongside an embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Human-readable project name.
    pub name: String,
    /// Short description of the project.
    pub description: String,
}

impl ProjectMetadata {
    /// Creates metadata with the given name and description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Fixed-dimension embedding of a project description.
///
/// Immutable once stored; the matcher only ever appends embeddings, never
/// updates or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEmbedding {
    project_id: ProjectId,
    vector: Vec<f32>,
    metadata: ProjectMetadata,
}

impl ProjectEmbedding {
    /// Creates a validated embedding.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingDomainError::EmptyVector`] when the vector has no
    /// components, or [`EmbeddingDomainError::NonFiniteComponent`] when any
    /// component is NaN or infinite.
    pub fn new(
        project_id: ProjectId,
        vector: Vec<f32>,
        metadata: ProjectMetadata,
    ) -> Result<Self, EmbeddingDomainError> {
        if vector.is_empty() {
            return Err(EmbeddingDomainError::EmptyVector);
        }
        if let Some(position) = vector.iter().position(|component| !component.is_finite()) {
            return Err(EmbeddingDomainError::NonFiniteComponent { position });
        }
        Ok(Self {
            project_id,
            vector,
            metadata,
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the embedding vector.
    #[must_use]
    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    /// Returns the vector dimension.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    /// Returns the descriptive metadata.
    #[must_use]
    pub const fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }
}
