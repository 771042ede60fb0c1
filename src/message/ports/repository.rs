//! Repository port for append-only message storage.

use crate::message::domain::{ChatMessage, MessageId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for message repository operations.
pub type MessageRepositoryResult<T> = Result<T, MessageRepositoryError>;

/// Message persistence contract.
///
/// Messages are immutable after storage; implementations offer append,
/// ordered listing, and the atomic clear used by the global reset.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Appends a new message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRepositoryError::DuplicateMessage`] when the
    /// message ID already exists.
    async fn append(&self, message: &ChatMessage) -> MessageRepositoryResult<()>;

    /// Returns all messages in capture order.
    async fn list(&self) -> MessageRepositoryResult<Vec<ChatMessage>>;

    /// Clears the store atomically.
    async fn reset_all(&self) -> MessageRepositoryResult<()>;
}

/// Errors returned by message repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MessageRepositoryError {
    /// A message with the same identifier already exists.
    #[error("duplicate message identifier: {0}")]
    DuplicateMessage(MessageId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessageRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
