//! Thread-safe in-memory message repository.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::message::{
    domain::{ChatMessage, MessageId},
    ports::{MessageRepository, MessageRepositoryError, MessageRepositoryResult},
};

/// In-memory append-only message store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageRepository {
    state: Arc<RwLock<InMemoryMessageState>>,
}

#[derive(Debug, Default)]
struct InMemoryMessageState {
    messages: Vec<ChatMessage>,
    known_ids: HashSet<MessageId>,
}

impl InMemoryMessageRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> MessageRepositoryError {
    MessageRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: &ChatMessage) -> MessageRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.known_ids.insert(message.id()) {
            return Err(MessageRepositoryError::DuplicateMessage(message.id()));
        }
        state.messages.push(message.clone());
        Ok(())
    }

    async fn list(&self) -> MessageRepositoryResult<Vec<ChatMessage>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.messages.clone())
    }

    async fn reset_all(&self) -> MessageRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        *state = InMemoryMessageState::default();
        Ok(())
    }
}
