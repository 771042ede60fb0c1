//! The chat message record tasks are extracted from.

use super::MessageDomainError;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a stored chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random message identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a message identifier from an existing UUID.
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

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat message as captured by the (external) ingestion step.
///
/// Immutable after creation; the store only appends and the global reset is
/// the only way messages disappear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: MessageId,
    author: String,
    text: String,
    posted_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a message record stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyText`] when the text is blank
    /// after trimming.
    pub fn new(
        author: impl Into<String>,
        text: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, MessageDomainError> {
        let body = text.into();
        if body.trim().is_empty() {
            return Err(MessageDomainError::EmptyText);
        }
        Ok(Self {
            id: MessageId::new(),
            author: author.into(),
            text: body,
            posted_at: clock.utc(),
        })
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the chat user the message came from.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the capture timestamp.
    #[must_use]
    pub const fn posted_at(&self) -> DateTime<Utc> {
        self.posted_at
    }
}
