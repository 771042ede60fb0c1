//! Error types for the message domain.

use thiserror::Error;

/// Errors returned while constructing message records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageDomainError {
    /// The message text is empty after trimming.
    #[error("message text must not be empty")]
    EmptyText,
}
