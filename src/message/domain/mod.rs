//! Domain model for chat message records.

mod error;
mod message;

pub use error::MessageDomainError;
pub use message::{ChatMessage, MessageId};
