//! Adapter implementations of the message ports.

mod memory;

pub use memory::InMemoryMessageRepository;
