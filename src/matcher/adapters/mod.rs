//! Adapter implementations of the embedding ports.

mod memory;

pub use memory::InMemoryEmbeddingRepository;
