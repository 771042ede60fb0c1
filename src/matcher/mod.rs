//! Nearest-neighbour matching over project embeddings.
//!
//! Embeddings are computed elsewhere; this module stores them append-only
//! and answers cosine-similarity queries with a stable, never-padded
//! ordering. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
