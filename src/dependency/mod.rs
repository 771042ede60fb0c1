//! Dependency derivation over task records.
//!
//! Edges are inferred deterministically from immutable task fields by a
//! pluggable heuristic, assembled into an acyclic graph, and queried for
//! transitive impact and topological execution order. The module follows
//! hexagonal architecture:
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
