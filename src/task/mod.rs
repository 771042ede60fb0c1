//! Task lifecycle management for Nervi.
//!
//! This module owns the task aggregate extracted from chat messages, the
//! selection status state machine that governs it, the repository port whose
//! compare-and-set update is the engine's only per-task serialization point,
//! and the services that select, reject, and batch-execute tasks. The module
//! follows hexagonal architecture:
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
