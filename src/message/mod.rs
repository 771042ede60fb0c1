//! Originating chat message records.
//!
//! Message ingestion (fetching, authentication) is out of scope; this
//! module only holds the append-only record of messages that tasks were
//! extracted from, so the polling client can show provenance and the global
//! reset can clear it together with everything else. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
