//! The JSON boundary surface consumed by the polling client.
//!
//! The client observes state through periodic polling rather than push
//! notification, so every operation here is safe against stale snapshots:
//! mutations re-validate through the task store's compare-and-set, and the
//! global reset holds the only write-exclusive barrier. A concrete HTTP
//! listener is presentation-layer and out of scope; the request/response
//! types in [`dto`] are the wire shapes it would serve.

pub mod dto;
mod error;
mod service;

pub use error::ApiError;
pub use service::SyncApi;

#[cfg(test)]
mod tests;
