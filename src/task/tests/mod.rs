//! Unit tests for the task module.
//!
//! Tests are organised by concern: status state machine, aggregate
//! invariants, repository compare-and-set, and the selection and execution
//! services.
