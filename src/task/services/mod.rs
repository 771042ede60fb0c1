//! Orchestration services for task selection and execution.

mod execution;
mod selection;

pub use execution::{ExecutionService, ExecutionServiceError, ExecutionSummary, TaskFailure};
pub use selection::{SelectionChange, SelectionError, SelectionService};
