//! Port for the external code-generation/execution collaborator.

use crate::task::domain::{ExecutionArtifact, TaskRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by the execution collaborator for a single task.
///
/// Collaborator failures are absorbed into the per-task outcome rather than
/// aborting the batch; the orchestrator records the reason and moves on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("execution failed: {reason}")]
pub struct ExecutorFailure {
    /// Human-readable failure reason.
    pub reason: String,
}

impl ExecutorFailure {
    /// Creates a failure with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Contract for the collaborator that turns a task into project changes.
///
/// The collaborator receives the task's description and source text and is
/// otherwise a black box: there is no engine-level timeout and no
/// cancellation. Implementations may run for a long time; the orchestrator
/// calls them one task at a time in dependency order.
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    /// Runs the collaborator for one task.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorFailure`] when the collaborator could not produce
    /// an artifact. The task stays executed either way.
    async fn run(&self, task: &TaskRecord) -> Result<ExecutionArtifact, ExecutorFailure>;
}
