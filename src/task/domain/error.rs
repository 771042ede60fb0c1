//! Error types for task domain validation and transitions.

use super::{SelectionStatus, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The originating message text is empty after trimming.
    #[error("task source text must not be empty")]
    EmptySourceText,

    /// The requested status change is not a legal state machine edge.
    #[error("illegal transition for task {task_id}: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        /// Task the transition was attempted on.
        task_id: TaskId,
        /// Status the task currently holds.
        from: SelectionStatus,
        /// Status the caller asked for.
        to: SelectionStatus,
    },

    /// The task has been executed; its record can never change again.
    #[error("task {0} is executed and immutable")]
    ImmutableState(TaskId),

    /// An execution outcome was already recorded for the task.
    #[error("task {0} already has an execution outcome")]
    OutcomeAlreadyRecorded(TaskId),

    /// An outcome was offered for a task that never reached `Executed`.
    #[error("task {task_id} is {status:?}, not executed; cannot record outcome")]
    OutcomeWithoutExecution {
        /// Task the outcome was offered for.
        task_id: TaskId,
        /// Status the task currently holds.
        status: SelectionStatus,
    },
}

/// Error returned while parsing selection statuses from persistence or wire
/// input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown selection status: {0}")]
pub struct ParseSelectionStatusError(pub String);

/// Error returned while parsing task phases from persistence or wire input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task phase: {0}")]
pub struct ParseTaskPhaseError(pub String);
