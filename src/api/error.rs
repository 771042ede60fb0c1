//! Boundary error taxonomy with HTTP-style status codes.

use crate::task::domain::{TaskDomainError, TaskId};
use crate::task::ports::TaskRepositoryError;
use crate::task::services::{ExecutionServiceError, SelectionError};
use thiserror::Error;

/// Errors surfaced to the polling client.
///
/// Every variant maps to one status code via [`ApiError::status_code`];
/// partial silent state corruption is never an outcome — an error response
/// means nothing was applied beyond what the body says.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body or parameter.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No task exists with the given identifier.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// The requested transition is not a legal state machine edge.
    #[error("illegal transition: {0}")]
    IllegalTransition(String),

    /// The target task is executed and can never change.
    #[error("task {0} is executed and immutable")]
    ImmutableState(TaskId),

    /// A compare-and-set lost a race; the client should re-fetch and retry.
    #[error("concurrent update conflict: {0}")]
    Conflict(String),

    /// Underlying persistence failure.
    #[error("storage failure: {0}")]
    Storage(String),

    /// Data-integrity fault in the dependency graph.
    #[error("dependency integrity fault: {0}")]
    Integrity(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::UnknownTask(_) => 404,
            Self::IllegalTransition(_) | Self::ImmutableState(_) | Self::Conflict(_) => 409,
            Self::Storage(_) | Self::Integrity(_) => 500,
        }
    }
}

impl From<SelectionError> for ApiError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::UnknownTask(id) => Self::UnknownTask(id),
            SelectionError::Domain(domain) => domain.into(),
            SelectionError::Repository(repo) => repo.into(),
            SelectionError::Cycle(cycle) => Self::Integrity(cycle.to_string()),
        }
    }
}

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::ImmutableState(id) => Self::ImmutableState(id),
            TaskDomainError::InvalidStatusTransition { .. } => {
                Self::IllegalTransition(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}

impl From<TaskRepositoryError> for ApiError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::ConcurrencyConflict { .. } => Self::Conflict(err.to_string()),
            TaskRepositoryError::NotFound(id) => Self::UnknownTask(id),
            _ => Self::Storage(err.to_string()),
        }
    }
}

impl From<ExecutionServiceError> for ApiError {
    fn from(err: ExecutionServiceError) -> Self {
        match err {
            ExecutionServiceError::Repository(repo) => repo.into(),
            ExecutionServiceError::Cycle(cycle) => Self::Integrity(cycle.to_string()),
            ExecutionServiceError::Domain(domain) => domain.into(),
        }
    }
}
