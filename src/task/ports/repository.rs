//! Repository port for task persistence with optimistic concurrency.

use crate::task::domain::{SelectionStatus, TaskId, TaskRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// The `update` compare-and-set is the engine's only per-task serialization
/// point: two callers racing to transition the same task are resolved by
/// whichever write lands first, and the loser receives
/// [`TaskRepositoryError::ConcurrencyConflict`]. Implementations must never
/// apply a partial update.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn create(&self, task: &TaskRecord) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskRecord>>;

    /// Returns all tasks in creation order.
    async fn list(&self) -> TaskRepositoryResult<Vec<TaskRecord>>;

    /// Replaces the stored record if its status still equals `expected`.
    ///
    /// This is a compare-and-set keyed on the selection status: the caller
    /// re-reads the task, mutates a copy through the domain, and supplies
    /// the status the copy was read with. A mismatch writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist and [`TaskRepositoryError::ConcurrencyConflict`] when the
    /// stored status no longer matches `expected`.
    async fn update(
        &self,
        task: &TaskRecord,
        expected: SelectionStatus,
    ) -> TaskRepositoryResult<()>;

    /// Clears the whole store atomically.
    ///
    /// A concurrent reader observes either the full prior state or an empty
    /// store, never a partial clear.
    async fn reset_all(&self) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The compare-and-set lost a race; re-read and decide whether to retry.
    #[error("concurrent update on task {id}: expected {expected:?}, stored {actual:?}")]
    ConcurrencyConflict {
        /// Task the write targeted.
        id: TaskId,
        /// Status the caller read before mutating.
        expected: SelectionStatus,
        /// Status the store held when the write arrived.
        actual: SelectionStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
