//! Selection state machine service with dependency-safety guards.

use crate::dependency::domain::DependencyCycleError;
use crate::dependency::ports::EdgeHeuristic;
use crate::dependency::services::DependencyAnalyzer;
use crate::task::{
    domain::{SelectionStatus, TaskDomainError, TaskId, TaskRecord},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for selection operations.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// No task exists with the given identifier.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),
    /// Domain state machine rejected the change.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The dependency graph for the current snapshot is cyclic.
    #[error(transparent)]
    Cycle(#[from] DependencyCycleError),
}

/// Result of a requested status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// The transition was applied; the updated record is returned.
    Applied(TaskRecord),
    /// A non-forced rejection was blocked by selected or executed
    /// dependents. Nothing was mutated; retry with `force` to proceed.
    Blocked {
        /// Dependents that would be affected, in creation order.
        impacted: Vec<TaskRecord>,
    },
}

/// Governs legal selection transitions over the task store.
///
/// Every write goes through the repository compare-and-set keyed on the
/// status the task was read with, so a caller holding a stale snapshot
/// loses cleanly with a conflict instead of overwriting newer state.
pub struct SelectionService<R, C, H>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    H: EdgeHeuristic,
{
    repository: Arc<R>,
    clock: Arc<C>,
    analyzer: DependencyAnalyzer<H>,
}

impl<R, C, H> Clone for SelectionService<R, C, H>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    H: EdgeHeuristic,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            analyzer: self.analyzer.clone(),
        }
    }
}

impl<R, C, H> SelectionService<R, C, H>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    H: EdgeHeuristic,
{
    /// Creates a new selection service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        clock: Arc<C>,
        analyzer: DependencyAnalyzer<H>,
    ) -> Self {
        Self {
            repository,
            clock,
            analyzer,
        }
    }

    /// Applies a requested status change, routing through the state machine.
    ///
    /// `Selected` requests select the task; `Rejected` requests run the
    /// dependency-safety check (see [`SelectionService::reject`]). Requests
    /// for `Pending` or `Executed` are always illegal here: nothing
    /// re-enters `Pending`, and only the orchestrator may execute.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] for unknown tasks, illegal transitions,
    /// lost compare-and-set races, and cyclic snapshots.
    pub async fn change_status(
        &self,
        id: TaskId,
        requested: SelectionStatus,
        force: bool,
    ) -> Result<SelectionChange, SelectionError> {
        match requested {
            SelectionStatus::Selected => self.select(id).await.map(SelectionChange::Applied),
            SelectionStatus::Rejected => self.reject(id, force).await,
            SelectionStatus::Pending | SelectionStatus::Executed => {
                let task = self.fetch(id).await?;
                if task.status() == SelectionStatus::Executed {
                    return Err(TaskDomainError::ImmutableState(id).into());
                }
                Err(TaskDomainError::InvalidStatusTransition {
                    task_id: id,
                    from: task.status(),
                    to: requested,
                }
                .into())
            }
        }
    }

    /// Selects a pending task, stamping its selection timestamp.
    ///
    /// Rejection is terminal: a rejected task cannot be re-selected, and an
    /// executed task cannot change at all.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the task is unknown, the transition
    /// is illegal, or the compare-and-set loses a race.
    pub async fn select(&self, id: TaskId) -> Result<TaskRecord, SelectionError> {
        let mut task = self.fetch(id).await?;
        let prior = task.status();
        task.transition_to(SelectionStatus::Selected, &*self.clock)?;
        self.repository.update(&task, prior).await?;
        Ok(task)
    }

    /// Rejects a task, guarding against orphaning its dependents.
    ///
    /// Transitive dependents currently selected or executed block a
    /// non-forced rejection: the call returns
    /// [`SelectionChange::Blocked`] with the impacted tasks and mutates
    /// nothing. With `force`, the rejection proceeds unconditionally — the
    /// warning is advisory, keeping the human in control. An executed
    /// target is immutable regardless of `force`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the task is unknown or executed, the
    /// transition is illegal, the snapshot is cyclic, or the
    /// compare-and-set loses a race.
    pub async fn reject(&self, id: TaskId, force: bool) -> Result<SelectionChange, SelectionError> {
        let snapshot = self.repository.list().await?;
        let mut task = snapshot
            .iter()
            .find(|candidate| candidate.id() == id)
            .cloned()
            .ok_or(SelectionError::UnknownTask(id))?;

        if task.status() == SelectionStatus::Executed {
            return Err(TaskDomainError::ImmutableState(id).into());
        }

        if !force {
            let impacted = self.impacted_dependents(id, &snapshot)?;
            if !impacted.is_empty() {
                return Ok(SelectionChange::Blocked { impacted });
            }
        }

        let prior = task.status();
        task.transition_to(SelectionStatus::Rejected, &*self.clock)?;
        self.repository.update(&task, prior).await?;
        Ok(SelectionChange::Applied(task))
    }

    /// Returns the selected or executed tasks transitively depending on
    /// `id`, in creation order.
    ///
    /// This is the dry-run half of [`SelectionService::reject`], exposed
    /// for the dependency-check endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the task is unknown, the snapshot is
    /// cyclic, or the store read fails.
    pub async fn dependents_at_risk(&self, id: TaskId) -> Result<Vec<TaskRecord>, SelectionError> {
        let snapshot = self.repository.list().await?;
        if !snapshot.iter().any(|candidate| candidate.id() == id) {
            return Err(SelectionError::UnknownTask(id));
        }
        self.impacted_dependents(id, &snapshot)
    }

    fn impacted_dependents(
        &self,
        id: TaskId,
        snapshot: &[TaskRecord],
    ) -> Result<Vec<TaskRecord>, SelectionError> {
        let graph = self.analyzer.compute_graph(snapshot)?;
        let impacted = self.analyzer.impacted_by(id, &graph);
        Ok(snapshot
            .iter()
            .filter(|candidate| {
                impacted.contains(&candidate.id())
                    && matches!(
                        candidate.status(),
                        SelectionStatus::Selected | SelectionStatus::Executed
                    )
            })
            .cloned()
            .collect())
    }

    async fn fetch(&self, id: TaskId) -> Result<TaskRecord, SelectionError> {
        self.repository
            .get(id)
            .await?
            .ok_or(SelectionError::UnknownTask(id))
    }
}
