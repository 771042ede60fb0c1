//! Batch execution orchestrator for selected tasks.

use crate::dependency::domain::DependencyCycleError;
use crate::dependency::ports::EdgeHeuristic;
use crate::dependency::services::DependencyAnalyzer;
use crate::task::{
    domain::{ExecutionOutcome, SelectionStatus, TaskDomainError, TaskId, TaskRecord},
    ports::{CodeExecutor, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// One task's collaborator failure within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    /// Task whose execution attempt failed.
    pub task_id: TaskId,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Aggregate result of one `execute_selected` batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Tasks transitioned to `Executed` this batch, failed attempts
    /// included.
    pub executed: u32,
    /// Tasks skipped because their compare-and-set lost a race (no longer
    /// eligible; neither success nor failure).
    pub skipped: u32,
    /// Collaborator failures, in attempt order.
    pub failures: Vec<TaskFailure>,
}

impl ExecutionSummary {
    /// Reports whether every attempted task succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Service-level errors for batch execution.
///
/// Collaborator failures are not errors at this level; they land in the
/// summary. These variants abort the batch.
#[derive(Debug, Error)]
pub enum ExecutionServiceError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The selected snapshot has a cyclic dependency graph; the batch was
    /// aborted before any task transitioned.
    #[error(transparent)]
    Cycle(#[from] DependencyCycleError),
    /// Domain invariant violation while recording an outcome.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
}

/// Executes selected tasks in dependency order, at most once each.
///
/// The orchestrator is sequential over the topological order. Per task it
/// first wins the `Selected → Executed` compare-and-set, then invokes the
/// collaborator, then records the outcome — so even under concurrent
/// batches a task is handed to the collaborator at most once. A failed
/// collaborator call leaves the task executed with a recorded reason; there
/// is no rollback and no automatic retry, because re-running generated code
/// non-idempotently could duplicate side effects.
pub struct ExecutionService<R, C, H, X>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    H: EdgeHeuristic,
    X: CodeExecutor,
{
    repository: Arc<R>,
    clock: Arc<C>,
    analyzer: DependencyAnalyzer<H>,
    executor: Arc<X>,
}

impl<R, C, H, X> Clone for ExecutionService<R, C, H, X>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    H: EdgeHeuristic,
    X: CodeExecutor,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            analyzer: self.analyzer.clone(),
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<R, C, H, X> ExecutionService<R, C, H, X>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    H: EdgeHeuristic,
    X: CodeExecutor,
{
    /// Creates a new execution service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        clock: Arc<C>,
        analyzer: DependencyAnalyzer<H>,
        executor: Arc<X>,
    ) -> Self {
        Self {
            repository,
            clock,
            analyzer,
            executor,
        }
    }

    /// Executes every currently selected task in topological order.
    ///
    /// Batch semantics are best-effort: one task's failure neither aborts
    /// the batch nor cancels its dependents — they are still attempted in
    /// order. A cycle in the selected snapshot aborts the whole batch with
    /// zero transitions.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionServiceError`] on cyclic snapshots and store
    /// failures. Collaborator failures are reported in the summary instead.
    pub async fn execute_selected(&self) -> Result<ExecutionSummary, ExecutionServiceError> {
        let selected: Vec<TaskRecord> = self
            .repository
            .list()
            .await?
            .into_iter()
            .filter(|task| task.status() == SelectionStatus::Selected)
            .collect();

        let mut summary = ExecutionSummary::default();
        if selected.is_empty() {
            return Ok(summary);
        }

        let graph = self.analyzer.compute_graph(&selected)?;
        let order = graph.topological_order()?;
        let by_id: HashMap<TaskId, TaskRecord> = selected
            .into_iter()
            .map(|task| (task.id(), task))
            .collect();

        for id in order {
            let Some(snapshot) = by_id.get(&id) else {
                continue;
            };
            self.attempt(snapshot.clone(), &mut summary).await?;
        }
        Ok(summary)
    }

    /// Runs one task: win the compare-and-set, call the collaborator,
    /// record the outcome.
    async fn attempt(
        &self,
        mut task: TaskRecord,
        summary: &mut ExecutionSummary,
    ) -> Result<(), ExecutionServiceError> {
        task.transition_to(SelectionStatus::Executed, &*self.clock)?;
        match self
            .repository
            .update(&task, SelectionStatus::Selected)
            .await
        {
            Ok(()) => {}
            Err(
                TaskRepositoryError::ConcurrencyConflict { .. } | TaskRepositoryError::NotFound(_),
            ) => {
                // No longer eligible: executed concurrently or rejected
                // mid-batch. Neither success nor failure.
                summary.skipped += 1;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
        summary.executed += 1;

        let outcome = match self.executor.run(&task).await {
            Ok(artifact) => ExecutionOutcome::from_artifact(&artifact),
            Err(failure) => {
                summary.failures.push(TaskFailure {
                    task_id: task.id(),
                    reason: failure.reason.clone(),
                });
                ExecutionOutcome::failed(failure.reason)
            }
        };
        task.record_outcome(outcome)?;
        self.repository
            .update(&task, SelectionStatus::Executed)
            .await?;
        Ok(())
    }
}
