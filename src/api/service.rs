//! Stateless facade between the polling client and the engine.

use crate::api::dto::{
    DependencyCheckResponse, ExecuteResponse, ExecutionFailureView, MessageView, MessagesResponse,
    ResetResponse, SelectionRequest, SelectionResponse, StatsResponse, TaskView,
};
use crate::api::ApiError;
use crate::dependency::ports::EdgeHeuristic;
use crate::dependency::services::DependencyAnalyzer;
use crate::matcher::ports::EmbeddingRepository;
use crate::message::ports::MessageRepository;
use crate::task::domain::{SelectionStatus, TaskId};
use crate::task::ports::{CodeExecutor, TaskRepository};
use crate::task::services::{ExecutionService, ExecutionServiceError, SelectionChange, SelectionService};
use mockable::Clock;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Serves the polling client over the task, message, and embedding stores.
///
/// The facade is stateless apart from the **reset gate**: every operation
/// holds its read half, and [`SyncApi::reset`] holds the write half while
/// clearing tasks, messages, and embeddings together — a concurrent poller
/// observes either the full pre-reset state or the full post-reset state,
/// never a window where one store is cleared and the others are not.
pub struct SyncApi<R, C, H, X, M, E>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    H: EdgeHeuristic,
    X: CodeExecutor,
    M: MessageRepository,
    E: EmbeddingRepository,
{
    tasks: Arc<R>,
    messages: Arc<M>,
    embeddings: Arc<E>,
    selection: SelectionService<R, C, H>,
    execution: ExecutionService<R, C, H, X>,
    reset_gate: Arc<RwLock<()>>,
}

impl<R, C, H, X, M, E> Clone for SyncApi<R, C, H, X, M, E>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    H: EdgeHeuristic,
    X: CodeExecutor,
    M: MessageRepository,
    E: EmbeddingRepository,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            messages: Arc::clone(&self.messages),
            embeddings: Arc::clone(&self.embeddings),
            selection: self.selection.clone(),
            execution: self.execution.clone(),
            reset_gate: Arc::clone(&self.reset_gate),
        }
    }
}

impl<R, C, H, X, M, E> SyncApi<R, C, H, X, M, E>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    H: EdgeHeuristic,
    X: CodeExecutor,
    M: MessageRepository,
    E: EmbeddingRepository,
{
    /// Wires the facade over shared stores and collaborators.
    #[must_use]
    pub fn new(
        tasks: Arc<R>,
        messages: Arc<M>,
        embeddings: Arc<E>,
        clock: Arc<C>,
        analyzer: DependencyAnalyzer<H>,
        executor: Arc<X>,
    ) -> Self {
        let selection =
            SelectionService::new(Arc::clone(&tasks), Arc::clone(&clock), analyzer.clone());
        let execution = ExecutionService::new(
            Arc::clone(&tasks),
            clock,
            analyzer,
            executor,
        );
        Self {
            tasks,
            messages,
            embeddings,
            selection,
            execution,
            reset_gate: Arc::new(RwLock::new(())),
        }
    }

    /// `GET /tasks` — all tasks in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] when the store read fails.
    pub async fn list_tasks(&self) -> Result<Vec<TaskView>, ApiError> {
        let _gate = self.reset_gate.read().await;
        let tasks = self.tasks.list().await?;
        Ok(tasks.iter().map(TaskView::from).collect())
    }

    /// `POST /tasks {action:"reset"}` — clears every store atomically.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] when any store fails to clear; the
    /// write gate is held for the whole operation either way.
    pub async fn reset(&self) -> Result<ResetResponse, ApiError> {
        let _gate = self.reset_gate.write().await;
        self.tasks.reset_all().await?;
        self.messages
            .reset_all()
            .await
            .map_err(|err| ApiError::Storage(err.to_string()))?;
        self.embeddings
            .reset_all()
            .await
            .map_err(|err| ApiError::Storage(err.to_string()))?;
        Ok(ResetResponse {
            success: true,
            message: "Tasks, messages, and project resources reset".to_owned(),
        })
    }

    /// `GET /tasks/{id}/dependencies` — dry-run rejection impact.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownTask`] for an unknown id, or the mapped
    /// selection error otherwise.
    pub async fn task_dependencies(
        &self,
        id: TaskId,
    ) -> Result<DependencyCheckResponse, ApiError> {
        let _gate = self.reset_gate.read().await;
        let impacted = self.selection.dependents_at_risk(id).await?;
        let warning = if impacted.is_empty() {
            None
        } else {
            Some(format!(
                "Rejecting this task may affect {} other tasks",
                impacted.len()
            ))
        };
        Ok(DependencyCheckResponse {
            dependencies: impacted.iter().map(TaskView::from).collect(),
            warning,
        })
    }

    /// `POST /tasks/{id}/select` — requests a status change.
    ///
    /// A blocked rejection answers 200 with the dependency-warning body;
    /// retry with `force: true` to proceed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for an unparseable status,
    /// [`ApiError::UnknownTask`] for an unknown id, and the 409-class
    /// errors for illegal transitions, immutable tasks, and lost races.
    pub async fn change_selection(
        &self,
        id: TaskId,
        request: SelectionRequest,
    ) -> Result<SelectionResponse, ApiError> {
        let _gate = self.reset_gate.read().await;
        let requested = SelectionStatus::try_from(request.status.as_str())
            .map_err(|err| ApiError::Validation(err.to_string()))?;

        match self
            .selection
            .change_status(id, requested, request.force)
            .await?
        {
            SelectionChange::Applied(task) => Ok(SelectionResponse {
                success: true,
                status: Some(task.status()),
                warning: None,
                impacted: Vec::new(),
            }),
            SelectionChange::Blocked { impacted } => Ok(SelectionResponse {
                success: false,
                status: None,
                warning: Some(format!(
                    "Rejecting this task may affect {} other tasks",
                    impacted.len()
                )),
                impacted: impacted.iter().map(TaskView::from).collect(),
            }),
        }
    }

    /// `POST /execute-selected` — runs every selected task in order.
    ///
    /// Collaborator failures and cyclic snapshots answer 200 with
    /// `success: false`; only store failures become error responses.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] (or another mapped service error) when
    /// the batch could not run against the store at all.
    pub async fn execute_selected(&self) -> Result<ExecuteResponse, ApiError> {
        let _gate = self.reset_gate.read().await;
        match self.execution.execute_selected().await {
            Ok(summary) => Ok(ExecuteResponse {
                success: summary.is_success(),
                executed_tasks: summary.executed,
                failures: summary
                    .failures
                    .iter()
                    .map(|failure| ExecutionFailureView {
                        task_id: failure.task_id,
                        reason: failure.reason.clone(),
                    })
                    .collect(),
                error: None,
            }),
            Err(ExecutionServiceError::Cycle(cycle)) => Ok(ExecuteResponse {
                success: false,
                executed_tasks: 0,
                failures: Vec::new(),
                error: Some(cycle.to_string()),
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// `GET /messages` — all stored messages in capture order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] when the store read fails.
    pub async fn list_messages(&self) -> Result<MessagesResponse, ApiError> {
        let _gate = self.reset_gate.read().await;
        let messages = self
            .messages
            .list()
            .await
            .map_err(|err| ApiError::Storage(err.to_string()))?;
        Ok(MessagesResponse {
            messages: messages.iter().map(MessageView::from).collect(),
        })
    }

    /// `GET /stats` — dashboard counters over one consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] when a store read fails.
    pub async fn stats(&self) -> Result<StatsResponse, ApiError> {
        let _gate = self.reset_gate.read().await;
        let tasks = self.tasks.list().await?;
        let messages = self
            .messages
            .list()
            .await
            .map_err(|err| ApiError::Storage(err.to_string()))?;

        let count_status = |status: SelectionStatus| {
            clamped(
                tasks
                    .iter()
                    .filter(|task| task.status() == status)
                    .count(),
            )
        };
        Ok(StatsResponse {
            total_tasks: clamped(tasks.len()),
            pending_selection: count_status(SelectionStatus::Pending),
            selected_tasks: count_status(SelectionStatus::Selected),
            rejected_tasks: count_status(SelectionStatus::Rejected),
            executed_tasks: count_status(SelectionStatus::Executed),
            total_messages: clamped(messages.len()),
        })
    }
}

/// Saturating conversion for counter fields.
fn clamped(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
