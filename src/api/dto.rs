//! Wire shapes served to the polling client.
//!
//! Field names are camelCase because that is what the dashboard client
//! speaks; the `task`/`source`/`user` names mirror the task extraction
//! output it already understands.

use crate::message::domain::{ChatMessage, MessageId};
use crate::task::domain::{ExecutionOutcome, SelectionStatus, TaskId, TaskPhase, TaskRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task as the client sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Free-text description of the work.
    pub task: String,
    /// Text of the originating chat message.
    pub source: String,
    /// Chat user the task was extracted from, when known.
    pub user: Option<String>,
    /// Phase classification.
    pub phase: TaskPhase,
    /// Current selection status.
    pub selection_status: SelectionStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Selection timestamp, when the task was ever selected.
    pub selected_at: Option<DateTime<Utc>>,
    /// Execution timestamp, when the task was executed.
    pub executed_at: Option<DateTime<Utc>>,
    /// Opaque result reference for a successful execution.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result_ref: Option<String>,
    /// Failure reason for an executed-but-failed task.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub failure_reason: Option<String>,
}

impl From<&TaskRecord> for TaskView {
    fn from(record: &TaskRecord) -> Self {
        let (result_ref, failure_reason) = match record.outcome() {
            Some(ExecutionOutcome::Succeeded { result_ref }) => (Some(result_ref.clone()), None),
            Some(ExecutionOutcome::Failed { reason }) => (None, Some(reason.clone())),
            None => (None, None),
        };
        Self {
            id: record.id(),
            task: record.description().to_owned(),
            source: record.source_text().to_owned(),
            user: record.author().map(str::to_owned),
            phase: record.phase(),
            selection_status: record.status(),
            created_at: record.created_at(),
            selected_at: record.selected_at(),
            executed_at: record.executed_at(),
            result_ref,
            failure_reason,
        }
    }
}

/// Request body for a selection change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    /// Requested status: `selected`, `rejected`, `executed`, or `pending`.
    pub status: String,
    /// Proceed with a rejection even when dependents remain selected.
    #[serde(default)]
    pub force: bool,
}

/// Response body for a selection change.
///
/// A blocked rejection answers with `success: false`, the advisory warning,
/// and the impacted tasks; nothing was mutated and the client may retry
/// with `force`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    /// Whether the transition was applied.
    pub success: bool,
    /// The status the task now holds, when the transition was applied.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<SelectionStatus>,
    /// Advisory dependency warning, when the rejection was blocked.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub warning: Option<String>,
    /// Dependents that would be affected, when the rejection was blocked.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub impacted: Vec<TaskView>,
}

/// Response body for the dependency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyCheckResponse {
    /// Selected or executed tasks that transitively depend on the target.
    pub dependencies: Vec<TaskView>,
    /// Advisory warning, present when rejecting would affect dependents.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub warning: Option<String>,
}

/// Response body for the batch execution trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    /// Whether every attempted task succeeded.
    pub success: bool,
    /// Number of tasks transitioned to executed this batch.
    pub executed_tasks: u32,
    /// Per-task collaborator failures, in attempt order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<ExecutionFailureView>,
    /// Batch-level error, present when the batch aborted before running.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// One collaborator failure inside an execution response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionFailureView {
    /// Task whose execution attempt failed.
    pub task_id: TaskId,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Response body for the reset trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    /// Always true when the reset completed.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

/// A stored chat message as the client sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    /// Message identifier.
    pub id: MessageId,
    /// Chat user the message came from.
    pub user: String,
    /// Message text.
    pub text: String,
    /// Capture timestamp.
    pub posted_at: DateTime<Utc>,
}

impl From<&ChatMessage> for MessageView {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id(),
            user: message.author().to_owned(),
            text: message.text().to_owned(),
            posted_at: message.posted_at(),
        }
    }
}

/// Response body for the message listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesResponse {
    /// All stored messages in capture order.
    pub messages: Vec<MessageView>,
}

/// Dashboard statistics over one consistent task snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// All tasks in the store.
    pub total_tasks: u32,
    /// Tasks awaiting a selection decision.
    pub pending_selection: u32,
    /// Tasks approved for execution.
    pub selected_tasks: u32,
    /// Tasks rejected.
    pub rejected_tasks: u32,
    /// Tasks executed.
    pub executed_tasks: u32,
    /// All stored messages.
    pub total_messages: u32,
}
