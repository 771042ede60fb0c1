//! Task aggregate root and its lifecycle transitions.

use super::{ExecutionOutcome, SelectionStatus, TaskDomainError, TaskId, TaskPhase};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Input for creating a task record from extraction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Free-text description of the work.
    pub description: String,
    /// Text of the chat message the task was extracted from.
    pub source_text: String,
    /// Chat user the originating message came from, when known.
    pub author: Option<String>,
    /// Phase classification assigned at extraction time.
    pub phase: TaskPhase,
}

impl NewTask {
    /// Creates extraction input with required fields.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        source_text: impl Into<String>,
        phase: TaskPhase,
    ) -> Self {
        Self {
            description: description.into(),
            source_text: source_text.into(),
            author: None,
            phase,
        }
    }

    /// Sets the originating chat user.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Task aggregate root.
///
/// Identity, description, source text, author, and phase are immutable after
/// creation. The selection status is the only mutable lifecycle field and
/// moves exclusively through [`TaskRecord::transition_to`]; each timestamp is
/// stamped exactly once by the transition that owns it. Once a task reaches
/// `Executed`, every further mutation fails with
/// [`TaskDomainError::ImmutableState`] except the one-time outcome record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    id: TaskId,
    description: String,
    source_text: String,
    author: Option<String>,
    phase: TaskPhase,
    status: SelectionStatus,
    created_at: DateTime<Utc>,
    selected_at: Option<DateTime<Utc>>,
    executed_at: Option<DateTime<Utc>>,
    outcome: Option<ExecutionOutcome>,
}

/// Parameter object for reconstructing a persisted task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted description.
    pub description: String,
    /// Persisted originating message text.
    pub source_text: String,
    /// Persisted originating chat user, if any.
    pub author: Option<String>,
    /// Persisted phase classification.
    pub phase: TaskPhase,
    /// Persisted selection status.
    pub status: SelectionStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted selection timestamp, if the task was ever selected.
    pub selected_at: Option<DateTime<Utc>>,
    /// Persisted execution timestamp, if the task was executed.
    pub executed_at: Option<DateTime<Utc>>,
    /// Persisted execution outcome, if one was recorded.
    pub outcome: Option<ExecutionOutcome>,
}

impl TaskRecord {
    /// Creates a pending task from extraction output.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] or
    /// [`TaskDomainError::EmptySourceText`] when the corresponding field is
    /// blank after trimming.
    pub fn new(input: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if input.description.trim().is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }
        if input.source_text.trim().is_empty() {
            return Err(TaskDomainError::EmptySourceText);
        }

        Ok(Self {
            id: TaskId::new(),
            description: input.description,
            source_text: input.source_text,
            author: input.author,
            phase: input.phase,
            status: SelectionStatus::Pending,
            created_at: clock.utc(),
            selected_at: None,
            executed_at: None,
            outcome: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            description: data.description,
            source_text: data.source_text,
            author: data.author,
            phase: data.phase,
            status: data.status,
            created_at: data.created_at,
            selected_at: data.selected_at,
            executed_at: data.executed_at,
            outcome: data.outcome,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the originating message text.
    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Returns the originating chat user, if known.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Returns the phase classification.
    #[must_use]
    pub const fn phase(&self) -> TaskPhase {
        self.phase
    }

    /// Returns the current selection status.
    #[must_use]
    pub const fn status(&self) -> SelectionStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the selection timestamp, if the task was ever selected.
    #[must_use]
    pub const fn selected_at(&self) -> Option<DateTime<Utc>> {
        self.selected_at
    }

    /// Returns the execution timestamp, if the task was executed.
    #[must_use]
    pub const fn executed_at(&self) -> Option<DateTime<Utc>> {
        self.executed_at
    }

    /// Returns the recorded execution outcome, if any.
    #[must_use]
    pub const fn outcome(&self) -> Option<&ExecutionOutcome> {
        self.outcome.as_ref()
    }

    /// Moves the task to `to`, stamping the owning timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ImmutableState`] when the task is already
    /// executed, or [`TaskDomainError::InvalidStatusTransition`] when the
    /// state machine has no `current → to` edge.
    pub fn transition_to(
        &mut self,
        to: SelectionStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.status == SelectionStatus::Executed {
            return Err(TaskDomainError::ImmutableState(self.id));
        }
        if !self.status.can_transition_to(to) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to,
            });
        }

        match to {
            SelectionStatus::Selected => {
                if self.selected_at.is_none() {
                    self.selected_at = Some(clock.utc());
                }
            }
            SelectionStatus::Executed => {
                if self.executed_at.is_none() {
                    self.executed_at = Some(clock.utc());
                }
            }
            SelectionStatus::Pending | SelectionStatus::Rejected => {}
        }
        self.status = to;
        Ok(())
    }

    /// Records the collaborator outcome against an executed task.
    ///
    /// The outcome is written exactly once; the status and timestamps are
    /// untouched either way.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::OutcomeWithoutExecution`] when the task is
    /// not executed, or [`TaskDomainError::OutcomeAlreadyRecorded`] when an
    /// outcome already exists.
    pub fn record_outcome(&mut self, outcome: ExecutionOutcome) -> Result<(), TaskDomainError> {
        if self.status != SelectionStatus::Executed {
            return Err(TaskDomainError::OutcomeWithoutExecution {
                task_id: self.id,
                status: self.status,
            });
        }
        if self.outcome.is_some() {
            return Err(TaskDomainError::OutcomeAlreadyRecorded(self.id));
        }
        self.outcome = Some(outcome);
        Ok(())
    }
}
