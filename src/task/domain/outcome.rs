//! Execution outcomes recorded against executed tasks.

use serde::{Deserialize, Serialize};

/// Artifact handed back by the code-generation collaborator on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionArtifact {
    result_ref: String,
}

impl ExecutionArtifact {
    /// Wraps an opaque result reference.
    #[must_use]
    pub fn new(result_ref: impl Into<String>) -> Self {
        Self {
            result_ref: result_ref.into(),
        }
    }

    /// Returns the opaque result reference.
    #[must_use]
    pub fn result_ref(&self) -> &str {
        &self.result_ref
    }
}

/// Terminal outcome of a single execution attempt.
///
/// A failed attempt does not roll the task back; the record keeps the
/// failure reason and the task stays executed. Automatic retry is not
/// supported, since re-running generated code can duplicate side effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// The collaborator completed and produced an artifact.
    Succeeded {
        /// Opaque reference to the produced artifact.
        result_ref: String,
    },
    /// The collaborator failed; the task remains executed.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl ExecutionOutcome {
    /// Builds a success outcome from a collaborator artifact.
    #[must_use]
    pub fn from_artifact(artifact: &ExecutionArtifact) -> Self {
        Self::Succeeded {
            result_ref: artifact.result_ref().to_owned(),
        }
    }

    /// Builds a failure outcome with the given reason.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// Reports whether the outcome is a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}
