//! Selection status state machine for task records.

use super::ParseSelectionStatusError;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a task within the selection/execution pipeline.
///
/// # State machine
///
/// - `Pending → Selected`
/// - `Pending → Rejected`
/// - `Selected → Rejected`
/// - `Selected → Executed` (orchestrator only)
///
/// `Rejected` and `Executed` are terminal. A rejected task cannot be
/// resurrected; re-approving the work requires creating a new task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    /// Awaiting a selection decision.
    Pending,
    /// Approved for execution.
    Selected,
    /// Declined; terminal.
    Rejected,
    /// Handed to the execution collaborator; terminal.
    Executed,
}

impl SelectionStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Selected => "selected",
            Self::Rejected => "rejected",
            Self::Executed => "executed",
        }
    }

    /// Reports whether the state machine permits `self → to`.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Selected | Self::Rejected)
                | (Self::Selected, Self::Rejected | Self::Executed)
        )
    }

    /// Reports whether this status has no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Executed)
    }
}

impl TryFrom<&str> for SelectionStatus {
    type Error = ParseSelectionStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "selected" => Ok(Self::Selected),
            "rejected" => Ok(Self::Rejected),
            "executed" => Ok(Self::Executed),
            _ => Err(ParseSelectionStatusError(value.to_owned())),
        }
    }
}
