//! Directed dependency edges between tasks.

use super::DependencyDomainError;
use crate::task::domain::TaskId;
use serde::{Deserialize, Serialize};

/// A directed edge meaning `to` depends on `from`.
///
/// `from` must exist and execute before `to`. Self-loops are rejected at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyEdge {
    from: TaskId,
    to: TaskId,
}

impl DependencyEdge {
    /// Creates an edge `from → to`.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyDomainError::SelfLoop`] when both endpoints are
    /// the same task.
    pub fn new(from: TaskId, to: TaskId) -> Result<Self, DependencyDomainError> {
        if from == to {
            return Err(DependencyDomainError::SelfLoop(from));
        }
        Ok(Self { from, to })
    }

    /// Returns the prerequisite task.
    #[must_use]
    pub const fn from(&self) -> TaskId {
        self.from
    }

    /// Returns the dependent task.
    #[must_use]
    pub const fn to(&self) -> TaskId {
        self.to
    }
}
