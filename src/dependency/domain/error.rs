//! Error types for the dependency domain.

use crate::task::domain::TaskId;
use thiserror::Error;

/// Errors returned while constructing dependency domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DependencyDomainError {
    /// An edge would make a task depend on itself.
    #[error("task {0} cannot depend on itself")]
    SelfLoop(TaskId),
}

/// The dependency graph contains a cycle.
///
/// Fatal for the computation it occurred in: no topological order is
/// partially applied and no tasks are transitioned. `members` names the
/// tasks on the cycle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("dependency cycle involving tasks: {}", format_members(members))]
pub struct DependencyCycleError {
    /// Tasks participating in a cycle, in snapshot order.
    pub members: Vec<TaskId>,
}

fn format_members(members: &[TaskId]) -> String {
    members
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
