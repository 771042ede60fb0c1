//! Pluggable edge-inference contract.

use crate::dependency::domain::DependencyEdge;
use crate::task::domain::TaskRecord;

/// Infers dependency edges from a task snapshot.
///
/// Implementations must be deterministic functions of immutable task
/// fields (description, source text, phase): two calls over the same
/// snapshot must yield the same edge set, because the graph is recomputed
/// on demand rather than persisted.
#[cfg_attr(test, mockall::automock)]
pub trait EdgeHeuristic: Send + Sync {
    /// Returns the inferred edges for the snapshot.
    fn infer_edges(&self, tasks: &[TaskRecord]) -> Vec<DependencyEdge>;
}
