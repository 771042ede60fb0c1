//! Dependency analysis over task snapshots.

use crate::dependency::adapters::StandardHeuristics;
use crate::dependency::domain::{DependencyCycleError, DependencyGraph};
use crate::dependency::ports::EdgeHeuristic;
use crate::task::domain::{TaskId, TaskRecord};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Derives and queries the dependency graph for a task snapshot.
///
/// The heuristic is pluggable; the analyzer only requires that it is a
/// deterministic function of immutable task fields, so recomputing the
/// graph for the same snapshot always yields the same result.
pub struct DependencyAnalyzer<H>
where
    H: EdgeHeuristic,
{
    heuristic: Arc<H>,
}

impl<H> Clone for DependencyAnalyzer<H>
where
    H: EdgeHeuristic,
{
    fn clone(&self) -> Self {
        Self {
            heuristic: Arc::clone(&self.heuristic),
        }
    }
}

/// Analyzer wired with the standard heuristic stack.
pub type StandardAnalyzer = DependencyAnalyzer<StandardHeuristics>;

impl Default for StandardAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(StandardHeuristics::new()))
    }
}

impl<H> DependencyAnalyzer<H>
where
    H: EdgeHeuristic,
{
    /// Creates an analyzer over the given heuristic.
    #[must_use]
    pub const fn new(heuristic: Arc<H>) -> Self {
        Self { heuristic }
    }

    /// Computes the dependency graph for a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyCycleError`] when the inferred edges contain a
    /// cycle; the caller treats this as fatal for the computation rather
    /// than dropping edges, since dropped edges would void the ordering
    /// guarantee.
    pub fn compute_graph(
        &self,
        tasks: &[TaskRecord],
    ) -> Result<DependencyGraph, DependencyCycleError> {
        let nodes = tasks.iter().map(TaskRecord::id).collect();
        let edges = self.heuristic.infer_edges(tasks);
        let graph = DependencyGraph::build(nodes, edges);
        graph.topological_order()?;
        Ok(graph)
    }

    /// Returns every task transitively depending on `id` in `graph`.
    #[must_use]
    pub fn impacted_by(&self, id: TaskId, graph: &DependencyGraph) -> BTreeSet<TaskId> {
        graph.impacted_by(id)
    }
}
