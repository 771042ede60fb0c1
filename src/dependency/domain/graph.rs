//! Dependency graph with impact and ordering queries.
//!
//! The graph keeps forward and reverse adjacency in sync:
//! - forward: prerequisite → its dependents
//! - reverse: dependent → its prerequisites

use super::{DependencyCycleError, DependencyEdge};
use crate::task::domain::TaskId;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Directed acyclicity-checked dependency graph over a task snapshot.
///
/// Nodes keep the snapshot order they were supplied in; every query that
/// returns multiple tasks is deterministic with ties broken by that order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<TaskId>,
    node_index: HashMap<TaskId, usize>,
    dependents: HashMap<TaskId, BTreeSet<TaskId>>,
    prerequisites: HashMap<TaskId, BTreeSet<TaskId>>,
    edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    /// Builds a graph from a task snapshot and inferred edges.
    ///
    /// Edges whose endpoints are outside the snapshot are dropped: the graph
    /// only ever speaks about the tasks it was computed for. Duplicate edges
    /// collapse into one.
    #[must_use]
    pub fn build(nodes: Vec<TaskId>, edges: impl IntoIterator<Item = DependencyEdge>) -> Self {
        let node_index: HashMap<TaskId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();

        let mut graph = Self {
            nodes,
            node_index,
            dependents: HashMap::new(),
            prerequisites: HashMap::new(),
            edges: Vec::new(),
        };

        let mut seen = HashSet::new();
        for edge in edges {
            let in_snapshot = graph.node_index.contains_key(&edge.from())
                && graph.node_index.contains_key(&edge.to());
            if !in_snapshot || !seen.insert(edge) {
                continue;
            }
            graph
                .dependents
                .entry(edge.from())
                .or_default()
                .insert(edge.to());
            graph
                .prerequisites
                .entry(edge.to())
                .or_default()
                .insert(edge.from());
            graph.edges.push(edge);
        }
        graph
    }

    /// Returns the snapshot task ids in their original order.
    #[must_use]
    pub fn nodes(&self) -> &[TaskId] {
        &self.nodes
    }

    /// Returns the retained edges.
    #[must_use]
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Returns the tasks that directly depend on `id`.
    #[must_use]
    pub fn dependents_of(&self, id: TaskId) -> BTreeSet<TaskId> {
        self.dependents.get(&id).cloned().unwrap_or_default()
    }

    /// Returns the tasks `id` directly depends on.
    #[must_use]
    pub fn prerequisites_of(&self, id: TaskId) -> BTreeSet<TaskId> {
        self.prerequisites.get(&id).cloned().unwrap_or_default()
    }

    /// Returns every task that transitively depends on `id`.
    ///
    /// Breadth-first walk over the dependents adjacency; `id` itself is
    /// never part of the result.
    #[must_use]
    pub fn impacted_by(&self, id: TaskId) -> BTreeSet<TaskId> {
        let mut impacted = BTreeSet::new();
        let mut queue: VecDeque<TaskId> = VecDeque::new();
        queue.push_back(id);
        while let Some(current) = queue.pop_front() {
            if let Some(direct) = self.dependents.get(&current) {
                for dependent in direct {
                    if *dependent != id && impacted.insert(*dependent) {
                        queue.push_back(*dependent);
                    }
                }
            }
        }
        impacted
    }

    /// Produces a topological order over the snapshot (Kahn's algorithm).
    ///
    /// Ties are broken by snapshot order, so the ordering is stable across
    /// repeated calls on the same graph.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyCycleError`] naming the tasks on a cycle; no
    /// partial order is returned.
    pub fn topological_order(&self) -> Result<Vec<TaskId>, DependencyCycleError> {
        let mut in_degree: HashMap<TaskId, usize> = self
            .nodes
            .iter()
            .map(|id| (*id, self.prerequisites.get(id).map_or(0, BTreeSet::len)))
            .collect();

        // Ready set keyed by snapshot index for a deterministic pop order.
        let mut ready: BTreeSet<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, id)| in_degree.get(*id) == Some(&0))
            .map(|(index, _)| index)
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(index) = ready.pop_first() {
            let Some(id) = self.nodes.get(index).copied() else {
                continue;
            };
            order.push(id);
            if let Some(direct) = self.dependents.get(&id) {
                for dependent in direct {
                    if let Some(degree) = in_degree.get_mut(dependent) {
                        *degree = degree.saturating_sub(1);
                        if *degree == 0 {
                            if let Some(dependent_index) = self.node_index.get(dependent) {
                                ready.insert(*dependent_index);
                            }
                        }
                    }
                }
            }
        }

        if order.len() == self.nodes.len() {
            Ok(order)
        } else {
            Err(DependencyCycleError {
                members: self.cycle_members(&in_degree),
            })
        }
    }

    /// Narrows the Kahn remainder down to tasks actually on a cycle.
    ///
    /// Nodes left with nonzero in-degree include everything downstream of a
    /// cycle; pruning nodes without outgoing edges inside the remainder
    /// leaves exactly the cycle participants.
    fn cycle_members(&self, in_degree: &HashMap<TaskId, usize>) -> Vec<TaskId> {
        let mut remainder: HashSet<TaskId> = in_degree
            .iter()
            .filter(|(_, degree)| **degree > 0)
            .map(|(id, _)| *id)
            .collect();

        loop {
            let dead_ends: Vec<TaskId> = remainder
                .iter()
                .filter(|id| {
                    self.dependents.get(*id).is_none_or(|direct| {
                        direct.iter().all(|dependent| !remainder.contains(dependent))
                    })
                })
                .copied()
                .collect();
            if dead_ends.is_empty() {
                break;
            }
            for id in dead_ends {
                remainder.remove(&id);
            }
        }

        self.nodes
            .iter()
            .filter(|id| remainder.contains(*id))
            .copied()
            .collect()
    }
}
