//! Port contracts for dependency inference.

mod heuristic;

pub use heuristic::EdgeHeuristic;

#[cfg(test)]
pub use heuristic::MockEdgeHeuristic;
