//! Adapter implementations of the dependency ports.

mod heuristics;

pub use heuristics::{PhaseOrderHeuristic, StandardHeuristics, TextualReferenceHeuristic};
