//! Orchestration services for dependency analysis.

mod analyzer;

pub use analyzer::{DependencyAnalyzer, StandardAnalyzer};
