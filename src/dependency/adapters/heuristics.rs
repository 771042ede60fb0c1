//! Deterministic edge-inference heuristics.

use crate::dependency::domain::DependencyEdge;
use crate::dependency::ports::EdgeHeuristic;
use crate::task::domain::{TaskId, TaskRecord};
use std::collections::HashMap;

/// Imperative lead-in words stripped before extracting a task's subject.
const LEAD_INS: &[&str] = &[
    "add", "create", "set", "setup", "implement", "build", "install", "write", "test", "make",
    "update", "configure", "fix", "a", "an", "the", "up", "some", "new",
];

/// Minimum word count for a subject to participate in matching.
const MIN_SUBJECT_WORDS: usize = 2;

/// Minimum character count for a short subject to participate in matching.
const MIN_SUBJECT_CHARS: usize = 8;

/// Phase-ordering heuristic.
///
/// Two tasks extracted from the same chat message are ordered by phase:
/// the later-phase task depends on the earlier-phase one (testing work from
/// a message depends on that message's feature work, and so on).
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseOrderHeuristic;

impl EdgeHeuristic for PhaseOrderHeuristic {
    fn infer_edges(&self, tasks: &[TaskRecord]) -> Vec<DependencyEdge> {
        let mut edges = Vec::new();
        for from in tasks {
            for to in tasks {
                let same_source = from.source_text() == to.source_text();
                if same_source && from.phase().rank() < to.phase().rank() {
                    if let Ok(edge) = DependencyEdge::new(from.id(), to.id()) {
                        edges.push(edge);
                    }
                }
            }
        }
        edges
    }
}

/// Textual-reference heuristic.
///
/// A task that mentions another task's subject depends on it. The subject
/// of a description is what remains after stripping imperative lead-ins;
/// subjects too short to be distinctive are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextualReferenceHeuristic;

impl EdgeHeuristic for TextualReferenceHeuristic {
    fn infer_edges(&self, tasks: &[TaskRecord]) -> Vec<DependencyEdge> {
        let subjects: Vec<Option<String>> = tasks
            .iter()
            .map(|task| subject_of(task.description()))
            .collect();
        let normalized: Vec<String> = tasks
            .iter()
            .map(|task| padded_words(task.description()))
            .collect();

        let mut edges = Vec::new();
        for (from_index, from) in tasks.iter().enumerate() {
            let Some(Some(subject)) = subjects.get(from_index) else {
                continue;
            };
            let needle = format!(" {subject} ");
            for (to_index, to) in tasks.iter().enumerate() {
                if from_index == to_index {
                    continue;
                }
                let references = normalized
                    .get(to_index)
                    .is_some_and(|haystack| haystack.contains(&needle));
                if references {
                    if let Ok(edge) = DependencyEdge::new(from.id(), to.id()) {
                        edges.push(edge);
                    }
                }
            }
        }
        edges
    }
}

/// Union of the phase-ordering and textual-reference heuristics.
///
/// Two tasks about the same subject reference each other textually, which
/// would manufacture a two-task cycle out of ordinary feature/test pairs.
/// The union therefore resolves mutual edges to a single direction: the
/// earlier phase wins, and between equal phases the earlier snapshot
/// position wins. Genuine cycles through longer chains are untouched and
/// still surface as errors downstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardHeuristics {
    phase: PhaseOrderHeuristic,
    textual: TextualReferenceHeuristic,
}

impl StandardHeuristics {
    /// Creates the standard heuristic stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: PhaseOrderHeuristic,
            textual: TextualReferenceHeuristic,
        }
    }
}

impl EdgeHeuristic for StandardHeuristics {
    fn infer_edges(&self, tasks: &[TaskRecord]) -> Vec<DependencyEdge> {
        let placement: HashMap<TaskId, (u8, usize)> = tasks
            .iter()
            .enumerate()
            .map(|(index, task)| (task.id(), (task.phase().rank(), index)))
            .collect();

        // Track, per unordered endpoint pair, which directions were seen.
        let mut pair_order: Vec<(TaskId, TaskId)> = Vec::new();
        let mut seen_directions: HashMap<(TaskId, TaskId), (bool, bool)> = HashMap::new();
        for edge in self
            .phase
            .infer_edges(tasks)
            .into_iter()
            .chain(self.textual.infer_edges(tasks))
        {
            let key = pair_key(edge.from(), edge.to());
            let entry = seen_directions.entry(key).or_insert_with(|| {
                pair_order.push(key);
                (false, false)
            });
            if (edge.from(), edge.to()) == key {
                entry.0 = true;
            } else {
                entry.1 = true;
            }
        }

        let mut edges = Vec::new();
        for key in pair_order {
            let (forward, reverse) = seen_directions.get(&key).copied().unwrap_or_default();
            let (a, b) = key;
            let (from, to) = match (forward, reverse) {
                (true, false) => (a, b),
                (false, true) => (b, a),
                _ => preferred_direction(a, b, &placement),
            };
            if let Ok(edge) = DependencyEdge::new(from, to) {
                edges.push(edge);
            }
        }
        edges
    }
}

/// Normalizes an endpoint pair to a direction-independent key.
fn pair_key(a: TaskId, b: TaskId) -> (TaskId, TaskId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Resolves a mutual reference: earlier phase first, then snapshot order.
fn preferred_direction(
    a: TaskId,
    b: TaskId,
    placement: &HashMap<TaskId, (u8, usize)>,
) -> (TaskId, TaskId) {
    let (rank_a, index_a) = placement.get(&a).copied().unwrap_or((u8::MAX, usize::MAX));
    let (rank_b, index_b) = placement.get(&b).copied().unwrap_or((u8::MAX, usize::MAX));
    if (rank_a, index_a) <= (rank_b, index_b) {
        (a, b)
    } else {
        (b, a)
    }
}

/// Splits text into lowercase alphanumeric words.
fn normalized_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Joins a description's words with surrounding spaces for whole-word
/// containment checks.
fn padded_words(text: &str) -> String {
    format!(" {} ", normalized_words(text).join(" "))
}

/// Extracts the subject of a task description.
///
/// Returns `None` when the remainder after stripping lead-ins is too short
/// to be a distinctive reference target.
fn subject_of(description: &str) -> Option<String> {
    let words = normalized_words(description);
    let subject_words: Vec<String> = words
        .into_iter()
        .skip_while(|word| LEAD_INS.contains(&word.as_str()))
        .collect();

    let subject = subject_words.join(" ");
    let distinctive =
        subject_words.len() >= MIN_SUBJECT_WORDS || subject.chars().count() >= MIN_SUBJECT_CHARS;
    if subject.is_empty() || !distinctive {
        return None;
    }
    Some(subject)
}
