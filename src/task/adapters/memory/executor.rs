//! Scriptable collaborator double used by tests and demos.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::task::{
    domain::{ExecutionArtifact, TaskId, TaskRecord},
    ports::{CodeExecutor, ExecutorFailure},
};

/// Collaborator double that records invocation order.
///
/// Successful runs produce a deterministic result reference: the sha-256
/// digest of the task identity and description. Tasks registered through
/// [`RecordingExecutor::fail_task`] fail with a canned reason instead.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    state: Arc<Mutex<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    invocations: Vec<TaskId>,
    failing: HashSet<TaskId>,
}

impl RecordingExecutor {
    /// Creates an executor that succeeds for every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a task so its execution attempt fails.
    pub fn fail_task(&self, id: TaskId) {
        if let Ok(mut state) = self.state.lock() {
            state.failing.insert(id);
        }
    }

    /// Returns the task ids in the order they were executed.
    #[must_use]
    pub fn invocations(&self) -> Vec<TaskId> {
        self.state
            .lock()
            .map(|state| state.invocations.clone())
            .unwrap_or_default()
    }
}

fn artifact_reference(task: &TaskRecord) -> String {
    let mut hasher = Sha256::new();
    hasher.update(task.id().to_string().as_bytes());
    hasher.update(task.description().as_bytes());
    let digest = hasher.finalize();
    format!("sha256:{digest:x}")
}

#[async_trait]
impl CodeExecutor for RecordingExecutor {
    async fn run(&self, task: &TaskRecord) -> Result<ExecutionArtifact, ExecutorFailure> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| ExecutorFailure::new(err.to_string()))?;
        state.invocations.push(task.id());
        if state.failing.contains(&task.id()) {
            return Err(ExecutorFailure::new(format!(
                "scripted failure for task {}",
                task.id()
            )));
        }
        Ok(ExecutionArtifact::new(artifact_reference(task)))
    }
}
