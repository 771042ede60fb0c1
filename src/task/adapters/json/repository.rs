//! Task repository persisted as a schema-versioned JSON snapshot.
//!
//! The whole store is one JSON document inside a capability-scoped
//! directory. Every mutation rewrites the snapshot through a temporary file
//! followed by a rename, so a crash mid-write leaves the previous snapshot
//! visible rather than a torn one.

use async_trait::async_trait;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{SelectionStatus, TaskId, TaskRecord},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

const SNAPSHOT_FILE: &str = "tasks.json";
const SNAPSHOT_TMP: &str = "tasks.json.tmp";
const SCHEMA_VERSION: u32 = 1;

/// On-disk layout of the task store.
#[derive(Debug, Serialize, Deserialize)]
struct TaskStoreSnapshot {
    schema_version: u32,
    tasks: Vec<TaskRecord>,
}

/// Durable task repository backed by one JSON file.
///
/// Shares the compare-and-set contract of the in-memory adapter; the write
/// lock covers both the status check and the snapshot rewrite, so readers
/// and racing writers observe complete states only.
#[derive(Clone)]
pub struct JsonFileTaskRepository {
    dir: Arc<Dir>,
    state: Arc<RwLock<JsonTaskState>>,
}

#[derive(Debug, Default)]
struct JsonTaskState {
    tasks: HashMap<TaskId, TaskRecord>,
    creation_order: Vec<TaskId>,
}

impl JsonFileTaskRepository {
    /// Opens the repository inside `data_dir`, loading an existing snapshot
    /// when one is present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the snapshot cannot
    /// be read, parsed, or carries an unknown schema version.
    pub fn open(data_dir: Dir) -> TaskRepositoryResult<Self> {
        let state = match data_dir.read_to_string(SNAPSHOT_FILE) {
            Ok(raw) => {
                let snapshot: TaskStoreSnapshot =
                    serde_json::from_str(&raw).map_err(TaskRepositoryError::persistence)?;
                if snapshot.schema_version != SCHEMA_VERSION {
                    return Err(TaskRepositoryError::persistence(std::io::Error::other(
                        format!("unsupported task snapshot schema {}", snapshot.schema_version),
                    )));
                }
                let creation_order = snapshot.tasks.iter().map(TaskRecord::id).collect();
                let tasks = snapshot
                    .tasks
                    .into_iter()
                    .map(|task| (task.id(), task))
                    .collect();
                JsonTaskState {
                    tasks,
                    creation_order,
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => JsonTaskState::default(),
            Err(err) => return Err(TaskRepositoryError::persistence(err)),
        };

        Ok(Self {
            dir: Arc::new(data_dir),
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Serialises the given state and swaps it into place.
    fn persist(&self, state: &JsonTaskState) -> TaskRepositoryResult<()> {
        let snapshot = TaskStoreSnapshot {
            schema_version: SCHEMA_VERSION,
            tasks: state
                .creation_order
                .iter()
                .filter_map(|id| state.tasks.get(id).cloned())
                .collect(),
        };
        let raw =
            serde_json::to_string_pretty(&snapshot).map_err(TaskRepositoryError::persistence)?;
        self.dir
            .write(SNAPSHOT_TMP, raw)
            .map_err(TaskRepositoryError::persistence)?;
        self.dir
            .rename(SNAPSHOT_TMP, &self.dir, SNAPSHOT_FILE)
            .map_err(TaskRepositoryError::persistence)?;
        Ok(())
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for JsonFileTaskRepository {
    async fn create(&self, task: &TaskRecord) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.creation_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        self.persist(&state)
    }

    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskRecord>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<TaskRecord>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .creation_order
            .iter()
            .filter_map(|id| state.tasks.get(id).cloned())
            .collect())
    }

    async fn update(
        &self,
        task: &TaskRecord,
        expected: SelectionStatus,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        if stored.status() != expected {
            return Err(TaskRepositoryError::ConcurrencyConflict {
                id: task.id(),
                expected,
                actual: stored.status(),
            });
        }
        state.tasks.insert(task.id(), task.clone());
        self.persist(&state)
    }

    async fn reset_all(&self) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        *state = JsonTaskState::default();
        self.persist(&state)
    }
}
