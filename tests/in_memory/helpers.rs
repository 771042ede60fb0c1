//! Shared harness for the in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use nervi::api::SyncApi;
use nervi::dependency::adapters::StandardHeuristics;
use nervi::dependency::services::StandardAnalyzer;
use nervi::matcher::adapters::InMemoryEmbeddingRepository;
use nervi::message::adapters::InMemoryMessageRepository;
use nervi::task::adapters::memory::{InMemoryTaskRepository, RecordingExecutor};
use nervi::task::domain::{NewTask, SelectionStatus, TaskPhase, TaskRecord};
use nervi::task::ports::TaskRepository;

/// Fully wired facade over in-memory stores and the standard heuristics.
pub type TestApi = SyncApi<
    InMemoryTaskRepository,
    DefaultClock,
    StandardHeuristics,
    RecordingExecutor,
    InMemoryMessageRepository,
    InMemoryEmbeddingRepository,
>;

/// Stores and collaborators behind a [`TestApi`].
pub struct Harness {
    /// The facade under test.
    pub api: TestApi,
    /// Task store shared with the facade.
    pub tasks: InMemoryTaskRepository,
    /// Message store shared with the facade.
    pub messages: InMemoryMessageRepository,
    /// Embedding store shared with the facade.
    pub embeddings: InMemoryEmbeddingRepository,
    /// Collaborator double recording execution order.
    pub executor: Arc<RecordingExecutor>,
}

/// Builds a harness over empty stores.
#[must_use]
pub fn harness() -> Harness {
    let tasks = InMemoryTaskRepository::new();
    let messages = InMemoryMessageRepository::new();
    let embeddings = InMemoryEmbeddingRepository::new();
    let executor = Arc::new(RecordingExecutor::new());
    let api = SyncApi::new(
        Arc::new(tasks.clone()),
        Arc::new(messages.clone()),
        Arc::new(embeddings.clone()),
        Arc::new(DefaultClock),
        StandardAnalyzer::default(),
        Arc::clone(&executor),
    );
    Harness {
        api,
        tasks,
        messages,
        embeddings,
        executor,
    }
}

/// Creates a pending task in the store.
pub async fn create_task(
    repository: &InMemoryTaskRepository,
    description: &str,
    source: &str,
    phase: TaskPhase,
) -> TaskRecord {
    let task = TaskRecord::new(NewTask::new(description, source, phase), &DefaultClock)
        .expect("valid task input");
    repository
        .create(&task)
        .await
        .expect("create should succeed");
    task
}

/// Creates a task and walks it to the requested status.
pub async fn create_task_with_status(
    repository: &InMemoryTaskRepository,
    description: &str,
    source: &str,
    phase: TaskPhase,
    status: SelectionStatus,
) -> TaskRecord {
    let mut task = create_task(repository, description, source, phase).await;
    let steps: &[SelectionStatus] = match status {
        SelectionStatus::Pending => &[],
        SelectionStatus::Selected => &[SelectionStatus::Selected],
        SelectionStatus::Rejected => &[SelectionStatus::Rejected],
        SelectionStatus::Executed => &[SelectionStatus::Selected, SelectionStatus::Executed],
    };
    for step in steps {
        let prior = task.status();
        task.transition_to(*step, &DefaultClock)
            .expect("setup transition should be legal");
        repository
            .update(&task, prior)
            .await
            .expect("setup update should succeed");
    }
    task
}

/// Reads the stored status of a task.
pub async fn stored_status(
    repository: &InMemoryTaskRepository,
    task: &TaskRecord,
) -> SelectionStatus {
    repository
        .get(task.id())
        .await
        .expect("get should succeed")
        .expect("task should exist")
        .status()
}
