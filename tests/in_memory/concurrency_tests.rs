//! Compare-and-set races and atomic reset under concurrency.

use mockable::DefaultClock;
use nervi::message::domain::ChatMessage;
use nervi::message::ports::MessageRepository;
use nervi::task::domain::{SelectionStatus, TaskPhase};
use nervi::task::ports::{TaskRepository, TaskRepositoryError};
use rstest::rstest;

use super::helpers::{create_task, create_task_with_status, harness};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn at_most_one_concurrent_executor_wins() {
    let fixture = harness();
    let task = create_task_with_status(
        &fixture.tasks,
        "Implement the exporter",
        "one message",
        TaskPhase::FeatureImplementation,
        SelectionStatus::Selected,
    )
    .await;

    let attempts = 8;
    let mut handles = Vec::new();
    for _ in 0..attempts {
        let repository = fixture.tasks.clone();
        let mut candidate = task.clone();
        handles.push(tokio::spawn(async move {
            candidate
                .transition_to(SelectionStatus::Executed, &DefaultClock)
                .expect("selected to executed is legal");
            repository
                .update(&candidate, SelectionStatus::Selected)
                .await
        }));
    }

    let mut wins = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("spawned attempt should not panic") {
            Ok(()) => wins += 1,
            Err(TaskRepositoryError::ConcurrencyConflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    // Exactly one compare-and-set lands; every other attempt loses.
    assert_eq!(wins, 1);
    assert_eq!(conflicts, attempts - 1);

    let stored = fixture
        .tasks
        .get(task.id())
        .await
        .expect("get should succeed")
        .expect("task should exist");
    assert_eq!(stored.status(), SelectionStatus::Executed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn losing_writer_can_refetch_and_see_the_winner() {
    let fixture = harness();
    let task = create_task(
        &fixture.tasks,
        "Implement the exporter",
        "one message",
        TaskPhase::FeatureImplementation,
    )
    .await;

    // First writer selects the task.
    let mut selecting = task.clone();
    selecting
        .transition_to(SelectionStatus::Selected, &DefaultClock)
        .expect("pending to selected is legal");
    fixture
        .tasks
        .update(&selecting, SelectionStatus::Pending)
        .await
        .expect("first writer should win");

    // Second writer still holds the pending snapshot and loses.
    let mut rejecting = task.clone();
    rejecting
        .transition_to(SelectionStatus::Rejected, &DefaultClock)
        .expect("pending to rejected is legal");
    let err = fixture
        .tasks
        .update(&rejecting, SelectionStatus::Pending)
        .await
        .expect_err("stale writer must lose");
    assert!(matches!(
        err,
        TaskRepositoryError::ConcurrencyConflict {
            expected: SelectionStatus::Pending,
            actual: SelectionStatus::Selected,
            ..
        }
    ));

    // Re-fetching shows the winner's state, and a retry from the fresh
    // snapshot succeeds.
    let mut fresh = fixture
        .tasks
        .get(task.id())
        .await
        .expect("get should succeed")
        .expect("task should exist");
    assert_eq!(fresh.status(), SelectionStatus::Selected);
    fresh
        .transition_to(SelectionStatus::Rejected, &DefaultClock)
        .expect("selected to rejected is legal");
    fixture
        .tasks
        .update(&fresh, SelectionStatus::Selected)
        .await
        .expect("retry from fresh snapshot should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reset_is_atomic_as_observed_by_concurrent_pollers() {
    let fixture = harness();
    let seeded: u32 = 5;
    for index in 0..seeded {
        create_task(
            &fixture.tasks,
            &format!("Implement widget {index}"),
            &format!("message {index}"),
            TaskPhase::FeatureImplementation,
        )
        .await;
        fixture
            .messages
            .append(
                &ChatMessage::new("amara", format!("message {index}"), &DefaultClock)
                    .expect("valid message"),
            )
            .await
            .expect("append should succeed");
    }

    let mut pollers = Vec::new();
    for _ in 0..16 {
        let api = fixture.api.clone();
        pollers.push(tokio::spawn(
            async move { api.stats().await.expect("stats should succeed") },
        ));
    }
    let resetter = {
        let api = fixture.api.clone();
        tokio::spawn(async move { api.reset().await.expect("reset should succeed") })
    };

    for poller in pollers {
        let stats = poller.await.expect("poller should not panic");
        // Either the full pre-reset world or the empty post-reset world;
        // never a half-cleared mixture.
        let observed = (stats.total_tasks, stats.total_messages);
        assert!(
            observed == (seeded, seeded) || observed == (0, 0),
            "partial reset observed: {observed:?}"
        );
    }
    resetter.await.expect("resetter should not panic");

    let finally = fixture.api.stats().await.expect("stats should succeed");
    assert_eq!((finally.total_tasks, finally.total_messages), (0, 0));
}
