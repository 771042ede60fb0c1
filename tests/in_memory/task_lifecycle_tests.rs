//! End-to-end lifecycle tests through the boundary surface.

use nervi::api::dto::SelectionRequest;
use nervi::api::ApiError;
use nervi::task::domain::{SelectionStatus, TaskPhase};
use rstest::rstest;

use super::helpers::{create_task, harness, stored_status};

fn request(status: &str, force: bool) -> SelectionRequest {
    SelectionRequest {
        status: status.to_owned(),
        force,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn select_execute_then_reject_executed_scenario() {
    let fixture = harness();
    let source = "please add a score tracker and test it";
    let feature = create_task(
        &fixture.tasks,
        "Implement the score tracker",
        source,
        TaskPhase::FeatureImplementation,
    )
    .await;
    let testing = create_task(
        &fixture.tasks,
        "Test the score tracker",
        source,
        TaskPhase::Testing,
    )
    .await;

    // Select both tasks.
    for task in [&feature, &testing] {
        let response = fixture
            .api
            .change_selection(task.id(), request("selected", false))
            .await
            .expect("selection should succeed");
        assert!(response.success);
    }

    // Execute all selected: both run, prerequisite first.
    let executed = fixture
        .api
        .execute_selected()
        .await
        .expect("execution should succeed");
    assert!(executed.success);
    assert_eq!(executed.executed_tasks, 2);
    assert_eq!(
        fixture.executor.invocations(),
        vec![feature.id(), testing.id()]
    );
    assert_eq!(
        stored_status(&fixture.tasks, &feature).await,
        SelectionStatus::Executed
    );
    assert_eq!(
        stored_status(&fixture.tasks, &testing).await,
        SelectionStatus::Executed
    );

    // Executed tasks are immutable: a rejection attempt is a 409.
    let err = fixture
        .api
        .change_selection(feature.id(), request("rejected", true))
        .await
        .expect_err("executed tasks can never change status");
    assert_eq!(err.status_code(), 409);
    assert!(matches!(err, ApiError::ImmutableState(id) if id == feature.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_dry_run_blocks_then_force_proceeds() {
    let fixture = harness();
    let source = "wire the importer, then validate it";
    let upstream = create_task(
        &fixture.tasks,
        "Implement the csv importer",
        source,
        TaskPhase::FeatureImplementation,
    )
    .await;
    let downstream = create_task(
        &fixture.tasks,
        "Test the csv importer",
        source,
        TaskPhase::Testing,
    )
    .await;

    for task in [&upstream, &downstream] {
        fixture
            .api
            .change_selection(task.id(), request("selected", false))
            .await
            .expect("selection should succeed");
    }

    // Dependency check warns before anything happens.
    let check = fixture
        .api
        .task_dependencies(upstream.id())
        .await
        .expect("dependency check should succeed");
    assert_eq!(check.dependencies.len(), 1);
    assert!(check.warning.is_some());

    // Unforced rejection is a dry run.
    let blocked = fixture
        .api
        .change_selection(upstream.id(), request("rejected", false))
        .await
        .expect("blocked rejection is a 200");
    assert!(!blocked.success);
    assert_eq!(blocked.impacted.len(), 1);
    assert_eq!(
        stored_status(&fixture.tasks, &upstream).await,
        SelectionStatus::Selected
    );

    // Force proceeds and leaves the dependent selected.
    let forced = fixture
        .api
        .change_selection(upstream.id(), request("rejected", true))
        .await
        .expect("forced rejection should succeed");
    assert!(forced.success);
    assert_eq!(
        stored_status(&fixture.tasks, &upstream).await,
        SelectionStatus::Rejected
    );
    assert_eq!(
        stored_status(&fixture.tasks, &downstream).await,
        SelectionStatus::Selected
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_tasks_stay_terminal_through_the_api() {
    let fixture = harness();
    let task = create_task(
        &fixture.tasks,
        "Implement the exporter",
        "one-off message",
        TaskPhase::FeatureImplementation,
    )
    .await;

    fixture
        .api
        .change_selection(task.id(), request("rejected", false))
        .await
        .expect("rejection should succeed");

    let err = fixture
        .api
        .change_selection(task.id(), request("selected", false))
        .await
        .expect_err("rejected tasks cannot be resurrected");
    assert_eq!(err.status_code(), 409);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn executing_twice_does_not_rerun_tasks() {
    let fixture = harness();
    let task = create_task(
        &fixture.tasks,
        "Implement the exporter",
        "one-off message",
        TaskPhase::FeatureImplementation,
    )
    .await;
    fixture
        .api
        .change_selection(task.id(), request("selected", false))
        .await
        .expect("selection should succeed");

    let first = fixture
        .api
        .execute_selected()
        .await
        .expect("first batch should succeed");
    assert_eq!(first.executed_tasks, 1);

    // Nothing is selected any more; the second batch is empty and the
    // collaborator is not called again.
    let second = fixture
        .api
        .execute_selected()
        .await
        .expect("second batch should succeed");
    assert_eq!(second.executed_tasks, 0);
    assert_eq!(fixture.executor.invocations().len(), 1);
}
