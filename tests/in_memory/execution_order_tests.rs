//! Topological execution ordering under the real heuristics.

use nervi::api::dto::SelectionRequest;
use nervi::task::domain::{TaskId, TaskPhase};
use rstest::rstest;

use super::helpers::{create_task, harness};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn phases_from_one_message_run_in_pipeline_order() {
    let fixture = harness();
    let quiz_source = "build me a quiz app";
    let weather_source = "and a weather widget";

    // Created in scrambled order on purpose.
    let quiz_feature = create_task(
        &fixture.tasks,
        "Implement the quiz scoring screen",
        quiz_source,
        TaskPhase::FeatureImplementation,
    )
    .await;
    let quiz_setup = create_task(
        &fixture.tasks,
        "Set up the quiz app repo",
        quiz_source,
        TaskPhase::ProjectSetup,
    )
    .await;
    let weather_feature = create_task(
        &fixture.tasks,
        "Implement the weather widget",
        weather_source,
        TaskPhase::FeatureImplementation,
    )
    .await;
    let quiz_deps = create_task(
        &fixture.tasks,
        "Install the quiz dependencies",
        quiz_source,
        TaskPhase::DependencyInstallation,
    )
    .await;

    for task in [&quiz_feature, &quiz_setup, &weather_feature, &quiz_deps] {
        fixture
            .api
            .change_selection(
                task.id(),
                SelectionRequest {
                    status: "selected".to_owned(),
                    force: false,
                },
            )
            .await
            .expect("selection should succeed");
    }

    let response = fixture
        .api
        .execute_selected()
        .await
        .expect("execution should succeed");
    assert!(response.success);
    assert_eq!(response.executed_tasks, 4);

    let order = fixture.executor.invocations();
    let position = |id: TaskId| {
        order
            .iter()
            .position(|candidate| *candidate == id)
            .expect("every task was attempted")
    };

    // Same-message phases run in pipeline order.
    assert!(position(quiz_setup.id()) < position(quiz_deps.id()));
    assert!(position(quiz_deps.id()) < position(quiz_feature.id()));
    // The unrelated message's task is free to run anywhere; ties resolve
    // by creation order, which puts it right after the quiz setup.
    assert_eq!(
        order,
        vec![
            quiz_setup.id(),
            weather_feature.id(),
            quiz_deps.id(),
            quiz_feature.id()
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_snapshots_order_identically() {
    let fixture = harness();
    let source = "several features in one message";
    for description in [
        "Implement the billing page",
        "Implement the invoice export",
        "Implement the reminder emails",
    ] {
        let task = create_task(
            &fixture.tasks,
            description,
            source,
            TaskPhase::FeatureImplementation,
        )
        .await;
        fixture
            .api
            .change_selection(
                task.id(),
                SelectionRequest {
                    status: "selected".to_owned(),
                    force: false,
                },
            )
            .await
            .expect("selection should succeed");
    }

    // Equal phases and no cross-references: the batch must fall back to
    // creation order deterministically.
    let response = fixture
        .api
        .execute_selected()
        .await
        .expect("execution should succeed");
    assert!(response.success);

    let listed = fixture.api.list_tasks().await.expect("list should succeed");
    let creation_order: Vec<TaskId> = listed.iter().map(|view| view.id).collect();
    assert_eq!(fixture.executor.invocations(), creation_order);
}
