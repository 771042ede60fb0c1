//! Matcher queries end-to-end over the in-memory embedding store.

use std::sync::Arc;

use nervi::matcher::adapters::InMemoryEmbeddingRepository;
use nervi::matcher::domain::{ProjectEmbedding, ProjectId, ProjectMetadata};
use nervi::matcher::services::{SimilarityMatcher, DEFAULT_MIN_SCORE};
use once_cell::sync::Lazy;
use rstest::rstest;

/// Seed corpus shared by the query tests: project name plus a unit-ish
/// description vector.
static SEED_PROJECTS: Lazy<Vec<(&'static str, [f32; 3])>> = Lazy::new(|| {
    vec![
        ("quiz-app", [0.9, 0.1, 0.0]),
        ("weather-widget", [0.0, 0.2, 0.9]),
        ("blog", [0.1, 0.9, 0.1]),
    ]
});

fn matcher() -> SimilarityMatcher<InMemoryEmbeddingRepository> {
    SimilarityMatcher::new(Arc::new(InMemoryEmbeddingRepository::new()), 3)
}

fn embedding(vector: Vec<f32>, name: &str) -> ProjectEmbedding {
    ProjectEmbedding::new(
        ProjectId::new(),
        vector,
        ProjectMetadata::new(name, "integration project"),
    )
    .expect("valid embedding")
}

async fn seeded_matcher() -> (
    SimilarityMatcher<InMemoryEmbeddingRepository>,
    Vec<ProjectEmbedding>,
) {
    let index = matcher();
    let mut stored = Vec::new();
    for (name, vector) in SEED_PROJECTS.iter() {
        let project = embedding(vector.to_vec(), name);
        index
            .insert(project.clone())
            .await
            .expect("insert should succeed");
        stored.push(project);
    }
    (index, stored)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn follow_up_request_lands_on_the_closest_project() {
    let (index, stored) = seeded_matcher().await;
    let quiz = stored.first().expect("seed corpus is non-empty").clone();

    // A follow-up shaped like the quiz project's description.
    let follow_up = [0.8, 0.2, 0.1];
    let matches = index
        .query(&follow_up, 3, DEFAULT_MIN_SCORE)
        .await
        .expect("query should succeed");

    assert_eq!(
        matches.first().map(|found| found.project_id),
        Some(quiz.project_id())
    );
    // Scores are descending throughout.
    let scores: Vec<f32> = matches.iter().map(|found| found.score).collect();
    let mut sorted = scores.clone();
    sorted.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(scores, sorted);

    let best = index
        .best_match(&follow_up)
        .await
        .expect("best match should succeed");
    assert_eq!(best.map(|found| found.project_id), Some(quiz.project_id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unrelated_request_matches_nothing_above_threshold() {
    let index = matcher();
    index
        .insert(embedding(vec![1.0, 0.0, 0.0], "quiz-app"))
        .await
        .expect("insert should succeed");

    // Orthogonal to everything stored.
    let unrelated = [0.0, 0.0, 1.0];
    let best = index
        .best_match(&unrelated)
        .await
        .expect("query should succeed");
    assert!(best.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_growth_does_not_reorder_earlier_results() {
    let index = matcher();
    let first = embedding(vec![1.0, 0.0, 0.0], "first");
    let second = embedding(vec![0.9, 0.1, 0.0], "second");
    index.insert(first.clone()).await.expect("insert should succeed");
    index.insert(second.clone()).await.expect("insert should succeed");

    let query = [1.0, 0.0, 0.0];
    let before = index
        .query(&query, 2, 0.0)
        .await
        .expect("query should succeed");

    // Appending a weaker embedding must not disturb the existing order.
    index
        .insert(embedding(vec![0.0, 1.0, 0.0], "weak"))
        .await
        .expect("insert should succeed");
    let after = index
        .query(&query, 2, 0.0)
        .await
        .expect("query should succeed");
    assert_eq!(before, after);
}
