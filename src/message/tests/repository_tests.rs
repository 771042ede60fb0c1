//! Unit tests for the in-memory message repository.

use crate::message::{
    adapters::InMemoryMessageRepository,
    domain::ChatMessage,
    ports::{MessageRepository, MessageRepositoryError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemoryMessageRepository {
    InMemoryMessageRepository::new()
}

fn message(text: &str) -> ChatMessage {
    ChatMessage::new("amara", text, &DefaultClock).expect("valid message")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn append_then_list_preserves_capture_order(repository: InMemoryMessageRepository) {
    let first = message("first");
    let second = message("second");
    repository.append(&first).await.expect("append should succeed");
    repository.append(&second).await.expect("append should succeed");

    let listed = repository.list().await.expect("list should succeed");
    assert_eq!(listed, vec![first, second]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_message_id_is_rejected(repository: InMemoryMessageRepository) {
    let original = message("only once");
    repository
        .append(&original)
        .await
        .expect("append should succeed");

    let result = repository.append(&original).await;
    assert!(matches!(
        result,
        Err(MessageRepositoryError::DuplicateMessage(id)) if id == original.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reset_all_leaves_empty_store(repository: InMemoryMessageRepository) {
    repository
        .append(&message("gone soon"))
        .await
        .expect("append should succeed");

    repository.reset_all().await.expect("reset should succeed");
    let listed = repository.list().await.expect("list should succeed");
    assert!(listed.is_empty());
}
