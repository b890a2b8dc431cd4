//! In-memory store tests.

use micro_kanban::board::{
    adapters::InMemoryBoardStore,
    domain::{BoardState, seed_state},
    ports::BoardStore,
};
use rstest::{fixture, rstest};

#[fixture]
fn store() -> InMemoryBoardStore {
    InMemoryBoardStore::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_loads_nothing(store: InMemoryBoardStore) {
    let loaded = store.load().await.expect("load should succeed");

    assert_eq!(loaded, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn save_replaces_the_snapshot(store: InMemoryBoardStore) {
    store
        .save(&BoardState::default())
        .await
        .expect("first save should succeed");
    store
        .save(&seed_state())
        .await
        .expect("second save should succeed");

    let loaded = store.load().await.expect("load should succeed");

    assert_eq!(loaded, Some(seed_state()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clones_share_the_slot(store: InMemoryBoardStore) {
    let other = store.clone();
    store.save(&seed_state()).await.expect("save should succeed");

    other.clear().await.expect("clear should succeed");

    assert_eq!(store.load().await.expect("load should succeed"), None);
}
