//! File-backed store tests.

use super::helpers::{ScratchDir, file_store};
use eyre::Result;
use micro_kanban::board::{
    adapters::FileBoardStore,
    config::BoardConfig,
    domain::seed_state,
    ports::{BoardStore, BoardStoreError},
};
use rstest::{fixture, rstest};

#[fixture]
fn scratch() -> ScratchDir {
    ScratchDir::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_snapshot_loads_nothing(scratch: ScratchDir) -> Result<()> {
    let store = file_store(&scratch);

    assert_eq!(store.load().await?, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_snapshot_is_written_under_the_storage_key(scratch: ScratchDir) -> Result<()> {
    let store = file_store(&scratch);

    store.save(&seed_state()).await?;

    assert_eq!(store.file_name(), "micro-kanban-state.json");
    let contents = scratch.open().read_to_string("micro-kanban-state.json")?;
    assert!(contents.contains("\"auditLog\""));
    assert!(!scratch.open().exists("micro-kanban-state.json.tmp"));
    assert_eq!(store.load().await?, Some(seed_state()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_storage_key_names_the_snapshot(scratch: ScratchDir) -> Result<()> {
    let config = BoardConfig::default().with_storage_key("cohorte-b");
    let store = FileBoardStore::open(scratch.path(), &config)?;

    store.save(&seed_state()).await?;

    assert_eq!(store.file_name(), "cohorte-b.json");
    assert!(scratch.open().exists("cohorte-b.json"));
    assert!(!scratch.open().exists("micro-kanban-state.json"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stores_with_different_keys_do_not_collide(scratch: ScratchDir) -> Result<()> {
    let alpha = BoardConfig::default().with_storage_key("alpha");
    let beta = BoardConfig::default().with_storage_key("beta");
    let first = FileBoardStore::new(scratch.open(), &alpha);
    let second = FileBoardStore::new(scratch.open(), &beta);

    first.save(&seed_state()).await?;

    assert_eq!(second.load().await?, None);
    assert!(first.load().await?.is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_snapshot_is_a_serialization_error(scratch: ScratchDir) -> Result<()> {
    scratch.open().write("micro-kanban-state.json", "{ \"tasks\": ")?;
    let store = file_store(&scratch);

    let result = store.load().await;

    assert!(matches!(result, Err(BoardStoreError::Serialization(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clear_removes_the_snapshot_and_tolerates_absence(scratch: ScratchDir) -> Result<()> {
    let store = file_store(&scratch);
    store.save(&seed_state()).await?;

    store.clear().await?;
    store.clear().await?;

    assert!(!scratch.open().exists("micro-kanban-state.json"));
    assert_eq!(store.load().await?, None);
    Ok(())
}
