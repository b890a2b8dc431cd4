//! Shared helpers for board store integration tests.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use micro_kanban::board::{
    adapters::{FileBoardStore, SchemaDocumentValidator},
    config::BoardConfig,
    ports::BoardStore,
    services::BoardController,
};
use mockable::DefaultClock;
use std::sync::Arc;

/// Scratch directory removed when dropped.
pub struct ScratchDir {
    path: Utf8PathBuf,
}

impl ScratchDir {
    /// Creates a uniquely named directory under the system temp dir.
    pub fn new() -> Self {
        let root = Utf8PathBuf::from_path_buf(std::env::temp_dir())
            .unwrap_or_else(|_| Utf8PathBuf::from("/tmp"));
        let path = root.join(format!("micro-kanban-{}", uuid::Uuid::new_v4()));
        Dir::create_ambient_dir_all(&path, ambient_authority())
            .expect("scratch directory should be creatable");
        Self { path }
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Opens the directory with ambient authority.
    pub fn open(&self) -> Dir {
        Dir::open_ambient_dir(&self.path, ambient_authority())
            .expect("scratch directory should open")
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let (Some(parent), Some(name)) = (self.path.parent(), self.path.file_name()) else {
            return;
        };
        if let Ok(dir) = Dir::open_ambient_dir(parent, ambient_authority()) {
            drop(dir.remove_dir_all(name));
        }
    }
}

/// Controller type backed by a file store.
pub type FileController<S> = BoardController<S, SchemaDocumentValidator, DefaultClock>;

/// Opens a session over `store` with default settings.
pub async fn open_session<S: BoardStore>(store: Arc<S>) -> FileController<S> {
    BoardController::open(
        store,
        Arc::new(SchemaDocumentValidator::new()),
        Arc::new(DefaultClock),
        BoardConfig::default(),
    )
    .await
}

/// Builds a file store for `scratch` using the default storage key.
pub fn file_store(scratch: &ScratchDir) -> FileBoardStore {
    FileBoardStore::open(scratch.path(), &BoardConfig::default()).expect("file store should open")
}
