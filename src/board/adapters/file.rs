//! JSON snapshot store inside a capability-scoped directory.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::debug;

use crate::board::{
    config::BoardConfig,
    domain::BoardState,
    ports::{BoardStore, BoardStoreError, BoardStoreResult},
};

/// Board store writing `<storage_key>.json` into a directory.
///
/// Saves go through a temporary sibling file and a rename, so a reader
/// never observes a half-written snapshot.
#[derive(Debug, Clone)]
pub struct FileBoardStore {
    dir: Arc<Dir>,
    file_name: String,
}

impl FileBoardStore {
    /// Creates a store inside an already opened directory, naming the
    /// snapshot after [`BoardConfig::storage_key`].
    #[must_use]
    pub fn new(dir: Dir, config: &BoardConfig) -> Self {
        Self {
            dir: Arc::new(dir),
            file_name: format!("{}.json", config.storage_key),
        }
    }

    /// Opens `path`, creating it when missing, and stores the snapshot
    /// there.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Persistence`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Utf8Path, config: &BoardConfig) -> BoardStoreResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(BoardStoreError::persistence)?;
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(BoardStoreError::persistence)?;
        Ok(Self::new(dir, config))
    }

    /// Returns the snapshot file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardStoreResult<T>
    where
        F: FnOnce(&Dir, &str) -> BoardStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        tokio::task::spawn_blocking(move || f(&dir, &file_name))
            .await
            .map_err(BoardStoreError::persistence)?
    }
}

#[async_trait]
impl BoardStore for FileBoardStore {
    async fn load(&self) -> BoardStoreResult<Option<BoardState>> {
        self.run_blocking(|dir, file_name| {
            let contents = match dir.read_to_string(file_name) {
                Ok(contents) => contents,
                Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
                Err(err) => return Err(BoardStoreError::persistence(err)),
            };
            let state: BoardState = serde_json::from_str(&contents)?;
            Ok(Some(state))
        })
        .await
    }

    async fn save(&self, state: &BoardState) -> BoardStoreResult<()> {
        let contents = serde_json::to_string(state)?;
        self.run_blocking(move |dir, file_name| {
            let staging = format!("{file_name}.tmp");
            dir.write(&staging, contents)
                .map_err(BoardStoreError::persistence)?;
            dir.rename(&staging, dir, file_name)
                .map_err(BoardStoreError::persistence)?;
            debug!(file = file_name, "board snapshot written");
            Ok(())
        })
        .await
    }

    async fn clear(&self) -> BoardStoreResult<()> {
        self.run_blocking(|dir, file_name| match dir.remove_file(file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(BoardStoreError::persistence(err)),
        })
        .await
    }
}
