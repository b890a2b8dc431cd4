//! Persistence port for board snapshots.

use crate::board::domain::BoardState;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board store operations.
pub type BoardStoreResult<T> = Result<T, BoardStoreError>;

/// Snapshot persistence contract, keyed by a fixed storage identifier.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Loads the stored snapshot.
    ///
    /// Returns `None` when no prior session was saved.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the snapshot exists but cannot be
    /// read or decoded.
    async fn load(&self) -> BoardStoreResult<Option<BoardState>>;

    /// Replaces the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the snapshot cannot be written.
    async fn save(&self, state: &BoardState) -> BoardStoreResult<()>;

    /// Removes the stored snapshot. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the snapshot cannot be removed.
    async fn clear(&self) -> BoardStoreResult<()>;
}

/// Errors returned by board store implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardStoreError {
    /// The stored snapshot could not be encoded or decoded.
    #[error("snapshot serialization error: {0}")]
    Serialization(String),

    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardStoreError {
    /// Wraps a storage-layer error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<serde_json::Error> for BoardStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
