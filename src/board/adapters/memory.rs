//! In-memory snapshot store for tests and hosts without storage.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::BoardState,
    ports::{BoardStore, BoardStoreError, BoardStoreResult},
};

/// Thread-safe in-memory board store.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    slot: Arc<RwLock<Option<BoardState>>>,
}

impl InMemoryBoardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `state`.
    #[must_use]
    pub fn with_state(state: BoardState) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(state))),
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> BoardStoreError {
    BoardStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BoardStore for InMemoryBoardStore {
    async fn load(&self) -> BoardStoreResult<Option<BoardState>> {
        let slot = self.slot.read().map_err(poisoned)?;
        Ok(slot.clone())
    }

    async fn save(&self, state: &BoardState) -> BoardStoreResult<()> {
        let mut slot = self.slot.write().map_err(poisoned)?;
        *slot = Some(state.clone());
        Ok(())
    }

    async fn clear(&self) -> BoardStoreResult<()> {
        let mut slot = self.slot.write().map_err(poisoned)?;
        *slot = None;
        Ok(())
    }
}
