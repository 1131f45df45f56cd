//! Persisting decorator around a selection store
//!
//! Restores the aggregate from key-value storage on construction and writes it
//! back after every mutation. Persistence is best-effort: failures are logged
//! and never change the outcome of the operation.

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::entities::{ActorSelection, OutfitSelection, SelectionState, VideoGenerationInput};
use crate::domain::outcome::AddOutcome;
use crate::storage::{KeyValueStore, StorageError};
use crate::store::{InMemorySelectionStore, SelectionStore};

/// Versioned envelope the aggregate is stored in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSelection {
    pub version: u32,
    pub state: SelectionState,
}

impl PersistedSelection {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn encode(state: &SelectionState) -> Result<String, StorageError> {
        #[derive(Serialize)]
        struct Envelope<'a> {
            version: u32,
            state: &'a SelectionState,
        }

        Ok(serde_json::to_string(&Envelope {
            version: Self::CURRENT_VERSION,
            state,
        })?)
    }

    pub fn decode(raw: &str) -> Result<SelectionState, StorageError> {
        let persisted: PersistedSelection = serde_json::from_str(raw)?;
        if persisted.version != Self::CURRENT_VERSION {
            return Err(StorageError::UnsupportedVersion(persisted.version));
        }
        Ok(persisted.state)
    }
}

pub struct PersistentSelectionStore<K, S = InMemorySelectionStore> {
    inner: S,
    storage: K,
    key: String,
}

impl<K, S> PersistentSelectionStore<K, S>
where
    K: KeyValueStore,
    S: SelectionStore + From<SelectionState>,
{
    /// Rehydrate from `storage[key]`, starting empty when nothing usable is stored
    pub fn restore(storage: K, key: impl Into<String>) -> Self {
        let key = key.into();

        let state = match storage.load(&key) {
            Ok(Some(raw)) => match PersistedSelection::decode(&raw) {
                Ok(state) => {
                    tracing::info!(key = %key, phase = %state.phase(), "Restored selection state");
                    state
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding persisted selection state");
                    SelectionState::default()
                }
            },
            Ok(None) => {
                tracing::debug!(key = %key, "No persisted selection state, starting empty");
                SelectionState::default()
            }
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Failed to load selection state, starting empty");
                SelectionState::default()
            }
        };

        Self {
            inner: S::from(state),
            storage,
            key,
        }
    }
}

impl<K, S> PersistentSelectionStore<K, S>
where
    K: KeyValueStore,
    S: SelectionStore,
{
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }

    /// Mirror the current aggregate into storage
    fn persist(&self) {
        let result = PersistedSelection::encode(self.inner.state())
            .and_then(|raw| self.storage.save(&self.key, &raw));

        if let Err(e) = result {
            tracing::error!(key = %self.key, error = %e, "Failed to persist selection state");
        }
    }
}

impl<K, S> SelectionStore for PersistentSelectionStore<K, S>
where
    K: KeyValueStore,
    S: SelectionStore,
{
    fn state(&self) -> &SelectionState {
        self.inner.state()
    }

    fn set_actor(&mut self, actor: ActorSelection) {
        self.inner.set_actor(actor);
        self.persist();
    }

    fn clear_actor(&mut self) {
        self.inner.clear_actor();
        self.persist();
    }

    fn add_outfit_item(&mut self, item: OutfitSelection) -> AddOutcome {
        let outcome = self.inner.add_outfit_item(item);
        // a rejected add may still have cleared the video input
        self.persist();
        outcome
    }

    fn remove_outfit_item(&mut self, category: &Category) {
        self.inner.remove_outfit_item(category);
        self.persist();
    }

    fn clear_outfit_items(&mut self) {
        self.inner.clear_outfit_items();
        self.persist();
    }

    fn set_video_gen_input(&mut self, input: VideoGenerationInput) {
        self.inner.set_video_gen_input(input);
        self.persist();
    }

    fn clear_video_gen_input(&mut self) {
        self.inner.clear_video_gen_input();
        self.persist();
    }
}
