//! Shared, observable handle to a selection store
//!
//! Every selection screen holds a clone of the same handle. Mutations go
//! through the handle, and each change is published on a `watch` channel so
//! all subscribers see the same state.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::domain::category::Category;
use crate::domain::entities::{ActorSelection, OutfitSelection, SelectionState, VideoGenerationInput};
use crate::domain::outcome::AddOutcome;
use crate::domain::state::SelectionPhase;
use crate::store::SelectionStore;

#[derive(Clone)]
pub struct SharedSelectionStore {
    store: Arc<Mutex<Box<dyn SelectionStore>>>,
    updates: Arc<watch::Sender<SelectionState>>,
}

impl SharedSelectionStore {
    pub fn new(store: impl SelectionStore + 'static) -> Self {
        let (updates, _) = watch::channel(store.state().clone());
        let store: Box<dyn SelectionStore> = Box::new(store);
        Self {
            store: Arc::new(Mutex::new(store)),
            updates: Arc::new(updates),
        }
    }

    /// Receive the state after every change
    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.updates.subscribe()
    }

    /// Copy of the current aggregate
    pub fn snapshot(&self) -> SelectionState {
        self.read(|store| store.state().clone())
    }

    /// Run a read-only query against the store
    pub fn read<R>(&self, f: impl FnOnce(&dyn SelectionStore) -> R) -> R {
        let guard = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&**guard)
    }

    /// Run a mutation and notify subscribers if the state changed
    pub fn update<R>(&self, f: impl FnOnce(&mut dyn SelectionStore) -> R) -> R {
        let mut guard = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut **guard);
        let state = guard.state().clone();
        drop(guard);

        self.updates.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });

        result
    }

    pub fn set_actor(&self, actor: ActorSelection) {
        self.update(|store| store.set_actor(actor));
    }

    pub fn clear_actor(&self) {
        self.update(|store| store.clear_actor());
    }

    pub fn add_outfit_item(&self, item: OutfitSelection) -> AddOutcome {
        self.update(|store| store.add_outfit_item(item))
    }

    pub fn remove_outfit_item(&self, category: &Category) {
        self.update(|store| store.remove_outfit_item(category));
    }

    pub fn clear_outfit_items(&self) {
        self.update(|store| store.clear_outfit_items());
    }

    pub fn set_video_gen_input(&self, input: VideoGenerationInput) {
        self.update(|store| store.set_video_gen_input(input));
    }

    pub fn clear_video_gen_input(&self) {
        self.update(|store| store.clear_video_gen_input());
    }

    pub fn selection_count(&self) -> usize {
        self.read(|store| store.selection_count())
    }

    pub fn has_full_outfit(&self) -> bool {
        self.read(|store| store.has_full_outfit())
    }

    pub fn phase(&self) -> SelectionPhase {
        self.read(|store| store.phase())
    }
}

impl std::fmt::Debug for SharedSelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSelectionStore")
            .field("state", &*self.updates.borrow())
            .finish()
    }
}
