//! Selection domain: the fitting room state machine
//!
//! Holds the actor, outfit items and video-generation input the user is
//! currently assembling, and enforces how those three facets combine:
//! - one outfit item per category, a `full` outfit excludes everything else
//! - choosing a video input clears actor and outfit, and vice versa
//!
//! The pure store lives in [`store::InMemorySelectionStore`]; persistence is
//! layered on top by [`store::PersistentSelectionStore`].

pub mod domain;
pub mod storage;
pub mod store;

// Re-export domain types at the crate root for convenience
pub use domain::category::{infer_category, Category};
pub use domain::entities::{
    ActorSelection, OutfitSelection, SelectionState, VideoGenerationInput, MAX_OUTFIT_ITEMS,
};
pub use domain::outcome::{AddOutcome, RejectReason};
pub use domain::state::SelectionPhase;

// Re-export storage and store types
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StorageError};
pub use store::{
    InMemorySelectionStore, PersistedSelection, PersistentSelectionStore, SelectionStore,
    SharedSelectionStore,
};
