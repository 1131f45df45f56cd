//! Selection store implementations
//!
//! [`SelectionStore`] is the seam every selection screen talks to. The
//! combination rules live in [`InMemorySelectionStore`]; the other types wrap
//! it without changing its semantics.

pub mod memory;
pub mod persistent;
pub mod shared;

pub use memory::InMemorySelectionStore;
pub use persistent::{PersistedSelection, PersistentSelectionStore};
pub use shared::SharedSelectionStore;

use crate::domain::category::Category;
use crate::domain::entities::{ActorSelection, OutfitSelection, SelectionState, VideoGenerationInput};
use crate::domain::outcome::AddOutcome;
use crate::domain::state::SelectionPhase;

/// Single source of truth for what the user is currently assembling
pub trait SelectionStore: Send {
    /// Current aggregate
    fn state(&self) -> &SelectionState;

    /// Replace the actor wholesale; clears the video input
    fn set_actor(&mut self, actor: ActorSelection);

    /// Reset the actor to its empty default
    fn clear_actor(&mut self);

    /// Add an outfit item, resolving category conflicts.
    ///
    /// Always clears the video input, even when the item is rejected.
    fn add_outfit_item(&mut self, item: OutfitSelection) -> AddOutcome;

    /// Remove the item in `category`; no-op if the slot is empty
    fn remove_outfit_item(&mut self, category: &Category);

    fn clear_outfit_items(&mut self);

    /// Replace the video input; clears both actor and outfit items
    fn set_video_gen_input(&mut self, input: VideoGenerationInput);

    fn clear_video_gen_input(&mut self);

    /// Populated facets among actor and outfit (0, 1 or 2)
    fn selection_count(&self) -> usize {
        self.state().selection_count()
    }

    fn has_full_outfit(&self) -> bool {
        self.state().has_full_outfit()
    }

    fn phase(&self) -> SelectionPhase {
        self.state().phase()
    }
}
