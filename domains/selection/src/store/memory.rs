//! Pure in-memory selection store
//!
//! Holds the combination rules. Performs no I/O.

use crate::domain::category::{infer_category, Category};
use crate::domain::entities::{
    ActorSelection, OutfitSelection, SelectionState, VideoGenerationInput, MAX_OUTFIT_ITEMS,
};
use crate::domain::outcome::{AddOutcome, RejectReason};
use crate::store::SelectionStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemorySelectionStore {
    state: SelectionState,
}

impl InMemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously saved aggregate.
    ///
    /// Facets are taken verbatim; only item categories are normalized.
    pub fn from_state(mut state: SelectionState) -> Self {
        for item in &mut state.outfit_items {
            item.category = item.category.clone().normalized();
        }
        Self { state }
    }

    pub fn into_state(self) -> SelectionState {
        self.state
    }
}

impl From<SelectionState> for InMemorySelectionStore {
    fn from(state: SelectionState) -> Self {
        Self::from_state(state)
    }
}

impl SelectionStore for InMemorySelectionStore {
    fn state(&self) -> &SelectionState {
        &self.state
    }

    fn set_actor(&mut self, mut actor: ActorSelection) {
        tracing::debug!(image_id = %actor.image_id, "Selecting actor");
        actor.weight = finite_or_unset(actor.weight, "weight");
        actor.height = finite_or_unset(actor.height, "height");
        self.state.actor = actor;
        self.state.video_gen_input = None;
    }

    fn clear_actor(&mut self) {
        self.state.actor = ActorSelection::default();
    }

    fn add_outfit_item(&mut self, mut item: OutfitSelection) -> AddOutcome {
        let requested = item.category.clone().normalized();
        item.category = infer_category(&item.garment_type, requested);

        self.state.video_gen_input = None;

        if item.category.is_full() {
            tracing::debug!(image_id = %item.image_id, "Selecting full outfit, replacing all pieces");
            self.state.outfit_items = vec![item];
            return AddOutcome::Added;
        }

        if self.state.has_full_outfit() {
            tracing::warn!(
                image_id = %item.image_id,
                category = %item.category,
                "Rejected outfit item: full outfit already selected"
            );
            return AddOutcome::Rejected(RejectReason::FullOutfitConflict);
        }

        let mut items: Vec<OutfitSelection> = self
            .state
            .outfit_items
            .iter()
            .filter(|existing| existing.category != item.category)
            .cloned()
            .collect();
        let image_id = item.image_id.clone();
        let category = item.category.clone();
        items.push(item);

        if items.len() > MAX_OUTFIT_ITEMS {
            tracing::warn!(
                image_id = %image_id,
                category = %category,
                max = MAX_OUTFIT_ITEMS,
                "Rejected outfit item: outfit is at capacity"
            );
            return AddOutcome::Rejected(RejectReason::CapacityExceeded);
        }

        tracing::debug!(image_id = %image_id, category = %category, "Selecting outfit item");
        self.state.outfit_items = items;
        AddOutcome::Added
    }

    fn remove_outfit_item(&mut self, category: &Category) {
        let category = category.clone().normalized();
        self.state
            .outfit_items
            .retain(|item| item.category != category);
    }

    fn clear_outfit_items(&mut self) {
        self.state.outfit_items.clear();
    }

    fn set_video_gen_input(&mut self, input: VideoGenerationInput) {
        tracing::debug!(document_id = %input.document_id, "Selecting video generation input");
        self.state.video_gen_input = Some(input);
        self.state.actor = ActorSelection::default();
        self.state.outfit_items.clear();
    }

    fn clear_video_gen_input(&mut self) {
        self.state.video_gen_input = None;
    }
}

/// Measurements must stay JSON-representable; NaN and infinity read as unset
fn finite_or_unset(value: f64, field: &'static str) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::warn!(field, "Dropping non-finite actor measurement");
        0.0
    }
}
