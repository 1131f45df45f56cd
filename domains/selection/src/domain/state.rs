//! Phases of the fitting room state machine
//!
//! The phase is derived from which facets of the aggregate are populated;
//! it is never stored. The machine is cyclic and has no terminal phase.

use serde::Serialize;

/// Which facet of the selection is the user's active intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    Empty,
    ActorOnly,
    OutfitOnly,
    ActorAndOutfit,
    VideoInputActive,
}

impl SelectionPhase {
    /// Whether an image generation can be submitted from this phase
    pub fn is_image_ready(&self) -> bool {
        matches!(self, Self::ActorAndOutfit)
    }

    /// Phases reachable through a single store operation (self-loops excluded)
    pub fn valid_transitions(&self) -> &'static [SelectionPhase] {
        match self {
            Self::Empty => &[Self::ActorOnly, Self::OutfitOnly, Self::VideoInputActive],
            Self::ActorOnly => &[Self::Empty, Self::ActorAndOutfit, Self::VideoInputActive],
            Self::OutfitOnly => &[Self::Empty, Self::ActorAndOutfit, Self::VideoInputActive],
            Self::ActorAndOutfit => &[Self::ActorOnly, Self::OutfitOnly, Self::VideoInputActive],
            Self::VideoInputActive => &[Self::Empty, Self::ActorOnly, Self::OutfitOnly],
        }
    }
}

impl std::fmt::Display for SelectionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::ActorOnly => write!(f, "actor_only"),
            Self::OutfitOnly => write!(f, "outfit_only"),
            Self::ActorAndOutfit => write!(f, "actor_and_outfit"),
            Self::VideoInputActive => write!(f, "video_input_active"),
        }
    }
}
